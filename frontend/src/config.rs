//! Element ids, selectors and tuning constants for the landing page.

use crate::host::ObserverOptions;

const DEFAULT_LOGIN_PATH: &str = "/login.html";

/// Where the profile button sends users when the page has no login modal.
/// Overridable at build time through `WANDERLUST_LOGIN_PATH`.
pub fn get_login_path() -> &'static str {
    option_env!("WANDERLUST_LOGIN_PATH").unwrap_or(DEFAULT_LOGIN_PATH)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElementIds {
    pub hamburger: &'static str,
    pub nav_menu: &'static str,
    pub search_form: &'static str,
    pub search_input: &'static str,
    pub header: &'static str,
    pub hero: &'static str,
    pub hero_video: &'static str,
    pub hero_image: &'static str,
    pub user_button: &'static str,
    pub login_modal: &'static str,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            hamburger: "hamburger",
            nav_menu: "nav-menu",
            search_form: "search-form",
            search_input: "search-input",
            header: "header",
            hero: "hero",
            hero_video: "hero-video",
            hero_image: "hero-image",
            user_button: "user-button",
            login_modal: "login-modal",
        }
    }
}

/// Selectors resolved inside the login modal.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalSelectors {
    pub close: &'static str,
    pub backdrop: &'static str,
    pub form: &'static str,
    pub first_input: &'static str,
}

impl Default for ModalSelectors {
    fn default() -> Self {
        Self {
            close: ".modal-close",
            backdrop: ".modal-backdrop",
            form: "form",
            first_input: "input",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageConfig {
    pub ids: ElementIds,
    pub modal: ModalSelectors,
    pub nav_link_selector: &'static str,
    pub reveal_selector: &'static str,
    pub lazy_card_selector: &'static str,
    /// How far above the bottom of the hero the header turns opaque.
    pub header_offset_px: f64,
    pub hero_fallback_height_px: f64,
    pub error_flash_ms: u32,
    pub reveal_observer: ObserverOptions,
    pub lazy_observer: ObserverOptions,
    /// Effective connection type considered fast enough for the hero video.
    pub fast_connection: &'static str,
    pub login_path: &'static str,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            ids: ElementIds::default(),
            modal: ModalSelectors::default(),
            nav_link_selector: ".nav-link",
            reveal_selector: ".destination-card, .benefit-card, .glass-card",
            lazy_card_selector: ".destination-card",
            header_offset_px: 80.0,
            hero_fallback_height_px: 500.0,
            error_flash_ms: 700,
            reveal_observer: ObserverOptions {
                threshold: 0.12,
                root_margin: "0px",
            },
            lazy_observer: ObserverOptions {
                threshold: 0.05,
                root_margin: "0px 0px 200px 0px",
            },
            fast_connection: "4g",
            login_path: get_login_path(),
        }
    }
}
