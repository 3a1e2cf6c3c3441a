use crate::components::header::HeaderShader;
use crate::components::hero::{HeroMedia, HeroMode};
use crate::components::lazy::LazyImages;
use crate::components::modal::{LoginModal, ProfileEntry};
use crate::components::nav::NavToggle;
use crate::components::reveal::Reveal;
use crate::components::search::SearchBox;
use crate::components::styles;
use crate::config::PageConfig;
use crate::error::PageError;
use crate::host::{DomEvent, EventKind, Host, ListenTarget};

/// Wires every landing page behaviour onto the document. Listeners keep
/// their own clones, so dropping the controller leaves the page interactive.
pub struct PageController<H: Host> {
    nav: NavToggle<H>,
    header: HeaderShader<H>,
    search: SearchBox<H>,
    modal: Option<LoginModal<H>>,
    hero: Option<HeroMedia<H>>,
}

impl<H: Host> PageController<H> {
    pub fn mount(host: H, config: &PageConfig) -> Result<Self, PageError> {
        let ids = &config.ids;
        let require = |id: &str| {
            host.element_by_id(id)
                .ok_or_else(|| PageError::MissingElement { id: id.to_string() })
        };
        let hamburger = require(ids.hamburger)?;
        let nav_menu = require(ids.nav_menu)?;
        let search_form = require(ids.search_form)?;
        let search_input = require(ids.search_input)?;
        let header_bar = require(ids.header)?;

        styles::inject(&host)?;

        let nav = NavToggle::new(
            host.clone(),
            hamburger,
            nav_menu,
            host.query_all(config.nav_link_selector),
        );
        nav.bind()?;

        let hero_section = host.element_by_id(ids.hero);
        let header = HeaderShader::new(
            host.clone(),
            header_bar,
            hero_section.as_ref(),
            config.header_offset_px,
            config.hero_fallback_height_px,
        );
        header.bind()?;

        let search = SearchBox::new(
            host.clone(),
            search_form,
            search_input,
            config.error_flash_ms,
        );
        search.bind()?;

        let modal = host
            .element_by_id(ids.login_modal)
            .map(|root| LoginModal::locate(host.clone(), root, &config.modal));
        if let Some(modal) = &modal {
            modal.bind()?;
        }
        match host.element_by_id(ids.user_button) {
            Some(button) => {
                ProfileEntry::new(host.clone(), button, modal.clone(), config.login_path)
                    .bind()?;
            }
            None => log::debug!("No #{} on this page", ids.user_button),
        }

        skip_unsupported(
            Reveal::new(host.clone()).observe(
                config.reveal_observer,
                host.query_all(config.reveal_selector),
            ),
        )?;
        skip_unsupported(
            LazyImages::new(host.clone()).observe(
                config.lazy_observer,
                host.query_all(config.lazy_card_selector),
            ),
        )?;

        let hero = host.element_by_id(ids.hero_video).map(|video| {
            let hero = HeroMedia::new(host.clone(), video, host.element_by_id(ids.hero_image));
            hero.select(config.fast_connection);
            hero
        });

        log::info!("Landing page mounted");
        Ok(Self {
            nav,
            header,
            search,
            modal,
            hero,
        })
    }

    pub fn nav_open(&self) -> bool {
        self.nav.is_open()
    }

    pub fn header_scrolled(&self) -> bool {
        self.header.is_scrolled()
    }

    pub fn modal_open(&self) -> bool {
        self.modal.as_ref().map_or(false, LoginModal::is_open)
    }

    pub fn hero_mode(&self) -> Option<HeroMode> {
        self.hero.as_ref().and_then(HeroMedia::mode)
    }

    pub fn search(&self) -> &SearchBox<H> {
        &self.search
    }
}

fn skip_unsupported(result: Result<(), PageError>) -> Result<(), PageError> {
    match result {
        Err(PageError::Unsupported(api)) => {
            log::warn!("{} unavailable, cards stay as rendered", api);
            Ok(())
        }
        other => other,
    }
}

/// Mounts now, or once `DOMContentLoaded` fires if the document is still
/// parsing.
pub fn bootstrap<H: Host>(host: H, config: PageConfig) -> Result<(), PageError> {
    if !host.document_loading() {
        return PageController::mount(host, &config).map(|_| ());
    }
    let mount_host = host.clone();
    let mut config = Some(config);
    host.listen(
        ListenTarget::Document,
        EventKind::DomContentLoaded,
        Box::new(move |_: &mut DomEvent| {
            let Some(config) = config.take() else {
                return;
            };
            if let Err(e) = PageController::mount(mount_host.clone(), &config) {
                log::error!("Failed to mount landing page: {}", e);
            }
        }),
    )
}
