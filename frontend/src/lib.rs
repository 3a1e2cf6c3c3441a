//! Wanderlust landing page interactivity, compiled to WebAssembly.
//!
//! The page markup is served as static HTML; this crate attaches behaviour to
//! it once the document is ready: mobile navigation, header shading, search
//! validation, the login modal, scroll reveals, lazy card images and the hero
//! video/image choice. All of it is written against [`host::Host`] so it can
//! be exercised natively with the in-memory host behind the `testing` feature.

pub mod components;
pub mod config;
pub mod error;
pub mod host;
pub mod pages;

pub use config::PageConfig;
pub use error::PageError;
pub use pages::landing::{bootstrap, PageController};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Entry point run by the generated JS glue when the module loads.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    wasm_logger::init(wasm_logger::Config::new(level));

    let host = host::web::WebHost::new()?;
    bootstrap(host, PageConfig::default())?;
    Ok(())
}
