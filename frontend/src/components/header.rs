use crate::error::PageError;
use crate::host::{DomEvent, EventKind, Host, ListenTarget};

const SCROLLED_CLASS: &str = "scrolled";

/// Turns the header opaque once the page scrolls past the hero.
#[derive(Clone)]
pub struct HeaderShader<H: Host> {
    host: H,
    header: H::Element,
    threshold: f64,
}

impl<H: Host> HeaderShader<H> {
    /// The threshold is measured once here and never recomputed.
    pub fn new(
        host: H,
        header: H::Element,
        hero: Option<&H::Element>,
        offset: f64,
        fallback_height: f64,
    ) -> Self {
        let hero_height = hero.map_or(fallback_height, |hero| host.offset_height(hero));
        Self {
            host,
            header,
            threshold: hero_height - offset,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn is_scrolled(&self) -> bool {
        self.host.has_class(&self.header, SCROLLED_CLASS)
    }

    pub fn on_scroll(&self) {
        if self.host.scroll_y() > self.threshold {
            self.host.add_class(&self.header, SCROLLED_CLASS);
        } else {
            self.host.remove_class(&self.header, SCROLLED_CLASS);
        }
    }

    // TODO: re-measure the hero here once layout shifts after resize are handled.
    pub fn on_resize(&self) {
        log::debug!("Resize ignored, header threshold stays at {}", self.threshold);
    }

    pub fn bind(&self) -> Result<(), PageError> {
        let shader = self.clone();
        self.host.listen(
            ListenTarget::Window,
            EventKind::Scroll,
            Box::new(move |_: &mut DomEvent| shader.on_scroll()),
        )?;
        let shader = self.clone();
        self.host.listen(
            ListenTarget::Window,
            EventKind::Resize,
            Box::new(move |_: &mut DomEvent| shader.on_resize()),
        )?;
        self.on_scroll();
        Ok(())
    }
}
