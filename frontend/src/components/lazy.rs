use crate::error::PageError;
use crate::host::{Host, Intersection, ObserverOptions};

const DEFERRED_SRC: &str = "data-src";
const LOADED_MARKER: &str = "data-loaded";

/// Swaps a card's deferred `data-src` into its image shortly before the card
/// scrolls into view.
#[derive(Clone)]
pub struct LazyImages<H: Host> {
    host: H,
}

impl<H: Host> LazyImages<H> {
    pub fn new(host: H) -> Self {
        Self { host }
    }

    /// Loads the card's image unless already marked. Returns whether a
    /// source was assigned.
    pub fn load(&self, card: &H::Element) -> bool {
        let Some(src) = self.host.attribute(card, DEFERRED_SRC) else {
            return false;
        };
        let Some(img) = self.host.query_within(card, "img") else {
            return false;
        };
        if self.host.attribute(&img, LOADED_MARKER).as_deref() == Some("true") {
            return false;
        }
        self.host.set_attribute(&img, "src", &src);
        self.host.set_attribute(&img, LOADED_MARKER, "true");
        log::debug!("Lazy-loaded card image {}", src);
        true
    }

    pub fn on_intersections(&self, batch: Vec<Intersection<H::Element>>) -> Vec<H::Element> {
        batch
            .into_iter()
            .filter(|entry| entry.is_intersecting)
            .map(|entry| {
                self.load(&entry.target);
                entry.target
            })
            .collect()
    }

    pub fn observe(
        &self,
        options: ObserverOptions,
        cards: Vec<H::Element>,
    ) -> Result<(), PageError> {
        let lazy = self.clone();
        self.host.observe(
            options,
            cards,
            Box::new(move |batch: Vec<Intersection<H::Element>>| lazy.on_intersections(batch)),
        )
    }
}
