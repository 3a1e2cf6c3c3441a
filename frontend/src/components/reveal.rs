use crate::error::PageError;
use crate::host::{Host, Intersection, ObserverOptions};

pub const IN_VIEW_CLASS: &str = "in-view";

/// One-shot fade-in: the first intersecting notification marks the element
/// and stops observing it.
#[derive(Clone)]
pub struct Reveal<H: Host> {
    host: H,
}

impl<H: Host> Reveal<H> {
    pub fn new(host: H) -> Self {
        Self { host }
    }

    pub fn on_intersections(&self, batch: Vec<Intersection<H::Element>>) -> Vec<H::Element> {
        batch
            .into_iter()
            .filter(|entry| entry.is_intersecting)
            .map(|entry| {
                self.host.add_class(&entry.target, IN_VIEW_CLASS);
                entry.target
            })
            .collect()
    }

    pub fn observe(
        &self,
        options: ObserverOptions,
        targets: Vec<H::Element>,
    ) -> Result<(), PageError> {
        let reveal = self.clone();
        self.host.observe(
            options,
            targets,
            Box::new(move |batch: Vec<Intersection<H::Element>>| reveal.on_intersections(batch)),
        )
    }
}
