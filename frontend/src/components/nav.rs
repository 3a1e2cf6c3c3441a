use crate::error::PageError;
use crate::host::{DomEvent, EventKind, Host, ListenTarget};

const OPEN_CLASS: &str = "open";

/// Mobile navigation: hamburger toggles the menu, any nav link closes it.
#[derive(Clone)]
pub struct NavToggle<H: Host> {
    host: H,
    toggle: H::Element,
    menu: H::Element,
    links: Vec<H::Element>,
}

impl<H: Host> NavToggle<H> {
    pub fn new(host: H, toggle: H::Element, menu: H::Element, links: Vec<H::Element>) -> Self {
        Self {
            host,
            toggle,
            menu,
            links,
        }
    }

    pub fn is_open(&self) -> bool {
        self.host.has_class(&self.menu, OPEN_CLASS)
    }

    pub fn on_toggle_click(&self) {
        let open = self.host.toggle_class(&self.toggle, OPEN_CLASS);
        self.apply(open);
    }

    /// One-way reset; a link click never opens the menu.
    pub fn on_link_click(&self) {
        if self.is_open() {
            self.host.remove_class(&self.toggle, OPEN_CLASS);
            self.apply(false);
        }
    }

    fn apply(&self, open: bool) {
        if open {
            self.host.add_class(&self.menu, OPEN_CLASS);
        } else {
            self.host.remove_class(&self.menu, OPEN_CLASS);
        }
        self.host
            .set_attribute(&self.toggle, "aria-expanded", if open { "true" } else { "false" });
    }

    pub fn bind(&self) -> Result<(), PageError> {
        let nav = self.clone();
        self.host.listen(
            ListenTarget::Element(self.toggle.clone()),
            EventKind::Click,
            Box::new(move |_: &mut DomEvent| nav.on_toggle_click()),
        )?;
        for link in &self.links {
            let nav = self.clone();
            self.host.listen(
                ListenTarget::Element(link.clone()),
                EventKind::Click,
                Box::new(move |_: &mut DomEvent| nav.on_link_click()),
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::fake::{FakeHost, NodeId};

    fn setup() -> (FakeHost, NavToggle<FakeHost>, NodeId, Vec<NodeId>) {
        let host = FakeHost::new();
        let toggle = host.create_with_id("button", "hamburger");
        let menu = host.create_with_id("nav", "nav-menu");
        let links = vec![host.create_in(menu, "a"), host.create_in(menu, "a")];
        let nav = NavToggle::new(host.clone(), toggle, menu, links.clone());
        nav.bind().unwrap();
        (host, nav, toggle, links)
    }

    #[test]
    fn open_state_follows_click_parity() {
        let (host, nav, toggle, _) = setup();
        for clicks in 1..=7 {
            host.click(toggle);
            assert_eq!(nav.is_open(), clicks % 2 == 1, "after {} clicks", clicks);
            let expanded = host.attribute(&toggle, "aria-expanded");
            assert_eq!(expanded.as_deref(), Some(if nav.is_open() { "true" } else { "false" }));
            assert_eq!(host.has_class(&toggle, "open"), nav.is_open());
        }
    }

    #[test]
    fn link_click_always_closes() {
        let (host, nav, toggle, links) = setup();
        host.click(toggle);
        assert!(nav.is_open());
        host.click(links[1]);
        assert!(!nav.is_open());
        assert!(!host.has_class(&toggle, "open"));
        assert_eq!(host.attribute(&toggle, "aria-expanded").as_deref(), Some("false"));

        host.click(links[0]);
        assert!(!nav.is_open());
    }
}
