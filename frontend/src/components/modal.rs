use crate::config::ModalSelectors;
use crate::error::PageError;
use crate::host::{DomEvent, EventKind, Host, ListenTarget};

const OPEN_CLASS: &str = "open";

/// Login overlay. Every closing path funnels into [`LoginModal::close`].
#[derive(Clone)]
pub struct LoginModal<H: Host> {
    host: H,
    root: H::Element,
    close_button: Option<H::Element>,
    backdrop: Option<H::Element>,
    form: Option<H::Element>,
    first_input: Option<H::Element>,
}

impl<H: Host> LoginModal<H> {
    pub fn locate(host: H, root: H::Element, selectors: &ModalSelectors) -> Self {
        let find = |selector: &str| host.query_within(&root, selector);
        let close_button = find(selectors.close);
        let backdrop = find(selectors.backdrop);
        let form = find(selectors.form);
        let first_input = find(selectors.first_input);
        Self {
            host,
            root,
            close_button,
            backdrop,
            form,
            first_input,
        }
    }

    pub fn is_open(&self) -> bool {
        self.host.has_class(&self.root, OPEN_CLASS)
    }

    pub fn open(&self) {
        self.host.add_class(&self.root, OPEN_CLASS);
        self.host.set_attribute(&self.root, "aria-hidden", "false");
        if let Some(input) = &self.first_input {
            self.host.focus(input);
        }
    }

    pub fn close(&self) {
        self.host.remove_class(&self.root, OPEN_CLASS);
        self.host.set_attribute(&self.root, "aria-hidden", "true");
    }

    pub fn on_key(&self, event: &DomEvent) {
        if event.key() == Some("Escape") && self.is_open() {
            self.close();
        }
    }

    /// Demo sign-in: nothing is sent anywhere.
    pub fn on_submit(&self, event: &mut DomEvent) {
        event.prevent_default();
        self.host.alert("Signed in (demo)");
        self.close();
    }

    pub fn bind(&self) -> Result<(), PageError> {
        for trigger in [&self.close_button, &self.backdrop].into_iter().flatten() {
            let modal = self.clone();
            self.host.listen(
                ListenTarget::Element(trigger.clone()),
                EventKind::Click,
                Box::new(move |_: &mut DomEvent| modal.close()),
            )?;
        }
        if let Some(form) = &self.form {
            let modal = self.clone();
            self.host.listen(
                ListenTarget::Element(form.clone()),
                EventKind::Submit,
                Box::new(move |event: &mut DomEvent| modal.on_submit(event)),
            )?;
        }
        let modal = self.clone();
        self.host.listen(
            ListenTarget::Document,
            EventKind::KeyDown,
            Box::new(move |event: &mut DomEvent| modal.on_key(event)),
        )?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileAction {
    OpenedModal,
    Navigated(String),
}

/// The header's user button: opens the modal when the page has one,
/// otherwise leaves for the standalone login page.
#[derive(Clone)]
pub struct ProfileEntry<H: Host> {
    host: H,
    button: H::Element,
    modal: Option<LoginModal<H>>,
    login_path: &'static str,
}

impl<H: Host> ProfileEntry<H> {
    pub fn new(
        host: H,
        button: H::Element,
        modal: Option<LoginModal<H>>,
        login_path: &'static str,
    ) -> Self {
        Self {
            host,
            button,
            modal,
            login_path,
        }
    }

    pub fn on_click(&self) -> ProfileAction {
        match &self.modal {
            Some(modal) => {
                modal.open();
                ProfileAction::OpenedModal
            }
            None => {
                self.host.navigate(self.login_path);
                ProfileAction::Navigated(self.login_path.to_string())
            }
        }
    }

    pub fn bind(&self) -> Result<(), PageError> {
        let entry = self.clone();
        self.host.listen(
            ListenTarget::Element(self.button.clone()),
            EventKind::Click,
            Box::new(move |_: &mut DomEvent| {
                entry.on_click();
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::fake::{FakeHost, NodeId};
    use pretty_assertions::assert_eq;

    struct Page {
        host: FakeHost,
        modal: LoginModal<FakeHost>,
        button: NodeId,
        close: NodeId,
        backdrop: NodeId,
        form: NodeId,
        email: NodeId,
    }

    fn page() -> Page {
        let host = FakeHost::new();
        let button = host.create_with_id("button", "user-button");
        let root = host.create_with_id("div", "login-modal");
        let backdrop = host.create_in(root, "div");
        host.add_class(&backdrop, "modal-backdrop");
        let close = host.create_in(root, "button");
        host.add_class(&close, "modal-close");
        let form = host.create_in(root, "form");
        let email = host.create_in(form, "input");
        host.create_in(form, "input");

        let modal = LoginModal::locate(host.clone(), root, &ModalSelectors::default());
        modal.bind().unwrap();
        ProfileEntry::new(host.clone(), button, Some(modal.clone()), "/login.html")
            .bind()
            .unwrap();
        Page {
            host,
            modal,
            button,
            close,
            backdrop,
            form,
            email,
        }
    }

    #[test]
    fn opening_focuses_first_input() {
        let p = page();
        p.host.click(p.button);
        assert!(p.modal.is_open());
        assert_eq!(p.host.focused(), Some(p.email));
        assert!(p.host.navigations().is_empty());
    }

    #[test]
    fn every_close_path_closes() {
        let p = page();
        for trigger in [Some(p.close), Some(p.backdrop), None] {
            p.host.click(p.button);
            assert!(p.modal.is_open());
            match trigger {
                Some(node) => {
                    p.host.click(node);
                }
                None => {
                    p.host.key_down(ListenTarget::Document, "Escape");
                }
            }
            assert!(!p.modal.is_open());
            assert_eq!(
                p.host.attribute(&p.modal.root, "aria-hidden").as_deref(),
                Some("true")
            );
        }
    }

    #[test]
    fn close_is_idempotent() {
        let p = page();
        p.modal.close();
        p.modal.close();
        p.host.key_down(ListenTarget::Document, "Escape");
        assert!(!p.modal.is_open());
    }

    #[test]
    fn other_keys_leave_modal_open() {
        let p = page();
        p.modal.open();
        p.host.key_down(ListenTarget::Document, "Enter");
        assert!(p.modal.is_open());
    }

    #[test]
    fn demo_submit_acknowledges_and_closes() {
        let p = page();
        p.modal.open();
        let event = p.host.submit(p.form);
        assert!(event.default_prevented());
        assert_eq!(p.host.alerts(), vec!["Signed in (demo)".to_string()]);
        assert!(!p.modal.is_open());
    }

    #[test]
    fn without_modal_falls_back_to_login_page() {
        let host = FakeHost::new();
        let button = host.create_with_id("button", "user-button");
        let entry = ProfileEntry::new(host.clone(), button, None, "/login.html");
        assert_eq!(
            entry.on_click(),
            ProfileAction::Navigated("/login.html".to_string())
        );
        assert_eq!(host.navigations(), vec!["/login.html".to_string()]);
    }
}
