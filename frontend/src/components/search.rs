use crate::error::PageError;
use crate::host::{DomEvent, EventKind, Host, ListenTarget};

pub const ERROR_CLASS: &str = "input-error";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Rejected,
    Searched(String),
}

#[derive(Clone)]
pub struct SearchBox<H: Host> {
    host: H,
    form: H::Element,
    input: H::Element,
    error_flash_ms: u32,
}

impl<H: Host> SearchBox<H> {
    pub fn new(host: H, form: H::Element, input: H::Element, error_flash_ms: u32) -> Self {
        Self {
            host,
            form,
            input,
            error_flash_ms,
        }
    }

    /// Shared by form submission and Enter in the field.
    pub fn submit(&self) -> SearchOutcome {
        let query = self.host.input_value(&self.input).trim().to_string();
        if query.is_empty() {
            self.flash_error();
            self.host.focus(&self.input);
            return SearchOutcome::Rejected;
        }
        log::info!("Search submitted: {}", query);
        self.host.alert(&format!("Searching for: {}", query));
        SearchOutcome::Searched(query)
    }

    // Each rejection schedules its own cleanup; an earlier timer may clear a
    // later flash early.
    fn flash_error(&self) {
        self.host.add_class(&self.input, ERROR_CLASS);
        let host = self.host.clone();
        let input = self.input.clone();
        self.host.set_timeout(
            self.error_flash_ms,
            Box::new(move || host.remove_class(&input, ERROR_CLASS)),
        );
    }

    pub fn bind(&self) -> Result<(), PageError> {
        let search = self.clone();
        self.host.listen(
            ListenTarget::Element(self.form.clone()),
            EventKind::Submit,
            Box::new(move |event: &mut DomEvent| {
                event.prevent_default();
                search.submit();
            }),
        )?;
        let search = self.clone();
        self.host.listen(
            ListenTarget::Element(self.input.clone()),
            EventKind::KeyDown,
            Box::new(move |event: &mut DomEvent| {
                // Enter that commits an IME candidate is not a search.
                if event.key() == Some("Enter") && !event.is_composing() {
                    // Suppress the implicit form submit so the search runs once.
                    event.prevent_default();
                    search.submit();
                }
            }),
        )?;
        Ok(())
    }
}
