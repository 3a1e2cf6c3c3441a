//! Capability surface the page controller is written against.
//!
//! Everything the landing page needs from the browser goes through [`Host`]:
//! element lookup, class and attribute mutation, listeners, intersection
//! observers, timers and the handful of platform signals (reduced motion,
//! connection hints). `web` backs it with `web-sys` on wasm32, `fake` is an
//! in-memory double used by the test suite.

#[cfg(any(test, feature = "testing"))]
pub mod fake;
#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::error::PageError;

pub type EventHandler = Box<dyn FnMut(&mut DomEvent)>;
/// Receives one batch of intersection entries and returns the targets to stop
/// observing.
pub type IntersectionHandler<E> = Box<dyn FnMut(Vec<Intersection<E>>) -> Vec<E>>;
pub type PlaybackHandler = Box<dyn FnOnce(PlaybackOutcome)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Click,
    Submit,
    KeyDown,
    Scroll,
    Resize,
    DomContentLoaded,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Click => "click",
            EventKind::Submit => "submit",
            EventKind::KeyDown => "keydown",
            EventKind::Scroll => "scroll",
            EventKind::Resize => "resize",
            EventKind::DomContentLoaded => "DOMContentLoaded",
        }
    }

    /// Passive listeners never delay scrolling.
    pub fn is_passive(self) -> bool {
        matches!(self, EventKind::Scroll)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ListenTarget<E> {
    Window,
    Document,
    Element(E),
}

/// Host-neutral view of a dispatched event.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DomEvent {
    key: Option<String>,
    composing: bool,
    default_prevented: bool,
}

impl DomEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            ..Self::default()
        }
    }

    /// A key press that belongs to an IME composition still in progress.
    pub fn composing_key(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            composing: true,
            ..Self::default()
        }
    }

    pub fn is_composing(&self) -> bool {
        self.composing
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    pub threshold: f64,
    pub root_margin: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Intersection<E> {
    pub target: E,
    pub is_intersecting: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Display {
    Block,
    None,
}

impl Display {
    pub fn as_css(self) -> &'static str {
        match self {
            Display::Block => "block",
            Display::None => "none",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionHints {
    pub save_data: bool,
    pub effective_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackOutcome {
    Playing,
    Rejected(String),
}

/// Whether `play()` handed back something to wait on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayAttempt {
    Deferred,
    Immediate,
}

pub trait Host: Clone + 'static {
    type Element: Clone + PartialEq + std::fmt::Debug + 'static;

    fn element_by_id(&self, id: &str) -> Option<Self::Element>;
    fn query_all(&self, selector: &str) -> Vec<Self::Element>;
    fn query_within(&self, parent: &Self::Element, selector: &str) -> Option<Self::Element>;

    fn add_class(&self, el: &Self::Element, class: &str);
    fn remove_class(&self, el: &Self::Element, class: &str);
    fn has_class(&self, el: &Self::Element, class: &str) -> bool;
    /// Flips `class` and reports whether it is now present.
    fn toggle_class(&self, el: &Self::Element, class: &str) -> bool {
        if self.has_class(el, class) {
            self.remove_class(el, class);
            false
        } else {
            self.add_class(el, class);
            true
        }
    }

    fn attribute(&self, el: &Self::Element, name: &str) -> Option<String>;
    fn set_attribute(&self, el: &Self::Element, name: &str, value: &str);
    fn set_display(&self, el: &Self::Element, display: Display);
    fn input_value(&self, el: &Self::Element) -> String;
    fn focus(&self, el: &Self::Element);
    fn offset_height(&self, el: &Self::Element) -> f64;

    fn scroll_y(&self) -> f64;
    fn document_loading(&self) -> bool;
    fn prefers_reduced_motion(&self) -> bool;
    /// `None` when the platform does not expose connection metadata.
    fn connection(&self) -> Option<ConnectionHints>;

    fn alert(&self, message: &str);
    fn navigate(&self, path: &str);
    fn append_style(&self, css: &str) -> Result<(), PageError>;

    fn listen(
        &self,
        target: ListenTarget<Self::Element>,
        kind: EventKind,
        handler: EventHandler,
    ) -> Result<(), PageError>;

    /// Errors with [`PageError::Unsupported`] when the platform has no
    /// intersection observer.
    fn observe(
        &self,
        options: ObserverOptions,
        targets: Vec<Self::Element>,
        handler: IntersectionHandler<Self::Element>,
    ) -> Result<(), PageError>;

    fn set_timeout(&self, millis: u32, callback: Box<dyn FnOnce()>);

    /// Starts playback. `on_settled` runs once the deferred result settles;
    /// with [`PlayAttempt::Immediate`] it is dropped without being called.
    fn play_video(&self, video: &Self::Element, on_settled: PlaybackHandler) -> PlayAttempt;
}
