//! In-memory [`Host`] used by the test suite.
//!
//! Holds a flat element arena with parent links, records alerts, navigations
//! and injected styles, and lets tests drive events, intersection batches,
//! timers and video playback by hand. Events do not bubble: a click is
//! delivered to listeners registered on exactly that target.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use super::{
    ConnectionHints, Display, DomEvent, EventHandler, EventKind, Host, Intersection,
    IntersectionHandler, ListenTarget, ObserverOptions, PlayAttempt, PlaybackHandler,
    PlaybackOutcome,
};
use crate::error::PageError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Default)]
struct Node {
    tag: String,
    id: Option<String>,
    parent: Option<NodeId>,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    display: Option<Display>,
    value: String,
    offset_height: f64,
}

impl Node {
    fn matches(&self, selector: &str) -> bool {
        if let Some(class) = selector.strip_prefix('.') {
            self.classes.iter().any(|c| c == class)
        } else if let Some(id) = selector.strip_prefix('#') {
            self.id.as_deref() == Some(id)
        } else {
            self.tag.eq_ignore_ascii_case(selector)
        }
    }
}

struct Listener {
    target: ListenTarget<NodeId>,
    kind: EventKind,
    passive: bool,
    handler: Rc<RefCell<EventHandler>>,
}

struct Observer {
    options: ObserverOptions,
    watching: Vec<NodeId>,
    handler: Rc<RefCell<IntersectionHandler<NodeId>>>,
}

struct Timer {
    due: u64,
    callback: Box<dyn FnOnce()>,
}

/// How the fake `<video>` answers `play()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackBehaviour {
    Resolve,
    Reject(String),
    /// Legacy browsers return `undefined` instead of a promise.
    NoPromise,
}

struct State {
    nodes: RefCell<Vec<Node>>,
    listeners: RefCell<Vec<Listener>>,
    observers: RefCell<Vec<Observer>>,
    observers_supported: Cell<bool>,
    timers: RefCell<Vec<Timer>>,
    now: Cell<u64>,
    scroll_y: Cell<f64>,
    loading: Cell<bool>,
    reduced_motion: Cell<bool>,
    connection: RefCell<Option<ConnectionHints>>,
    playback: RefCell<PlaybackBehaviour>,
    pending_playback: RefCell<Vec<PlaybackHandler>>,
    play_calls: Cell<usize>,
    focused: Cell<Option<NodeId>>,
    alerts: RefCell<Vec<String>>,
    navigations: RefCell<Vec<String>>,
    styles: RefCell<Vec<String>>,
}

#[derive(Clone)]
pub struct FakeHost(Rc<State>);

impl Default for FakeHost {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeHost {
    pub fn new() -> Self {
        FakeHost(Rc::new(State {
            nodes: RefCell::new(Vec::new()),
            listeners: RefCell::new(Vec::new()),
            observers: RefCell::new(Vec::new()),
            observers_supported: Cell::new(true),
            timers: RefCell::new(Vec::new()),
            now: Cell::new(0),
            scroll_y: Cell::new(0.0),
            loading: Cell::new(false),
            reduced_motion: Cell::new(false),
            connection: RefCell::new(None),
            playback: RefCell::new(PlaybackBehaviour::Resolve),
            pending_playback: RefCell::new(Vec::new()),
            play_calls: Cell::new(0),
            focused: Cell::new(None),
            alerts: RefCell::new(Vec::new()),
            navigations: RefCell::new(Vec::new()),
            styles: RefCell::new(Vec::new()),
        }))
    }

    // ----- building the document -----

    fn push(&self, node: Node) -> NodeId {
        let mut nodes = self.0.nodes.borrow_mut();
        nodes.push(node);
        NodeId(nodes.len() - 1)
    }

    pub fn create(&self, tag: &str) -> NodeId {
        self.push(Node {
            tag: tag.to_string(),
            ..Node::default()
        })
    }

    pub fn create_with_id(&self, tag: &str, id: &str) -> NodeId {
        self.push(Node {
            tag: tag.to_string(),
            id: Some(id.to_string()),
            ..Node::default()
        })
    }

    pub fn create_in(&self, parent: NodeId, tag: &str) -> NodeId {
        self.push(Node {
            tag: tag.to_string(),
            parent: Some(parent),
            ..Node::default()
        })
    }

    pub fn set_offset_height(&self, node: NodeId, height: f64) {
        self.0.nodes.borrow_mut()[node.0].offset_height = height;
    }

    pub fn set_value(&self, node: NodeId, value: &str) {
        self.0.nodes.borrow_mut()[node.0].value = value.to_string();
    }

    pub fn set_loading(&self, loading: bool) {
        self.0.loading.set(loading);
    }

    pub fn set_reduced_motion(&self, reduced: bool) {
        self.0.reduced_motion.set(reduced);
    }

    pub fn set_connection(&self, hints: Option<ConnectionHints>) {
        *self.0.connection.borrow_mut() = hints;
    }

    pub fn set_observers_supported(&self, supported: bool) {
        self.0.observers_supported.set(supported);
    }

    pub fn set_playback(&self, behaviour: PlaybackBehaviour) {
        *self.0.playback.borrow_mut() = behaviour;
    }

    // ----- driving the page -----

    /// Delivers `event` to every listener on `target` for `kind`.
    pub fn dispatch(
        &self,
        target: ListenTarget<NodeId>,
        kind: EventKind,
        mut event: DomEvent,
    ) -> DomEvent {
        let handlers: Vec<_> = self
            .0
            .listeners
            .borrow()
            .iter()
            .filter(|l| l.kind == kind && l.target == target)
            .map(|l| l.handler.clone())
            .collect();
        for handler in handlers {
            (handler.borrow_mut())(&mut event);
        }
        event
    }

    pub fn click(&self, node: NodeId) -> DomEvent {
        self.dispatch(ListenTarget::Element(node), EventKind::Click, DomEvent::new())
    }

    pub fn submit(&self, form: NodeId) -> DomEvent {
        self.dispatch(ListenTarget::Element(form), EventKind::Submit, DomEvent::new())
    }

    pub fn key_down(&self, target: ListenTarget<NodeId>, key: &str) -> DomEvent {
        self.dispatch(target, EventKind::KeyDown, DomEvent::with_key(key))
    }

    pub fn scroll_to(&self, y: f64) {
        self.0.scroll_y.set(y);
        self.dispatch(ListenTarget::Window, EventKind::Scroll, DomEvent::new());
    }

    pub fn resize(&self) {
        self.dispatch(ListenTarget::Window, EventKind::Resize, DomEvent::new());
    }

    pub fn finish_loading(&self) {
        self.0.loading.set(false);
        self.dispatch(
            ListenTarget::Document,
            EventKind::DomContentLoaded,
            DomEvent::new(),
        );
    }

    /// Sends one intersecting batch containing `nodes` (duplicates kept) to
    /// each observer that still watches them.
    pub fn intersect(&self, nodes: &[NodeId]) {
        self.notify(nodes, true);
    }

    pub fn notify(&self, nodes: &[NodeId], is_intersecting: bool) {
        let count = self.0.observers.borrow().len();
        for index in 0..count {
            let (entries, handler) = {
                let observers = self.0.observers.borrow();
                let observer = &observers[index];
                let entries: Vec<_> = nodes
                    .iter()
                    .filter(|n| observer.watching.contains(n))
                    .map(|n| Intersection {
                        target: *n,
                        is_intersecting,
                    })
                    .collect();
                (entries, observer.handler.clone())
            };
            if entries.is_empty() {
                continue;
            }
            let released = (handler.borrow_mut())(entries);
            self.0.observers.borrow_mut()[index]
                .watching
                .retain(|n| !released.contains(n));
        }
    }

    /// Moves the clock forward, firing due timers in order.
    pub fn advance(&self, millis: u64) {
        let now = self.0.now.get() + millis;
        self.0.now.set(now);
        loop {
            let next = {
                let mut timers = self.0.timers.borrow_mut();
                let due = timers
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due <= now)
                    .min_by_key(|(_, t)| t.due)
                    .map(|(i, _)| i);
                due.map(|i| timers.remove(i))
            };
            match next {
                Some(timer) => (timer.callback)(),
                None => break,
            }
        }
    }

    /// Settles every outstanding `play()` promise per the configured
    /// behaviour.
    pub fn settle_playback(&self) {
        let pending: Vec<_> = self.0.pending_playback.borrow_mut().drain(..).collect();
        let outcome = match &*self.0.playback.borrow() {
            PlaybackBehaviour::Reject(reason) => PlaybackOutcome::Rejected(reason.clone()),
            _ => PlaybackOutcome::Playing,
        };
        for handler in pending {
            handler(outcome.clone());
        }
    }

    // ----- inspection -----

    pub fn display(&self, node: NodeId) -> Option<Display> {
        self.0.nodes.borrow()[node.0].display
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.0.focused.get()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.0.alerts.borrow().clone()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.0.navigations.borrow().clone()
    }

    pub fn styles(&self) -> Vec<String> {
        self.0.styles.borrow().clone()
    }

    pub fn play_calls(&self) -> usize {
        self.0.play_calls.get()
    }

    pub fn pending_timers(&self) -> usize {
        self.0.timers.borrow().len()
    }

    pub fn is_observed(&self, node: NodeId) -> bool {
        self.0
            .observers
            .borrow()
            .iter()
            .any(|o| o.watching.contains(&node))
    }

    pub fn observer_options(&self) -> Vec<ObserverOptions> {
        self.0.observers.borrow().iter().map(|o| o.options).collect()
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.0
            .listeners
            .borrow()
            .iter()
            .filter(|l| l.kind == kind)
            .count()
    }

    pub fn is_passive(&self, kind: EventKind) -> bool {
        self.0
            .listeners
            .borrow()
            .iter()
            .filter(|l| l.kind == kind)
            .all(|l| l.passive)
    }

    fn is_descendant(nodes: &[Node], node: NodeId, ancestor: NodeId) -> bool {
        let mut current = nodes[node.0].parent;
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = nodes[parent.0].parent;
        }
        false
    }
}

fn selector_list(selector: &str) -> impl Iterator<Item = &str> {
    selector.split(',').map(str::trim).filter(|s| !s.is_empty())
}

impl Host for FakeHost {
    type Element = NodeId;

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.0
            .nodes
            .borrow()
            .iter()
            .position(|n| n.id.as_deref() == Some(id))
            .map(NodeId)
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        self.0
            .nodes
            .borrow()
            .iter()
            .enumerate()
            .filter(|(_, n)| selector_list(selector).any(|s| n.matches(s)))
            .map(|(i, _)| NodeId(i))
            .collect()
    }

    fn query_within(&self, parent: &NodeId, selector: &str) -> Option<NodeId> {
        let nodes = self.0.nodes.borrow();
        nodes
            .iter()
            .enumerate()
            .find(|(i, n)| {
                selector_list(selector).any(|s| n.matches(s))
                    && Self::is_descendant(&nodes, NodeId(*i), *parent)
            })
            .map(|(i, _)| NodeId(i))
    }

    fn add_class(&self, el: &NodeId, class: &str) {
        let mut nodes = self.0.nodes.borrow_mut();
        let classes = &mut nodes[el.0].classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
    }

    fn remove_class(&self, el: &NodeId, class: &str) {
        self.0.nodes.borrow_mut()[el.0].classes.retain(|c| c != class);
    }

    fn has_class(&self, el: &NodeId, class: &str) -> bool {
        self.0.nodes.borrow()[el.0].classes.iter().any(|c| c == class)
    }

    fn attribute(&self, el: &NodeId, name: &str) -> Option<String> {
        self.0.nodes.borrow()[el.0].attributes.get(name).cloned()
    }

    fn set_attribute(&self, el: &NodeId, name: &str, value: &str) {
        self.0.nodes.borrow_mut()[el.0]
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    fn set_display(&self, el: &NodeId, display: Display) {
        self.0.nodes.borrow_mut()[el.0].display = Some(display);
    }

    fn input_value(&self, el: &NodeId) -> String {
        self.0.nodes.borrow()[el.0].value.clone()
    }

    fn focus(&self, el: &NodeId) {
        self.0.focused.set(Some(*el));
    }

    fn offset_height(&self, el: &NodeId) -> f64 {
        self.0.nodes.borrow()[el.0].offset_height
    }

    fn scroll_y(&self) -> f64 {
        self.0.scroll_y.get()
    }

    fn document_loading(&self) -> bool {
        self.0.loading.get()
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.0.reduced_motion.get()
    }

    fn connection(&self) -> Option<ConnectionHints> {
        self.0.connection.borrow().clone()
    }

    fn alert(&self, message: &str) {
        self.0.alerts.borrow_mut().push(message.to_string());
    }

    fn navigate(&self, path: &str) {
        self.0.navigations.borrow_mut().push(path.to_string());
    }

    fn append_style(&self, css: &str) -> Result<(), PageError> {
        self.0.styles.borrow_mut().push(css.to_string());
        Ok(())
    }

    fn listen(
        &self,
        target: ListenTarget<NodeId>,
        kind: EventKind,
        handler: EventHandler,
    ) -> Result<(), PageError> {
        self.0.listeners.borrow_mut().push(Listener {
            target,
            kind,
            passive: kind.is_passive(),
            handler: Rc::new(RefCell::new(handler)),
        });
        Ok(())
    }

    fn observe(
        &self,
        options: ObserverOptions,
        targets: Vec<NodeId>,
        handler: IntersectionHandler<NodeId>,
    ) -> Result<(), PageError> {
        if !self.0.observers_supported.get() {
            return Err(PageError::Unsupported("IntersectionObserver"));
        }
        self.0.observers.borrow_mut().push(Observer {
            options,
            watching: targets,
            handler: Rc::new(RefCell::new(handler)),
        });
        Ok(())
    }

    fn set_timeout(&self, millis: u32, callback: Box<dyn FnOnce()>) {
        let due = self.0.now.get() + u64::from(millis);
        self.0.timers.borrow_mut().push(Timer { due, callback });
    }

    fn play_video(&self, _video: &NodeId, on_settled: PlaybackHandler) -> PlayAttempt {
        self.0.play_calls.set(self.0.play_calls.get() + 1);
        if *self.0.playback.borrow() == PlaybackBehaviour::NoPromise {
            return PlayAttempt::Immediate;
        }
        self.0.pending_playback.borrow_mut().push(on_settled);
        PlayAttempt::Deferred
    }
}
