//! `web-sys` backed [`Host`].

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::js_sys;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, EventTarget, HtmlElement,
    HtmlInputElement, HtmlMediaElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, KeyboardEvent, Window,
};

use super::{
    ConnectionHints, Display, DomEvent, EventHandler, EventKind, Host, Intersection,
    IntersectionHandler, ListenTarget, ObserverOptions, PlayAttempt, PlaybackHandler,
    PlaybackOutcome,
};
use crate::error::PageError;

#[derive(Clone)]
pub struct WebHost {
    window: Window,
    document: Document,
}

impl WebHost {
    pub fn new() -> Result<Self, PageError> {
        let window = web_sys::window().ok_or(PageError::Unsupported("window"))?;
        let document = window.document().ok_or(PageError::Unsupported("document"))?;
        Ok(Self { window, document })
    }

    fn event_target(&self, target: &ListenTarget<Element>) -> EventTarget {
        match target {
            ListenTarget::Window => self.window.clone().into(),
            ListenTarget::Document => self.document.clone().into(),
            ListenTarget::Element(el) => el.clone().into(),
        }
    }

    fn navigator_connection(&self) -> Option<JsValue> {
        let navigator = self.window.navigator();
        js_sys::Reflect::get(&navigator, &"connection".into())
            .ok()
            .filter(|c| !c.is_undefined() && !c.is_null())
    }
}

fn list_to_elements(list: web_sys::NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

impl Host for WebHost {
    type Element = Element;

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        match self.document.query_selector_all(selector) {
            Ok(list) => list_to_elements(list),
            Err(e) => {
                log::warn!("Invalid selector {}: {:?}", selector, e);
                Vec::new()
            }
        }
    }

    fn query_within(&self, parent: &Element, selector: &str) -> Option<Element> {
        parent.query_selector(selector).ok().flatten()
    }

    fn add_class(&self, el: &Element, class: &str) {
        let _ = el.class_list().add_1(class);
    }

    fn remove_class(&self, el: &Element, class: &str) {
        let _ = el.class_list().remove_1(class);
    }

    fn has_class(&self, el: &Element, class: &str) -> bool {
        el.class_list().contains(class)
    }

    fn toggle_class(&self, el: &Element, class: &str) -> bool {
        el.class_list().toggle(class).unwrap_or(false)
    }

    fn attribute(&self, el: &Element, name: &str) -> Option<String> {
        el.get_attribute(name)
    }

    fn set_attribute(&self, el: &Element, name: &str, value: &str) {
        if let Err(e) = el.set_attribute(name, value) {
            log::warn!("Failed to set {} on element: {:?}", name, e);
        }
    }

    fn set_display(&self, el: &Element, display: Display) {
        if let Some(html) = el.dyn_ref::<HtmlElement>() {
            let _ = html.style().set_property("display", display.as_css());
        }
    }

    fn input_value(&self, el: &Element) -> String {
        el.dyn_ref::<HtmlInputElement>()
            .map(|input| input.value())
            .unwrap_or_default()
    }

    fn focus(&self, el: &Element) {
        if let Some(html) = el.dyn_ref::<HtmlElement>() {
            let _ = html.focus();
        }
    }

    fn offset_height(&self, el: &Element) -> f64 {
        el.dyn_ref::<HtmlElement>()
            .map(|html| f64::from(html.offset_height()))
            .unwrap_or(0.0)
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn document_loading(&self) -> bool {
        self.document.ready_state() == "loading"
    }

    fn prefers_reduced_motion(&self) -> bool {
        self.window
            .match_media("(prefers-reduced-motion: reduce)")
            .ok()
            .flatten()
            .map_or(false, |mq| mq.matches())
    }

    fn connection(&self) -> Option<ConnectionHints> {
        let connection = self.navigator_connection()?;
        let save_data = js_sys::Reflect::get(&connection, &"saveData".into())
            .ok()
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        let effective_type = js_sys::Reflect::get(&connection, &"effectiveType".into())
            .ok()
            .and_then(|v| v.as_string());
        Some(ConnectionHints {
            save_data,
            effective_type,
        })
    }

    fn alert(&self, message: &str) {
        let _ = self.window.alert_with_message(message);
    }

    fn navigate(&self, path: &str) {
        if let Err(e) = self.window.location().set_href(path) {
            log::error!("Failed to navigate to {}: {:?}", path, e);
        }
    }

    fn append_style(&self, css: &str) -> Result<(), PageError> {
        let style = self.document.create_element("style")?;
        style.set_text_content(Some(css));
        let head = self.document.head().ok_or(PageError::Unsupported("document.head"))?;
        head.append_child(&style)?;
        Ok(())
    }

    fn listen(
        &self,
        target: ListenTarget<Element>,
        kind: EventKind,
        mut handler: EventHandler,
    ) -> Result<(), PageError> {
        let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let mut dom_event = match event.dyn_ref::<KeyboardEvent>() {
                Some(key_event) if key_event.is_composing() => {
                    DomEvent::composing_key(key_event.key())
                }
                Some(key_event) => DomEvent::with_key(key_event.key()),
                None => DomEvent::new(),
            };
            handler(&mut dom_event);
            if dom_event.default_prevented() {
                event.prevent_default();
            }
        });
        let event_target = self.event_target(&target);
        if kind.is_passive() {
            let options = AddEventListenerOptions::new();
            options.set_passive(true);
            event_target.add_event_listener_with_callback_and_add_event_listener_options(
                kind.as_str(),
                callback.as_ref().unchecked_ref(),
                &options,
            )?;
        } else {
            event_target
                .add_event_listener_with_callback(kind.as_str(), callback.as_ref().unchecked_ref())?;
        }
        // Page-lifetime listener.
        callback.forget();
        Ok(())
    }

    fn observe(
        &self,
        options: ObserverOptions,
        targets: Vec<Element>,
        mut handler: IntersectionHandler<Element>,
    ) -> Result<(), PageError> {
        let supported = js_sys::Reflect::has(&self.window, &"IntersectionObserver".into())
            .unwrap_or(false);
        if !supported {
            return Err(PageError::Unsupported("IntersectionObserver"));
        }

        let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                let batch: Vec<_> = entries
                    .iter()
                    .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                    .map(|entry| Intersection {
                        target: entry.target(),
                        is_intersecting: entry.is_intersecting(),
                    })
                    .collect();
                for target in handler(batch) {
                    observer.unobserve(&target);
                }
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(options.root_margin);
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
        callback.forget();

        for target in &targets {
            observer.observe(target);
        }
        Ok(())
    }

    fn set_timeout(&self, millis: u32, callback: Box<dyn FnOnce()>) {
        Timeout::new(millis, callback).forget();
    }

    fn play_video(&self, video: &Element, on_settled: PlaybackHandler) -> PlayAttempt {
        let Some(media) = video.dyn_ref::<HtmlMediaElement>() else {
            on_settled(PlaybackOutcome::Rejected("not a media element".to_string()));
            return PlayAttempt::Deferred;
        };
        let promise = match media.play() {
            Ok(promise) => promise,
            Err(e) => {
                on_settled(PlaybackOutcome::Rejected(format!("{:?}", e)));
                return PlayAttempt::Deferred;
            }
        };
        let as_value: &JsValue = promise.as_ref();
        if as_value.is_undefined() {
            return PlayAttempt::Immediate;
        }
        spawn_local(async move {
            let outcome = match JsFuture::from(promise).await {
                Ok(_) => PlaybackOutcome::Playing,
                Err(e) => PlaybackOutcome::Rejected(format!("{:?}", e)),
            };
            on_settled(outcome);
        });
        PlayAttempt::Deferred
    }
}
