//! `window.history` adapter.
//!
//! Single-page hosts navigate with `history.pushState` and
//! `history.replaceState`, which fire no event. Both functions are wrapped
//! on the live `History` object so every call is followed by a notify, and
//! `popstate` covers back/forward. Detaching puts the original functions
//! back and removes the listener.

use std::rc::Rc;

use js_sys::{Function, Reflect};
use log::warn;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::Window;

use super::{Detach, NavigationHost};
use crate::models::Address;

const WRAPPED_METHODS: [&str; 2] = ["pushState", "replaceState"];

type Wrapper = Closure<dyn FnMut(JsValue, JsValue, JsValue) -> Result<JsValue, JsValue>>;

/// [`NavigationHost`] for the page's own `window`.
pub struct BrowserHistory {
    window: Window,
}

impl BrowserHistory {
    /// Returns `None` outside a browsing context.
    pub fn new() -> Option<Self> {
        web_sys::window().map(|window| Self { window })
    }
}

impl NavigationHost for BrowserHistory {
    fn current(&self) -> Address {
        let location = self.window.location();
        Address::new(
            location.pathname().unwrap_or_default(),
            location.search().unwrap_or_default(),
        )
    }

    fn install(&self, notify: Rc<dyn Fn()>) -> Detach {
        let history: JsValue = match self.window.history() {
            Ok(history) => history.into(),
            Err(_) => {
                warn!("history API unavailable; address changes will not be observed");
                return Detach::noop();
            }
        };

        let mut wrapped: Vec<(&'static str, Function, Wrapper)> = Vec::new();
        for name in WRAPPED_METHODS {
            let original = match Reflect::get(&history, &JsValue::from_str(name))
                .ok()
                .and_then(|f| f.dyn_into::<Function>().ok())
            {
                Some(original) => original,
                None => {
                    warn!("history.{} is not a function; skipping", name);
                    continue;
                }
            };

            let target = history.clone();
            let inner = original.clone();
            let notify = Rc::clone(&notify);
            let wrapper: Wrapper = Closure::new(move |state: JsValue, title: JsValue, url: JsValue| {
                let result = inner.call3(&target, &state, &title, &url);
                notify();
                result
            });

            if Reflect::set(&history, &JsValue::from_str(name), wrapper.as_ref()).is_err() {
                warn!("failed to wrap history.{}", name);
                continue;
            }
            wrapped.push((name, original, wrapper));
        }

        let on_popstate = {
            let notify = Rc::clone(&notify);
            Closure::<dyn FnMut()>::new(move || notify())
        };
        let listening = self
            .window
            .add_event_listener_with_callback("popstate", on_popstate.as_ref().unchecked_ref())
            .is_ok();

        let window = self.window.clone();
        Detach::new(move || {
            for (name, original, wrapper) in wrapped {
                let _ = Reflect::set(&history, &JsValue::from_str(name), &original);
                drop(wrapper);
            }
            if listening {
                let _ = window.remove_event_listener_with_callback(
                    "popstate",
                    on_popstate.as_ref().unchecked_ref(),
                );
            }
            drop(on_popstate);
        })
    }
}
