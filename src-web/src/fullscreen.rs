//! DOM binding for the fullscreen toggle.
//!
//! The standard Fullscreen API and its `webkit`-prefixed twin are looked up
//! reflectively so older WebKit builds work without extra bindings.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use js_sys::{Function, Promise, Reflect};
use lettergate_core::{DisplayModeBinding, DisplayModeToggle, FullscreenConfig, FullscreenHost};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, Element, HtmlElement};

use crate::dom::{element_by_id, ToggleButton};
use crate::error::{describe, BindError};

pub struct DomFullscreen {
    document: Document,
    root: Element,
}

impl DomFullscreen {
    fn new(document: &Document) -> Result<Self, BindError> {
        let root = document.document_element().ok_or(BindError::NoDocument)?;
        Ok(Self {
            document: document.clone(),
            root,
        })
    }

    fn request_fn(&self) -> Option<Function> {
        method(&self.root, &["requestFullscreen", "webkitRequestFullscreen"])
    }
}

impl FullscreenHost for DomFullscreen {
    fn is_supported(&self) -> bool {
        if self.request_fn().is_none() {
            return false;
        }
        // Browsers without the flag are assumed to allow it.
        ["fullscreenEnabled", "webkitFullscreenEnabled"]
            .iter()
            .find_map(|name| property(&self.document, name).as_bool())
            .unwrap_or(true)
    }

    fn is_fullscreen(&self) -> bool {
        ["fullscreenElement", "webkitFullscreenElement"]
            .iter()
            .any(|name| {
                let value = property(&self.document, name);
                !value.is_null() && !value.is_undefined()
            })
    }

    fn enter(&mut self) {
        if let Some(request) = self.request_fn() {
            call(&request, &self.root, "enter fullscreen");
        }
    }

    fn exit(&mut self) {
        if let Some(exit) = method(&self.document, &["exitFullscreen", "webkitExitFullscreen"]) {
            call(&exit, &self.document, "exit fullscreen");
        }
    }
}

fn property(target: &JsValue, name: &str) -> JsValue {
    Reflect::get(target, &JsValue::from_str(name)).unwrap_or(JsValue::UNDEFINED)
}

fn method(target: &JsValue, names: &[&str]) -> Option<Function> {
    names
        .iter()
        .find_map(|name| property(target, name).dyn_into::<Function>().ok())
}

/// Invoke a fullscreen request and log a refusal, whether thrown or
/// delivered through the returned promise.
fn call(function: &Function, this: &JsValue, what: &'static str) {
    match function.call0(this) {
        Ok(result) => {
            if let Ok(promise) = result.dyn_into::<Promise>() {
                wasm_bindgen_futures::spawn_local(async move {
                    if let Err(e) = JsFuture::from(promise).await {
                        tracing::debug!(error = %describe(&e), "{what} refused");
                    }
                });
            }
        }
        Err(e) => tracing::debug!(error = %describe(&e), "{what} failed"),
    }
}

type Toggle = DisplayModeToggle<DomFullscreen, ToggleButton>;

pub struct FullscreenBinding {
    _toggle: Option<Rc<RefCell<Toggle>>>,
    _listeners: Vec<EventListener>,
}

/// Wire the fullscreen toggle. `Ok(None)` when the control is missing.
pub fn bind(
    document: &Document,
    cfg: &FullscreenConfig,
) -> Result<Option<FullscreenBinding>, BindError> {
    let Some(button) = element_by_id::<HtmlElement>(document, &cfg.toggle_id) else {
        tracing::info!(id = %cfg.toggle_id, "no fullscreen toggle, fullscreen inactive");
        return Ok(None);
    };
    let host = DomFullscreen::new(document)?;

    let toggle = match Toggle::bind(host, ToggleButton(button.clone()), cfg) {
        DisplayModeBinding::Active(toggle) => Rc::new(RefCell::new(toggle)),
        DisplayModeBinding::Unsupported(_) => {
            return Ok(Some(FullscreenBinding {
                _toggle: None,
                _listeners: Vec::new(),
            }));
        }
    };

    let mut listeners = Vec::with_capacity(3);
    listeners.push({
        let toggle = toggle.clone();
        EventListener::new(&button, "click", move |_| toggle.borrow_mut().click())
    });
    for kind in ["fullscreenchange", "webkitfullscreenchange"] {
        let toggle = toggle.clone();
        listeners.push(EventListener::new(document, kind, move |_| {
            if let Some(event) = toggle.borrow_mut().resync() {
                tracing::debug!(?event, "fullscreen");
            }
        }));
    }

    Ok(Some(FullscreenBinding {
        _toggle: Some(toggle),
        _listeners: listeners,
    }))
}
