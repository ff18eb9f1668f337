//! DOM binding for the reveal controller.

use chrono::Local;
use gloo::events::EventListener;
use lettergate_core::{
    DispatchTable, GatedTrigger, LettersConfig, OverlaySurface, RevealController, RevealRuntime,
    SystemClock, TriggerView,
};
use wasm_bindgen::JsCast;
use web_sys::{Document, DocumentFragment, Element, HtmlElement, HtmlTemplateElement, KeyboardEvent};

use crate::dom::{bool_str, element_by_id, query_all, remove_attr, set_attr, DomElement};
use crate::error::{describe, BindError};
use crate::scheduler::{IntervalHandle, IntervalScheduler};

/// The modal, its content container and the document's `<template>` store.
pub struct DomOverlay {
    document: Document,
    modal: Element,
    content: Element,
    body: HtmlElement,
}

impl OverlaySurface for DomOverlay {
    type Payload = DocumentFragment;

    fn resolve(&self, content_ref: &str) -> Option<DocumentFragment> {
        let template: HtmlTemplateElement = element_by_id(&self.document, content_ref)?;
        Some(template.content())
    }

    fn clear_content(&mut self) {
        self.content.set_inner_html("");
    }

    fn insert_content(&mut self, payload: &DocumentFragment) {
        let copy = match payload.clone_node_with_deep(true) {
            Ok(copy) => copy,
            Err(e) => {
                tracing::warn!(error = %describe(&e), "failed to clone letter template");
                return;
            }
        };
        if let Err(e) = self.content.append_child(&copy) {
            tracing::warn!(error = %describe(&e), "failed to insert letter content");
        }
    }

    fn set_visible(&mut self, visible: bool) {
        set_attr(&self.modal, "aria-hidden", bool_str(!visible));
    }

    fn set_scroll_lock(&mut self, locked: bool) {
        let style = self.body.style();
        let result = if locked {
            style.set_property("overflow", "hidden")
        } else {
            style.remove_property("overflow").map(|_| ())
        };
        if let Err(e) = result {
            tracing::warn!(locked, error = %describe(&e), "failed to update scroll lock");
        }
    }
}

/// A trigger element and its optional countdown sub-element.
pub struct DomTrigger {
    element: Element,
    status: Option<Element>,
    locked_class: String,
}

impl DomTrigger {
    fn new(element: Element, cfg: &LettersConfig) -> Self {
        let status = element.query_selector(&cfg.status_selector).ok().flatten();
        Self {
            element,
            status,
            locked_class: cfg.locked_class.clone(),
        }
    }
}

impl TriggerView for DomTrigger {
    fn set_locked(&mut self, locked: bool) {
        if locked {
            set_attr(&self.element, "disabled", "true");
        } else {
            remove_attr(&self.element, "disabled");
        }
        set_attr(&self.element, "aria-disabled", bool_str(locked));

        let classes = self.element.class_list();
        let result = if locked {
            classes.add_1(&self.locked_class)
        } else {
            classes.remove_1(&self.locked_class)
        };
        if let Err(e) = result {
            tracing::warn!(error = %describe(&e), "failed to toggle locked class");
        }
    }

    fn set_status_text(&mut self, text: &str) {
        if let Some(status) = &self.status {
            status.set_text_content(Some(text));
        }
    }
}

type Runtime = RevealRuntime<DomOverlay, DomTrigger, IntervalHandle>;

/// A running reveal controller and the listeners feeding it.
pub struct LettersBinding {
    runtime: Runtime,
    _listeners: Vec<EventListener>,
}

impl LettersBinding {
    /// Stop the countdown tick. Clicks and the cancel key keep working.
    pub fn stop_ticking(&mut self) {
        self.runtime.dispose();
    }

    /// Stop the tick and detach every listener.
    pub fn dispose(mut self) {
        self.stop_ticking();
    }
}

/// Wire the reveal controller to the page. `Ok(None)` when the modal or
/// its content container is missing.
pub fn bind(document: &Document, cfg: &LettersConfig) -> Result<Option<LettersBinding>, BindError> {
    let Some(modal) = document.get_element_by_id(&cfg.overlay_id) else {
        tracing::info!(id = %cfg.overlay_id, "no letter overlay on page, letters inactive");
        return Ok(None);
    };
    let Some(content) = document.get_element_by_id(&cfg.content_id) else {
        tracing::info!(id = %cfg.content_id, "no letter content container, letters inactive");
        return Ok(None);
    };
    let body = document.body().ok_or(BindError::NoBody)?;

    // Unlock dates turn over at the visitor's local midnight.
    let triggers = query_all(document, &cfg.gated_selector)?
        .into_iter()
        .map(|element| {
            let markup = DomElement(element.clone());
            GatedTrigger::from_markup(&markup, cfg, &Local, DomTrigger::new(element, cfg))
        })
        .collect::<Vec<_>>();

    let surface = DomOverlay {
        document: document.clone(),
        modal,
        content,
        body,
    };
    let controller = RevealController::new(surface, triggers, cfg);
    let runtime = Runtime::start(controller, SystemClock, &IntervalScheduler, cfg);

    let table = DispatchTable::from_config(cfg);
    let on_click = {
        let controller = runtime.controller().clone();
        EventListener::new(document, "click", move |event| {
            let Some(target) = DomElement::from_event(event) else {
                return;
            };
            let Some(interaction) = table.interaction(&target) else {
                return;
            };
            if let Some(event) = controller.borrow_mut().handle(interaction) {
                tracing::debug!(?event, "overlay");
            }
        })
    };

    let window = web_sys::window().ok_or(BindError::NoWindow)?;
    let on_key = {
        let controller = runtime.controller().clone();
        EventListener::new(&window, "keydown", move |event| {
            let Some(key) = event.dyn_ref::<KeyboardEvent>().map(KeyboardEvent::key) else {
                return;
            };
            if let Some(event) = controller.borrow_mut().on_key(&key) {
                tracing::debug!(?event, "overlay");
            }
        })
    };

    Ok(Some(LettersBinding {
        runtime,
        _listeners: vec![on_click, on_key],
    }))
}
