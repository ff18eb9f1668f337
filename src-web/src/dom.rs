//! `web_sys` implementations of the core element traits.

use lettergate_core::{ClassList, MarkupElement, ToggleView};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement};

use crate::error::{describe, BindError};

/// A document element seen through the click dispatcher.
#[derive(Debug, Clone)]
pub struct DomElement(pub Element);

impl DomElement {
    /// The element a DOM event was dispatched to.
    pub fn from_event(event: &Event) -> Option<Self> {
        event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .map(DomElement)
    }
}

impl MarkupElement for DomElement {
    fn closest(&self, selector: &str) -> Option<Self> {
        match self.0.closest(selector) {
            Ok(found) => found.map(DomElement),
            Err(e) => {
                tracing::warn!(selector, error = %describe(&e), "closest() failed");
                None
            }
        }
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn has_attribute(&self, name: &str) -> bool {
        self.0.has_attribute(name)
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }
}

/// Class list of the document body.
pub struct BodyClasses(pub HtmlElement);

impl ClassList for BodyClasses {
    fn add_class(&mut self, class: &str) {
        if let Err(e) = self.0.class_list().add_1(class) {
            tracing::warn!(class, error = %describe(&e), "failed to add body class");
        }
    }

    fn remove_class(&mut self, class: &str) {
        if let Err(e) = self.0.class_list().remove_1(class) {
            tracing::warn!(class, error = %describe(&e), "failed to remove body class");
        }
    }
}

/// A button mirrored through `aria-pressed` and its text.
pub struct ToggleButton(pub HtmlElement);

impl ToggleView for ToggleButton {
    fn set_pressed(&mut self, pressed: bool) {
        set_attr(&self.0, "aria-pressed", bool_str(pressed));
    }

    fn set_label(&mut self, label: &str) {
        self.0.set_text_content(Some(label));
    }

    fn set_disabled(&mut self, disabled: bool) {
        if disabled {
            set_attr(&self.0, "disabled", "true");
        } else {
            remove_attr(&self.0, "disabled");
        }
    }
}

pub(crate) fn bool_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

pub(crate) fn set_attr(element: &Element, name: &str, value: &str) {
    if let Err(e) = element.set_attribute(name, value) {
        tracing::warn!(name, error = %describe(&e), "set_attribute failed");
    }
}

pub(crate) fn remove_attr(element: &Element, name: &str) {
    if let Err(e) = element.remove_attribute(name) {
        tracing::warn!(name, error = %describe(&e), "remove_attribute failed");
    }
}

/// Look up an element by id and cast it. `None` when absent or of a
/// different type.
pub(crate) fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<T>().ok())
}

/// Every element matching `selector`, in document order.
pub(crate) fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>, BindError> {
    let list = document
        .query_selector_all(selector)
        .map_err(|e| BindError::Selector {
            selector: selector.to_string(),
            message: describe(&e),
        })?;
    Ok((0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}
