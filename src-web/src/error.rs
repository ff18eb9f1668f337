use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

/// Failures while wiring a controller to the page.
///
/// None of these reach the visitor: the bootstrap logs them and leaves the
/// affected controller inactive.
#[derive(Error, Debug)]
pub enum BindError {
    #[error("window is unavailable")]
    NoWindow,

    #[error("document is unavailable")]
    NoDocument,

    #[error("document body is unavailable")]
    NoBody,

    #[error("invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },
}

impl From<BindError> for JsValue {
    fn from(err: BindError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Best-effort readable text for a thrown JS value.
pub(crate) fn describe(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return format!("{}: {}", String::from(err.name()), String::from(err.message()));
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
