//! In-memory stand-ins for the page elements.

#![allow(dead_code)]

use std::collections::HashMap;

use chrono::{DateTime, TimeZone, Utc};
use lettergate_core::{Interaction, MarkupElement, OverlaySurface, TriggerFlags, TriggerView};

/// Instants in these tests are UTC wall times; triggers resolve their
/// unlock midnights in UTC too.
pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
}

/// Overlay plus template store.
#[derive(Debug, Default)]
pub struct FakeOverlay {
    pub templates: HashMap<String, String>,
    pub content: Vec<String>,
    pub visible: bool,
    pub scroll_locked: bool,
}

impl FakeOverlay {
    pub fn with_templates(refs: &[&str]) -> Self {
        Self {
            templates: refs
                .iter()
                .map(|r| (r.to_string(), format!("<p>{r}</p>")))
                .collect(),
            ..Self::default()
        }
    }
}

impl OverlaySurface for FakeOverlay {
    type Payload = String;

    fn resolve(&self, content_ref: &str) -> Option<String> {
        self.templates.get(content_ref).cloned()
    }

    fn clear_content(&mut self) {
        self.content.clear();
    }

    fn insert_content(&mut self, payload: &String) {
        self.content.push(payload.clone());
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn set_scroll_lock(&mut self, locked: bool) {
        self.scroll_locked = locked;
    }
}

/// Trigger element: class, attribute and ARIA flag tracked separately.
#[derive(Debug, Default, Clone)]
pub struct FakeTrigger {
    pub locked_class: bool,
    pub disabled_attr: bool,
    pub aria_disabled: bool,
    pub status: Option<String>,
}

impl FakeTrigger {
    pub fn flags(&self) -> TriggerFlags {
        TriggerFlags {
            native_disabled: self.disabled_attr,
            aria_disabled: self.aria_disabled,
            locked_class: self.locked_class,
        }
    }
}

impl TriggerView for FakeTrigger {
    fn set_locked(&mut self, locked: bool) {
        self.locked_class = locked;
        self.disabled_attr = locked;
        self.aria_disabled = locked;
    }

    fn set_status_text(&mut self, text: &str) {
        self.status = Some(text.to_string());
    }
}

pub fn activate(content_ref: &str, flags: TriggerFlags) -> Interaction {
    Interaction::Activate {
        content_ref: content_ref.to_string(),
        flags,
    }
}

/// A detached element carrying only attributes.
#[derive(Debug, Default, Clone)]
pub struct FakeElement {
    pub attributes: HashMap<String, String>,
}

impl FakeElement {
    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }
}

impl MarkupElement for FakeElement {
    fn closest(&self, _selector: &str) -> Option<Self> {
        Some(self.clone())
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.get(name).cloned()
    }

    fn has_class(&self, _class: &str) -> bool {
        false
    }
}
