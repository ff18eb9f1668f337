use serde::{Deserialize, Serialize};

use crate::events::{CloseReason, Event};

/// Host side of the shared overlay: the modal container, its content
/// insertion point, the document's payload store and the body scroll-lock.
pub trait OverlaySurface {
    /// A clonable content payload (a template fragment in the browser).
    type Payload;

    /// Look up the payload for a content reference.
    fn resolve(&self, content_ref: &str) -> Option<Self::Payload>;

    /// Remove everything from the content insertion point.
    fn clear_content(&mut self);

    /// Insert a copy of `payload`. The payload itself is never mutated.
    fn insert_content(&mut self, payload: &Self::Payload);

    fn set_visible(&mut self, visible: bool);

    fn set_scroll_lock(&mut self, locked: bool);
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum OverlayState {
    Hidden,
    Visible { content_ref: String },
}

/// The single shared overlay. Shows at most one payload; opening another
/// replaces the current one.
#[derive(Debug)]
pub struct Overlay<S> {
    surface: S,
    state: OverlayState,
}

impl<S: OverlaySurface> Overlay<S> {
    pub fn new(surface: S) -> Self {
        Self {
            surface,
            state: OverlayState::Hidden,
        }
    }

    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    pub fn is_visible(&self) -> bool {
        matches!(self.state, OverlayState::Visible { .. })
    }

    pub fn current(&self) -> Option<&str> {
        match &self.state {
            OverlayState::Visible { content_ref } => Some(content_ref),
            OverlayState::Hidden => None,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Show the payload for `content_ref`. Unknown references are a no-op.
    pub fn open(&mut self, content_ref: &str) -> Option<Event> {
        let payload = self.surface.resolve(content_ref)?;

        self.surface.clear_content();
        self.surface.insert_content(&payload);
        self.surface.set_visible(true);
        self.surface.set_scroll_lock(true);

        let previous = std::mem::replace(
            &mut self.state,
            OverlayState::Visible {
                content_ref: content_ref.to_string(),
            },
        );
        let replaced = match previous {
            OverlayState::Visible { content_ref } => Some(content_ref),
            OverlayState::Hidden => None,
        };
        Some(Event::OverlayOpened {
            content_ref: content_ref.to_string(),
            replaced,
        })
    }

    /// Hide the overlay, empty it and release the scroll-lock.
    ///
    /// The surface is reset even when already hidden; an event is only
    /// produced when something was showing.
    pub fn close(&mut self, reason: CloseReason) -> Option<Event> {
        self.surface.set_visible(false);
        self.surface.clear_content();
        self.surface.set_scroll_lock(false);

        match std::mem::replace(&mut self.state, OverlayState::Hidden) {
            OverlayState::Visible { content_ref } => Some(Event::OverlayClosed {
                content_ref: Some(content_ref),
                reason,
            }),
            OverlayState::Hidden => None,
        }
    }
}
