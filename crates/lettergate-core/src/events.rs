use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::playback::PlaybackState;

/// Why the overlay was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseReason {
    /// A close control inside the overlay was clicked.
    CloseControl,
    /// The cancellation key was pressed.
    CancelKey,
}

/// Every observable state change produces an Event.
/// The web layer logs them; the CLI prints them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    LetterLocked {
        content_ref: String,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    LetterUnlocked {
        content_ref: String,
        at: DateTime<Utc>,
    },
    OverlayOpened {
        content_ref: String,
        /// Content that was showing before, if the open replaced it.
        replaced: Option<String>,
    },
    OverlayClosed {
        content_ref: Option<String>,
        reason: CloseReason,
    },
    PlaybackChanged {
        state: PlaybackState,
    },
    /// The platform refused to start playback; the toggle was resynced.
    PlaybackStartFailed {
        reason: String,
    },
    FullscreenChanged {
        active: bool,
    },
    PageLoaded {
        scrolled: bool,
    },
}
