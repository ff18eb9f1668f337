//! Background music toggle.
//!
//! Mirrors one media element's play/pause state onto one button. Starting
//! playback is asynchronous on most hosts, so a play request hands back the
//! host's pending attempt; once it settles the host reports a
//! [`PlayOutcome`] through [`PlaybackToggle::settle`]. A refused start is an
//! ordinary outcome that only resyncs the button.

use serde::{Deserialize, Serialize};

use crate::config::MusicConfig;
use crate::events::Event;
use crate::toggle::{mirror, ToggleLabels, ToggleView};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    Playing,
    Paused,
}

/// How a play attempt settled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayOutcome {
    Started,
    Rejected { reason: String },
}

/// The media element being controlled.
pub trait MediaPlayer {
    /// Host handle for an in-flight play request.
    type Attempt;

    fn is_paused(&self) -> bool;

    fn play(&mut self) -> Self::Attempt;

    fn pause(&mut self);

    fn set_volume(&mut self, volume: f64);
}

/// Fires at most once.
#[derive(Debug, Clone)]
pub struct GestureLatch {
    armed: bool,
}

impl Default for GestureLatch {
    fn default() -> Self {
        Self { armed: true }
    }
}

impl GestureLatch {
    /// Returns `true` the first time only.
    pub fn fire(&mut self) -> bool {
        std::mem::replace(&mut self.armed, false)
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }
}

/// What a click on the toggle did.
#[derive(Debug)]
pub enum ClickOutcome<A> {
    /// Playback was requested; settle the attempt when it completes.
    PlayRequested(A),
    /// Playback was paused synchronously.
    Paused(Option<Event>),
}

#[derive(Debug)]
pub struct PlaybackToggle<M, V> {
    player: M,
    view: V,
    labels: ToggleLabels,
    gesture: GestureLatch,
    autoplay_on_load: bool,
    mirrored: Option<PlaybackState>,
}

impl<M: MediaPlayer, V: ToggleView> PlaybackToggle<M, V> {
    /// Bind `player` to `view`, apply the configured volume and mirror the
    /// current state.
    pub fn new(mut player: M, view: V, cfg: &MusicConfig) -> Self {
        player.set_volume(cfg.volume);
        let mut toggle = Self {
            player,
            view,
            labels: cfg.toggle_labels(),
            gesture: GestureLatch::default(),
            autoplay_on_load: cfg.autoplay_on_load,
            mirrored: None,
        };
        toggle.resync();
        toggle
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> PlaybackState {
        if self.player.is_paused() {
            PlaybackState::Paused
        } else {
            PlaybackState::Playing
        }
    }

    pub fn player(&self) -> &M {
        &self.player
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn gesture_pending(&self) -> bool {
        self.gesture.is_armed()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// The load-time start attempt, if enabled.
    pub fn start(&mut self) -> Option<M::Attempt> {
        if !self.autoplay_on_load || !self.player.is_paused() {
            return None;
        }
        Some(self.player.play())
    }

    pub fn click(&mut self) -> ClickOutcome<M::Attempt> {
        if self.player.is_paused() {
            ClickOutcome::PlayRequested(self.player.play())
        } else {
            self.player.pause();
            ClickOutcome::Paused(self.resync())
        }
    }

    /// First pointer or key interaction on the page. Requests playback
    /// once, and only if still paused.
    pub fn first_gesture(&mut self) -> Option<M::Attempt> {
        if !self.gesture.fire() {
            return None;
        }
        if !self.player.is_paused() {
            return None;
        }
        tracing::debug!("first gesture: attempting playback");
        Some(self.player.play())
    }

    /// Consume a settled play attempt.
    pub fn settle(&mut self, outcome: PlayOutcome) -> Option<Event> {
        let changed = self.resync();
        match outcome {
            PlayOutcome::Started => changed,
            PlayOutcome::Rejected { reason } => {
                tracing::debug!(%reason, "playback start refused");
                Some(Event::PlaybackStartFailed { reason })
            }
        }
    }

    /// Mirror the player's state onto the view. Returns an event when the
    /// mirrored state changed.
    pub fn resync(&mut self) -> Option<Event> {
        let state = self.state();
        mirror(&mut self.view, &self.labels, state == PlaybackState::Playing);
        if self.mirrored == Some(state) {
            return None;
        }
        let first = self.mirrored.is_none();
        self.mirrored = Some(state);
        if first {
            return None;
        }
        Some(Event::PlaybackChanged { state })
    }
}
