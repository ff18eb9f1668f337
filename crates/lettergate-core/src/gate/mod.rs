//! Time gating for letters.
//!
//! A trigger with a parsed unlock date is locked until midnight of that
//! date in the viewer's zone and unlocked from then on. Triggers without a
//! usable date are never gated; [`GatedTrigger::evaluate`] leaves them
//! untouched.

mod countdown;
mod date;
#[cfg(test)]
pub(crate) mod test_zone;

pub use countdown::Countdown;
pub use date::{parse_unlock_date, parse_unlock_instant, unlock_instant};

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::config::LettersConfig;
use crate::events::Event;
use crate::reveal::MarkupElement;

/// Result of evaluating one unlock instant against the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum Gate {
    Locked { remaining: Countdown },
    Unlocked,
}

impl Gate {
    pub fn is_locked(&self) -> bool {
        matches!(self, Gate::Locked { .. })
    }
}

/// Compare an unlock instant with the current time.
pub fn evaluate(unlock_at: DateTime<Utc>, now: DateTime<Utc>) -> Gate {
    if now >= unlock_at {
        Gate::Unlocked
    } else {
        Gate::Locked {
            remaining: Countdown::from_delta(unlock_at - now),
        }
    }
}

/// Status line texts written into a trigger's countdown slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateLabels {
    pub unlocked: String,
    pub locked_prefix: String,
}

impl Default for GateLabels {
    fn default() -> Self {
        Self {
            unlocked: "Unlocked".into(),
            locked_prefix: "Unlocks in ".into(),
        }
    }
}

impl GateLabels {
    pub fn status_text(&self, gate: &Gate) -> String {
        match gate {
            Gate::Unlocked => self.unlocked.clone(),
            Gate::Locked { remaining } => format!("{}{}", self.locked_prefix, remaining),
        }
    }
}

/// Visual side of a trigger, as written by the tick.
pub trait TriggerView {
    /// Toggle the locked marker, the disabled attribute and the ARIA
    /// disabled state together.
    fn set_locked(&mut self, locked: bool);

    /// Write the status line. Views without a status slot ignore it.
    fn set_status_text(&mut self, text: &str);
}

/// One trigger as seen by the tick: a content reference, an optional
/// unlock instant and the view it writes to.
///
/// The content reference is only used to label events; it is empty for
/// triggers whose markup names no template.
#[derive(Debug)]
pub struct GatedTrigger<V> {
    content_ref: String,
    unlock_at: Option<DateTime<Utc>>,
    view: V,
    last_locked: Option<bool>,
}

impl<V: TriggerView> GatedTrigger<V> {
    /// Build from raw markup values, resolving the unlock date's midnight
    /// in `zone`. A missing or malformed unlock date yields an ungated
    /// trigger.
    pub fn new<Tz: TimeZone>(
        content_ref: impl Into<String>,
        raw_unlock_date: Option<&str>,
        zone: &Tz,
        view: V,
    ) -> Self {
        Self {
            content_ref: content_ref.into(),
            unlock_at: raw_unlock_date.and_then(|raw| parse_unlock_instant(raw, zone)),
            view,
            last_locked: None,
        }
    }

    /// Build from an element matched by the gated selector. An element
    /// that names no template is still gated, with an empty content ref;
    /// whether a click opens anything is decided at dispatch.
    pub fn from_markup<E: MarkupElement, Tz: TimeZone>(
        element: &E,
        cfg: &LettersConfig,
        zone: &Tz,
        view: V,
    ) -> Self {
        let content_ref = element.attribute(&cfg.template_attr).unwrap_or_default();
        let raw_unlock_date = element.attribute(&cfg.unlock_attr);
        Self::new(content_ref, raw_unlock_date.as_deref(), zone, view)
    }

    pub fn content_ref(&self) -> &str {
        &self.content_ref
    }

    pub fn unlock_at(&self) -> Option<DateTime<Utc>> {
        self.unlock_at
    }

    pub fn is_gated(&self) -> bool {
        self.unlock_at.is_some()
    }

    /// Locked state as of the last evaluation. `None` for ungated triggers
    /// or before the first tick.
    pub fn is_locked(&self) -> Option<bool> {
        self.last_locked
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Re-evaluate against `now` and write the result to the view.
    ///
    /// Returns an event when the locked state changed (including the very
    /// first evaluation).
    pub fn evaluate(&mut self, now: DateTime<Utc>, labels: &GateLabels) -> Option<Event> {
        let unlock_at = self.unlock_at?;
        let gate = evaluate(unlock_at, now);
        let locked = gate.is_locked();

        self.view.set_locked(locked);
        self.view.set_status_text(&labels.status_text(&gate));

        if self.last_locked == Some(locked) {
            return None;
        }
        self.last_locked = Some(locked);
        Some(match gate {
            Gate::Locked { remaining } => Event::LetterLocked {
                content_ref: self.content_ref.clone(),
                remaining_secs: remaining.total_secs(),
                at: now,
            },
            Gate::Unlocked => Event::LetterUnlocked {
                content_ref: self.content_ref.clone(),
                at: now,
            },
        })
    }
}
