//! Letter manifests.
//!
//! A manifest lists the letters a page declares, the same data the markup
//! carries in its trigger attributes, so a schedule can be previewed
//! without a browser:
//!
//! ```toml
//! [[letter]]
//! template = "letter-valentine"
//! unlock_date = "2026-02-14"
//! title = "Valentine's Day"
//! ```

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::ScheduleError;
use crate::gate::{evaluate, parse_unlock_instant, Gate, GateLabels};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterEntry {
    pub template: String,
    #[serde(default)]
    pub unlock_date: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

impl LetterEntry {
    /// Unlock instant in `zone`, if the letter carries a usable date.
    pub fn unlock_at<Tz: TimeZone>(&self, zone: &Tz) -> Option<DateTime<Utc>> {
        self.unlock_date
            .as_deref()
            .and_then(|raw| parse_unlock_instant(raw, zone))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default, rename = "letter")]
    pub letters: Vec<LetterEntry>,
}

/// Evaluated state of one letter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LetterStatus {
    pub template: String,
    pub title: Option<String>,
    pub unlock_date: Option<String>,
    pub unlock_at: Option<DateTime<Utc>>,
    /// `None` when the letter is not gated by time.
    pub gate: Option<Gate>,
    /// What the page would show in the trigger's status slot.
    pub status_text: Option<String>,
}

impl LetterStatus {
    pub fn is_gated(&self) -> bool {
        self.gate.is_some()
    }

    pub fn is_locked(&self) -> bool {
        self.gate.is_some_and(|g| g.is_locked())
    }
}

impl Manifest {
    /// Parse and validate a manifest.
    ///
    /// Malformed unlock dates are not errors: such letters are simply
    /// never gated.
    pub fn from_toml_str(content: &str) -> Result<Self, ScheduleError> {
        let manifest: Manifest = toml::from_str(content)?;
        manifest.validate()?;
        Ok(manifest)
    }

    pub fn validate(&self) -> Result<(), ScheduleError> {
        let mut seen = HashSet::new();
        for (index, letter) in self.letters.iter().enumerate() {
            if letter.template.trim().is_empty() {
                return Err(ScheduleError::EmptyTemplate { index });
            }
            if !seen.insert(letter.template.as_str()) {
                return Err(ScheduleError::DuplicateTemplate(letter.template.clone()));
            }
        }
        Ok(())
    }

    /// Evaluate every letter against `now`, with unlock midnights taken in
    /// `zone`.
    pub fn evaluate<Tz: TimeZone>(
        &self,
        now: DateTime<Utc>,
        zone: &Tz,
        labels: &GateLabels,
    ) -> Vec<LetterStatus> {
        self.letters
            .iter()
            .map(|letter| {
                let unlock_at = letter.unlock_at(zone);
                let gate = unlock_at.map(|at| evaluate(at, now));
                LetterStatus {
                    template: letter.template.clone(),
                    title: letter.title.clone(),
                    unlock_date: letter.unlock_date.clone(),
                    unlock_at,
                    gate,
                    status_text: gate.as_ref().map(|g| labels.status_text(g)),
                }
            })
            .collect()
    }

    /// The gated letter that unlocks soonest after `now`, if any.
    pub fn next_unlock<Tz: TimeZone>(
        &self,
        now: DateTime<Utc>,
        zone: &Tz,
    ) -> Option<(&LetterEntry, DateTime<Utc>)> {
        self.letters
            .iter()
            .filter_map(|l| {
                let at = l.unlock_at(zone)?;
                (at > now).then_some((l, at))
            })
            .min_by_key(|(_, at)| *at)
    }
}
