use std::fmt;

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

const SECS_PER_DAY: u64 = 86_400;
const SECS_PER_HOUR: u64 = 3_600;
const SECS_PER_MINUTE: u64 = 60;

/// Remaining time until an unlock, split into display units.
///
/// Rendered as `{days}d {hours}h {minutes}m {seconds}s`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    pub days: u64,
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl Countdown {
    /// Decompose a remaining duration in milliseconds.
    ///
    /// Floors to whole seconds; negative input clamps to zero.
    pub fn from_millis(remaining_ms: i64) -> Self {
        Self::from_secs(remaining_ms.max(0) as u64 / 1000)
    }

    pub fn from_delta(remaining: TimeDelta) -> Self {
        Self::from_millis(remaining.num_milliseconds())
    }

    pub fn from_secs(total: u64) -> Self {
        Self {
            days: total / SECS_PER_DAY,
            hours: ((total % SECS_PER_DAY) / SECS_PER_HOUR) as u8,
            minutes: ((total % SECS_PER_HOUR) / SECS_PER_MINUTE) as u8,
            seconds: (total % SECS_PER_MINUTE) as u8,
        }
    }

    pub fn total_secs(&self) -> u64 {
        self.days * SECS_PER_DAY
            + u64::from(self.hours) * SECS_PER_HOUR
            + u64::from(self.minutes) * SECS_PER_MINUTE
            + u64::from(self.seconds)
    }

    pub fn is_zero(&self) -> bool {
        self.total_secs() == 0
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}d {}h {}m {}s",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}
