//! A time zone with one forward daylight-saving shift, for tests.

use chrono::{
    DateTime, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone,
    Utc,
};

/// UTC-5 until `HOUR`:00 local on 2026-03-08, UTC-4 afterwards. The local
/// hour starting at the shift never occurs.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SpringForward<const HOUR: u32>;

impl<const HOUR: u32> SpringForward<HOUR> {
    fn standard() -> FixedOffset {
        FixedOffset::west_opt(5 * 3600).unwrap()
    }

    fn daylight() -> FixedOffset {
        FixedOffset::west_opt(4 * 3600).unwrap()
    }

    fn shift_local() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 8)
            .unwrap()
            .and_hms_opt(HOUR, 0, 0)
            .unwrap()
    }

    /// Wall time `h:00` on `y-m-d` in this zone.
    pub(crate) fn wall(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        let local = NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, 0, 0).unwrap();
        Self.from_local_datetime(&local).single().unwrap().with_timezone(&Utc)
    }
}

impl<const HOUR: u32> TimeZone for SpringForward<HOUR> {
    type Offset = FixedOffset;

    fn from_offset(_: &FixedOffset) -> Self {
        Self
    }

    fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<FixedOffset> {
        self.offset_from_local_datetime(&local.and_time(NaiveTime::MIN))
    }

    fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
        let shift = Self::shift_local();
        if *local < shift {
            LocalResult::Single(Self::standard())
        } else if *local < shift + TimeDelta::hours(1) {
            LocalResult::None
        } else {
            LocalResult::Single(Self::daylight())
        }
    }

    fn offset_from_utc_date(&self, utc: &NaiveDate) -> FixedOffset {
        self.offset_from_utc_datetime(&utc.and_time(NaiveTime::MIN))
    }

    fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
        if *utc < Self::shift_local() + TimeDelta::hours(5) {
            Self::standard()
        } else {
            Self::daylight()
        }
    }
}
