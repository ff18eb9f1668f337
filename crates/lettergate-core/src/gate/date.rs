//! Unlock date parsing.
//!
//! Only the exact `YYYY-MM-DD` shape is accepted. Anything else means the
//! trigger carries no unlock date and is never gated by time.
//!
//! A date unlocks at midnight in the viewer's time zone. That midnight is
//! resolved to an absolute instant here, once.

use chrono::{DateTime, Days, LocalResult, Months, NaiveDate, NaiveTime, TimeDelta, TimeZone, Utc};

/// Parse an unlock date attribute value.
///
/// Returns `None` for missing, malformed or wrongly sized values. Month and
/// day fields that overflow the calendar (e.g. `2024-02-30`, `2024-13-01`)
/// are normalized forward the same way calendar arithmetic does, so
/// `2024-02-30` becomes `2024-03-01`.
pub fn parse_unlock_date(value: &str) -> Option<NaiveDate> {
    let bytes = value.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !digits_ok {
        return None;
    }

    let year: i32 = value[0..4].parse().ok()?;
    let month: u32 = value[5..7].parse().ok()?;
    let day: u32 = value[8..10].parse().ok()?;
    normalize(year, month, day)
}

/// The instant midnight of `date` occurs in `zone`.
///
/// A midnight repeated by a backward shift resolves to its first
/// occurrence. A midnight skipped by a forward shift resolves to the first
/// wall time after the gap. `None` only when the date is out of range.
pub fn unlock_instant<Tz: TimeZone>(date: NaiveDate, zone: &Tz) -> Option<DateTime<Utc>> {
    let midnight = date.and_time(NaiveTime::MIN);
    let local = match zone.from_local_datetime(&midnight) {
        LocalResult::Single(at) | LocalResult::Ambiguous(at, _) => at,
        LocalResult::None => zone
            .from_local_datetime(&(midnight + TimeDelta::hours(1)))
            .earliest()?,
    };
    Some(local.with_timezone(&Utc))
}

/// Parse and resolve in one step.
pub fn parse_unlock_instant<Tz: TimeZone>(value: &str, zone: &Tz) -> Option<DateTime<Utc>> {
    parse_unlock_date(value).and_then(|date| unlock_instant(date, zone))
}

fn normalize(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let jan_first = NaiveDate::from_ymd_opt(year, 1, 1)?;
    // Month 00 rolls back into December of the previous year.
    let month_start = if month == 0 {
        jan_first.checked_sub_months(Months::new(1))?
    } else {
        jan_first.checked_add_months(Months::new(month - 1))?
    };
    if day == 0 {
        month_start.checked_sub_days(Days::new(1))
    } else {
        month_start.checked_add_days(Days::new(u64::from(day) - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::test_zone::SpringForward;
    use chrono::FixedOffset;

    #[test]
    fn accepts_exact_shape() {
        assert_eq!(
            parse_unlock_date("2025-02-14"),
            NaiveDate::from_ymd_opt(2025, 2, 14)
        );
    }

    #[test]
    fn rejects_other_shapes() {
        for bad in [
            "",
            "2025",
            "2025-2-14",
            "2025-02-4",
            "25-02-14",
            "2025/02/14",
            "2025-02-14T00:00",
            " 2025-02-14",
            "2025-02-14 ",
            "abcd-ef-gh",
            "2025-0a-14",
            "+025-02-14",
            "２０２５-02-14",
        ] {
            assert_eq!(parse_unlock_date(bad), None, "{bad:?} should not parse");
        }
    }

    #[test]
    fn overflowing_fields_roll_forward() {
        assert_eq!(
            parse_unlock_date("2024-02-30"),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
        assert_eq!(
            parse_unlock_date("2024-13-01"),
            NaiveDate::from_ymd_opt(2025, 1, 1)
        );
        assert_eq!(
            parse_unlock_date("2024-01-00"),
            NaiveDate::from_ymd_opt(2023, 12, 31)
        );
        assert_eq!(
            parse_unlock_date("2024-00-15"),
            NaiveDate::from_ymd_opt(2023, 12, 15)
        );
    }

    #[test]
    fn instant_is_midnight_in_the_zone() {
        let at = parse_unlock_instant("2099-01-01", &Utc).unwrap();
        assert_eq!(at.to_rfc3339(), "2099-01-01T00:00:00+00:00");

        let paris_winter = FixedOffset::east_opt(3600).unwrap();
        let at = parse_unlock_instant("2030-01-01", &paris_winter).unwrap();
        assert_eq!(at.to_rfc3339(), "2029-12-31T23:00:00+00:00");

        let new_york_winter = FixedOffset::west_opt(5 * 3600).unwrap();
        let at = parse_unlock_instant("2030-01-01", &new_york_winter).unwrap();
        assert_eq!(at.to_rfc3339(), "2030-01-01T05:00:00+00:00");
    }

    #[test]
    fn skipped_midnight_moves_past_the_gap() {
        // Clocks jump from 00:00 to 01:00 on 2026-03-08.
        let zone = SpringForward::<0>;
        let at = parse_unlock_instant("2026-03-08", &zone).unwrap();
        assert_eq!(at.to_rfc3339(), "2026-03-08T05:00:00+00:00");

        // The day after is an ordinary midnight on the daylight offset.
        let at = parse_unlock_instant("2026-03-09", &zone).unwrap();
        assert_eq!(at.to_rfc3339(), "2026-03-09T04:00:00+00:00");
    }
}
