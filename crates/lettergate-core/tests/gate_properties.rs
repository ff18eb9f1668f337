//! Property tests for unlock date parsing and gate evaluation.

mod support;

use chrono::{DateTime, FixedOffset, NaiveDate, TimeDelta, TimeZone, Utc};
use lettergate_core::gate::{evaluate, parse_unlock_date, parse_unlock_instant};
use lettergate_core::{Gate, GateLabels, GatedTrigger};
use proptest::prelude::*;
use support::FakeTrigger;

fn valid_date() -> impl Strategy<Value = NaiveDate> {
    (1970i32..=2200, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

/// Seconds offset within roughly +/- 30 years.
fn offset_secs() -> impl Strategy<Value = i64> {
    1i64..=30 * 366 * 86_400
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).unwrap())
}

proptest! {
    #[test]
    fn non_matching_strings_never_lock(raw in "\\PC{0,14}") {
        let exact = raw.len() == 10
            && raw.bytes().enumerate().all(|(i, b)| {
                if i == 4 || i == 7 { b == b'-' } else { b.is_ascii_digit() }
            });
        prop_assume!(!exact);

        prop_assert_eq!(parse_unlock_date(&raw), None);

        let now = Utc.with_ymd_and_hms(1900, 1, 1, 0, 0, 0).unwrap();
        let mut trigger = GatedTrigger::new("t", Some(raw.as_str()), &Utc, FakeTrigger::default());
        prop_assert!(trigger.evaluate(now, &GateLabels::default()).is_none());
        prop_assert!(!trigger.view().flags().is_inert());
    }

    #[test]
    fn corrupted_valid_dates_never_lock(
        date in valid_date(),
        pos in 0usize..10,
        replacement in "[^0-9]",
    ) {
        let mut raw: Vec<char> = date.format("%Y-%m-%d").to_string().chars().collect();
        let replacement = replacement.chars().next().unwrap();
        prop_assume!(raw[pos] != replacement);
        raw[pos] = replacement;
        let raw: String = raw.into_iter().collect();

        // Hyphen slots must hold a hyphen, digit slots a digit.
        prop_assume!(!((pos == 4 || pos == 7) && replacement == '-'));
        prop_assert_eq!(parse_unlock_date(&raw), None);
    }

    #[test]
    fn formatted_dates_round_trip(date in valid_date()) {
        let raw = date.format("%Y-%m-%d").to_string();
        prop_assert_eq!(parse_unlock_date(&raw), Some(date));
        prop_assert_eq!(parse_unlock_instant(&raw, &Utc), Some(midnight(date)));
    }

    #[test]
    fn fixed_offsets_shift_midnight(date in valid_date(), offset_mins in -14 * 60i32..=14 * 60) {
        let zone = FixedOffset::east_opt(offset_mins * 60).unwrap();
        let raw = date.format("%Y-%m-%d").to_string();
        prop_assert_eq!(
            parse_unlock_instant(&raw, &zone),
            Some(midnight(date) - TimeDelta::minutes(i64::from(offset_mins)))
        );
    }

    #[test]
    fn before_midnight_is_locked_with_exact_countdown(
        date in valid_date(),
        back in offset_secs(),
        sub_ms in 0i64..1000,
    ) {
        let unlock_at = midnight(date);
        let now = unlock_at - TimeDelta::seconds(back) + TimeDelta::milliseconds(sub_ms);
        prop_assume!(now < unlock_at);
        let remaining_ms = (unlock_at - now).num_milliseconds();

        match evaluate(unlock_at, now) {
            Gate::Locked { remaining } => {
                prop_assert!(remaining.hours < 24);
                prop_assert!(remaining.minutes < 60);
                prop_assert!(remaining.seconds < 60);
                prop_assert_eq!(
                    remaining.days * 86_400
                        + u64::from(remaining.hours) * 3_600
                        + u64::from(remaining.minutes) * 60
                        + u64::from(remaining.seconds),
                    (remaining_ms / 1000) as u64
                );
            }
            Gate::Unlocked => prop_assert!(false, "expected locked"),
        }

        let raw = date.format("%Y-%m-%d").to_string();
        let mut trigger = GatedTrigger::new("t", Some(raw.as_str()), &Utc, FakeTrigger::default());
        trigger.evaluate(now, &GateLabels::default());
        prop_assert!(trigger.view().disabled_attr);
        prop_assert!(trigger.view().aria_disabled);
        prop_assert!(trigger.view().locked_class);
    }

    #[test]
    fn at_or_after_midnight_is_unlocked(date in valid_date(), forward in 0i64..=30 * 366 * 86_400) {
        let unlock_at = midnight(date);
        let now = unlock_at + TimeDelta::seconds(forward);
        prop_assert_eq!(evaluate(unlock_at, now), Gate::Unlocked);

        let raw = date.format("%Y-%m-%d").to_string();
        let mut trigger = GatedTrigger::new("t", Some(raw.as_str()), &Utc, FakeTrigger::default());
        trigger.evaluate(now, &GateLabels::default());
        prop_assert_eq!(trigger.view().status.as_deref(), Some("Unlocked"));
        prop_assert!(!trigger.view().flags().is_inert());
    }
}
