pub mod config;
pub mod countdown;
pub mod schedule;

use std::path::Path;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use lettergate_core::{Clock, Config, SystemClock};

/// Accepted `--now` formats, most specific first.
const NOW_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];

pub(crate) fn load_config(path: Option<&Path>) -> Result<Config, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            Ok(Config::load_from(path)?)
        }
        None => Ok(Config::default()),
    }
}

/// Resolve `--now`, a local wall time, falling back to the system clock.
pub(crate) fn resolve_now(
    raw: Option<&str>,
) -> Result<DateTime<Utc>, Box<dyn std::error::Error>> {
    let Some(raw) = raw else {
        return Ok(SystemClock.now());
    };
    let local = NOW_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .ok_or_else(|| format!("cannot parse --now '{raw}' (expected YYYY-MM-DDTHH:MM:SS)"))?;
    let at = Local
        .from_local_datetime(&local)
        .earliest()
        .ok_or_else(|| format!("--now '{raw}' does not exist in the local time zone"))?;
    Ok(at.with_timezone(&Utc))
}

/// Unlock instants are shown as local wall times.
pub(crate) fn local_wall_time(at: DateTime<Utc>) -> NaiveDateTime {
    at.with_timezone(&Local).naive_local()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_accepts_t_and_space_forms() {
        let a = resolve_now(Some("2000-01-01T00:00:00")).unwrap();
        let b = resolve_now(Some("2000-01-01 00:00:00")).unwrap();
        let c = resolve_now(Some("2000-01-01T00:00")).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn now_is_read_as_local_wall_time() {
        let at = resolve_now(Some("2030-05-30T12:00:00")).unwrap();
        assert_eq!(local_wall_time(at).to_string(), "2030-05-30 12:00:00");
    }

    #[test]
    fn now_rejects_garbage() {
        assert!(resolve_now(Some("yesterday")).is_err());
    }
}
