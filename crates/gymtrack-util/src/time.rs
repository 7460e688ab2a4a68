//! Time utilities for gymtrack
//!
//! All timestamps are UTC. The [`Clock`] trait is the single source of
//! "now" for the attendance engine so that tests can drive time by hand.
//!
//! # Mock Time for Development
//!
//! In debug builds, the `GYMTRACK_MOCK_TIME` environment variable can be set
//! to shift [`SystemClock`] to a fixed starting point. Mock time keeps
//! advancing at the real rate from there.
//!
//! Format: `YYYY-MM-DD HH:MM:SS`, interpreted as UTC (e.g., `2026-03-02 06:30:00`)
//!
//! Example:
//! ```bash
//! GYMTRACK_MOCK_TIME="2026-03-02 06:30:00" gymtrackd run
//! ```

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use std::sync::{Mutex, OnceLock};

/// Environment variable name for mock time (debug builds only)
pub const MOCK_TIME_ENV_VAR: &str = "GYMTRACK_MOCK_TIME";

/// Format accepted by `GYMTRACK_MOCK_TIME`
pub const MOCK_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Offset between mock time and real time, captured on first use.
static MOCK_TIME_OFFSET: OnceLock<Option<Duration>> = OnceLock::new();

#[allow(clippy::disallowed_methods)] // wraps Utc::now()
fn get_mock_time_offset() -> Option<Duration> {
    *MOCK_TIME_OFFSET.get_or_init(|| {
        #[cfg(debug_assertions)]
        {
            if let Ok(mock_time_str) = std::env::var(MOCK_TIME_ENV_VAR) {
                match NaiveDateTime::parse_from_str(&mock_time_str, MOCK_TIME_FORMAT) {
                    Ok(naive_dt) => {
                        let offset = naive_dt.and_utc().signed_duration_since(Utc::now());
                        tracing::info!(
                            mock_time = %mock_time_str,
                            offset_secs = offset.num_seconds(),
                            "Mock time enabled"
                        );
                        return Some(offset);
                    }
                    Err(_) => {
                        tracing::warn!(
                            mock_time = %mock_time_str,
                            expected_format = MOCK_TIME_FORMAT,
                            "Invalid mock time format"
                        );
                    }
                }
            }
            None
        }
        #[cfg(not(debug_assertions))]
        {
            None
        }
    })
}

/// Returns whether mock time is currently active.
pub fn is_mock_time_active() -> bool {
    get_mock_time_offset().is_some()
}

/// Current UTC time, respecting mock time settings in debug builds.
#[allow(clippy::disallowed_methods)] // this is the wrapper
pub fn now() -> DateTime<Utc> {
    let real_now = Utc::now();

    match get_mock_time_offset() {
        Some(offset) => real_now + offset,
        None => real_now,
    }
}

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock backed by [`now()`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        now()
    }
}

/// Clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    current: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            current: Mutex::new(start),
        }
    }

    pub fn set(&self, to: DateTime<Utc>) {
        *self.current.lock().unwrap_or_else(|e| e.into_inner()) = to;
    }

    pub fn advance(&self, by: Duration) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Format a number of minutes as `"45m"` or `"2h 5m"`
pub fn format_minutes(minutes: u64) -> String {
    let hours = minutes / 60;
    let mins = minutes % 60;

    if hours == 0 {
        format!("{}m", mins)
    } else {
        format!("{}h {}m", hours, mins)
    }
}

/// Whole minutes elapsed from `since` to `now`, never negative
pub fn elapsed_minutes(since: DateTime<Utc>, now: DateTime<Utc>) -> u32 {
    let secs = now.signed_duration_since(since).num_seconds().max(0);
    u32::try_from(secs.div_euclid(60)).unwrap_or(u32::MAX)
}

/// Human-readable time since a past instant, e.g. for "inside for 1h 12m"
pub fn format_time_since(since: DateTime<Utc>, now: DateTime<Utc>) -> String {
    format_minutes(u64::from(elapsed_minutes(since, now)))
}

/// Format a timestamp as `HH:MM` (UTC)
pub fn format_clock_time(dt: &DateTime<Utc>) -> String {
    dt.format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, h, m, s).unwrap()
    }

    #[test]
    fn test_manual_clock_advances() {
        let clock = ManualClock::new(at(6, 0, 0));
        assert_eq!(clock.now(), at(6, 0, 0));

        clock.advance(Duration::minutes(125));
        assert_eq!(clock.now(), at(8, 5, 0));

        clock.set(at(9, 0, 0));
        assert_eq!(clock.now(), at(9, 0, 0));
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(0), "0m");
        assert_eq!(format_minutes(45), "45m");
        assert_eq!(format_minutes(60), "1h 0m");
        assert_eq!(format_minutes(125), "2h 5m");
        assert_eq!(format_minutes(5_000_000_000), "83333333h 20m");
    }

    #[test]
    fn test_elapsed_minutes_floors() {
        // 119 minutes 54 seconds
        assert_eq!(elapsed_minutes(at(6, 0, 0), at(7, 59, 54)), 119);
        assert_eq!(elapsed_minutes(at(6, 0, 0), at(8, 0, 0)), 120);
        assert_eq!(elapsed_minutes(at(6, 0, 0), at(6, 0, 59)), 0);
    }

    #[test]
    fn test_elapsed_minutes_clamps_backwards_clock() {
        assert_eq!(elapsed_minutes(at(6, 0, 0), at(5, 30, 0)), 0);
    }

    #[test]
    fn test_format_time_since() {
        assert_eq!(format_time_since(at(6, 0, 0), at(7, 12, 30)), "1h 12m");
    }

    #[test]
    fn test_format_clock_time() {
        assert_eq!(format_clock_time(&at(14, 30, 45)), "14:30");
    }

    #[test]
    fn test_parse_mock_time_format() {
        for valid in ["2026-03-02 06:30:00", "2025-12-31 23:59:59"] {
            assert!(NaiveDateTime::parse_from_str(valid, MOCK_TIME_FORMAT).is_ok());
        }
        for invalid in ["2026-03-02", "2026-03-02T06:30:00", "not a date", ""] {
            assert!(NaiveDateTime::parse_from_str(invalid, MOCK_TIME_FORMAT).is_err());
        }
    }

    #[test]
    fn test_system_clock_advances() {
        let clock = SystemClock;
        let t1 = clock.now();
        std::thread::sleep(std::time::Duration::from_millis(20));
        let t2 = clock.now();
        assert!(t2 > t1);
    }
}
