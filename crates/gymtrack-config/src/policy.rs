//! Validated configuration structures

use crate::schema::{RawAttendanceConfig, RawConfig, RawServiceConfig};
use gymtrack_util::default_data_dir;
use std::path::PathBuf;
use std::time::Duration;

/// Open sessions older than this many minutes are force-closed
pub const DEFAULT_AUTO_CHECKOUT_MINUTES: u32 = 120;

/// Background sweep period
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Width of the "expiring soon" window before the end date
pub const DEFAULT_EXPIRING_SOON_DAYS: u32 = 7;

/// Length of the recent check-ins list
pub const DEFAULT_RECENT_CHECKINS: usize = 10;

/// Validated configuration ready for use by the service
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub service: ServiceConfig,
    pub attendance: AttendancePolicy,
}

impl Config {
    /// Convert from raw config (after validation)
    pub fn from_raw(raw: RawConfig) -> Self {
        Self {
            service: ServiceConfig::from_raw(raw.service),
            attendance: AttendancePolicy::from_raw(raw.attendance),
        }
    }
}

/// Service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub data_dir: PathBuf,
}

impl ServiceConfig {
    fn from_raw(raw: RawServiceConfig) -> Self {
        Self {
            data_dir: raw.data_dir.unwrap_or_else(default_data_dir),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Attendance engine policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendancePolicy {
    pub auto_checkout_minutes: u32,
    pub sweep_interval: Duration,
    pub expiring_soon_days: u32,
    pub recent_checkins: usize,
}

impl AttendancePolicy {
    fn from_raw(raw: RawAttendanceConfig) -> Self {
        Self {
            auto_checkout_minutes: raw
                .auto_checkout_minutes
                .unwrap_or(DEFAULT_AUTO_CHECKOUT_MINUTES),
            sweep_interval: raw
                .sweep_interval_seconds
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_SWEEP_INTERVAL),
            expiring_soon_days: raw
                .expiring_soon_days
                .unwrap_or(DEFAULT_EXPIRING_SOON_DAYS),
            recent_checkins: raw.recent_checkins.unwrap_or(DEFAULT_RECENT_CHECKINS),
        }
    }
}

impl Default for AttendancePolicy {
    fn default() -> Self {
        Self {
            auto_checkout_minutes: DEFAULT_AUTO_CHECKOUT_MINUTES,
            sweep_interval: DEFAULT_SWEEP_INTERVAL,
            expiring_soon_days: DEFAULT_EXPIRING_SOON_DAYS,
            recent_checkins: DEFAULT_RECENT_CHECKINS,
        }
    }
}
