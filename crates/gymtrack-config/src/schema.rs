//! Raw configuration schema (as parsed from TOML)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration as parsed from TOML
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawConfig {
    /// Config schema version
    pub config_version: u32,

    /// Service-level settings
    #[serde(default)]
    pub service: RawServiceConfig,

    /// Attendance engine tuning
    #[serde(default)]
    pub attendance: RawAttendanceConfig,
}

/// Service-level settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawServiceConfig {
    /// Data directory for the store
    pub data_dir: Option<PathBuf>,
}

/// Attendance engine settings. Every field falls back to its default.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawAttendanceConfig {
    /// Open sessions older than this are force-closed by the sweep
    pub auto_checkout_minutes: Option<u32>,

    /// How often the background sweep runs
    pub sweep_interval_seconds: Option<u64>,

    /// Days before expiry during which a membership is "expiring soon"
    pub expiring_soon_days: Option<u32>,

    /// Number of sessions in the recent check-ins list
    pub recent_checkins: Option<usize>,
}
