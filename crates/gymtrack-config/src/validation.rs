//! Configuration validation

use crate::policy::{DEFAULT_AUTO_CHECKOUT_MINUTES, DEFAULT_SWEEP_INTERVAL};
use crate::schema::RawConfig;
use thiserror::Error;

/// Validation error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("attendance.{field} must be greater than zero")]
    MustBePositive { field: &'static str },

    #[error("attendance.sweep_interval_seconds ({interval_secs}s) must be shorter than auto_checkout_minutes ({timeout_minutes}m)")]
    SweepSlowerThanTimeout {
        interval_secs: u64,
        timeout_minutes: u32,
    },

    #[error("service.data_dir must not be empty")]
    EmptyDataDir,
}

/// Validate a raw configuration, collecting every problem
pub fn validate_config(config: &RawConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let attendance = &config.attendance;

    if attendance.auto_checkout_minutes == Some(0) {
        errors.push(ValidationError::MustBePositive {
            field: "auto_checkout_minutes",
        });
    }

    if attendance.sweep_interval_seconds == Some(0) {
        errors.push(ValidationError::MustBePositive {
            field: "sweep_interval_seconds",
        });
    }

    if attendance.recent_checkins == Some(0) {
        errors.push(ValidationError::MustBePositive {
            field: "recent_checkins",
        });
    }

    // Stale sessions must never outlive a full timeout period. A key left
    // out is compared at its default.
    let interval_secs = attendance
        .sweep_interval_seconds
        .unwrap_or(DEFAULT_SWEEP_INTERVAL.as_secs());
    let timeout_minutes = attendance
        .auto_checkout_minutes
        .unwrap_or(DEFAULT_AUTO_CHECKOUT_MINUTES);
    if interval_secs > 0
        && timeout_minutes > 0
        && interval_secs >= u64::from(timeout_minutes) * 60
    {
        errors.push(ValidationError::SweepSlowerThanTimeout {
            interval_secs,
            timeout_minutes,
        });
    }

    if let Some(dir) = &config.service.data_dir
        && dir.as_os_str().is_empty()
    {
        errors.push(ValidationError::EmptyDataDir);
    }

    errors
}
