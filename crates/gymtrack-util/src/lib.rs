//! Shared utilities for gymtrack
//!
//! This crate provides:
//! - ID types (MemberId, BranchId, RoomId, SessionId)
//! - Clocks (system clock with mock-time support, manual clock for tests)
//! - Duration formatting helpers
//! - Error types
//! - Default paths for config and data directories

mod error;
mod ids;
mod paths;
mod time;

pub use error::*;
pub use ids::*;
pub use paths::*;
pub use time::*;
