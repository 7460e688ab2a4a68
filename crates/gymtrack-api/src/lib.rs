//! Record types for gymtrack
//!
//! This crate defines the data exchanged between the attendance engine and
//! its collaborators:
//! - Directory records (members, branches, rooms)
//! - Attendance sessions
//! - Membership plans and status
//! - Check-in outcomes

mod membership;
mod types;

pub use membership::*;
pub use types::*;
