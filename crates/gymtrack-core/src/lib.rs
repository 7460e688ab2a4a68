//! Attendance session engine for gymtrack
//!
//! This crate is the heart of gymtrack, containing:
//! - Membership validation (active / expiring-soon / expired)
//! - Room capacity advice
//! - The session ledger (check-in, checkout, stale-session sweep)
//! - The ledger service (single writer plus background sweep task)
//! - Report aggregation and export rows

mod capacity;
mod directory;
mod error;
mod events;
mod export;
mod ledger;
mod membership;
mod report;
mod service;

pub use capacity::*;
pub use directory::*;
pub use error::*;
pub use events::*;
pub use export::*;
pub use ledger::*;
pub use membership::*;
pub use report::*;
pub use service::*;
