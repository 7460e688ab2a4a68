//! Error types for attendance operations

use chrono::NaiveDate;
use thiserror::Error;

use crate::{MemberId, SessionId};

/// Why a check-in was rejected. The ledger is unchanged in every case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckinError {
    #[error("No member found with phone or id: {0}")]
    MemberNotFound(String),

    #[error("Membership of {member_id} expired on {end_date}")]
    MembershipExpired {
        member_id: MemberId,
        end_date: NaiveDate,
    },

    #[error("Member {member_id} is already checked in (session {session_id})")]
    AlreadyCheckedIn {
        member_id: MemberId,
        session_id: SessionId,
    },

    #[error("Store error: {0}")]
    Store(String),
}

impl CheckinError {
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    /// Short machine-readable reason, used in audit records
    pub fn reason_code(&self) -> &'static str {
        match self {
            Self::MemberNotFound(_) => "member_not_found",
            Self::MembershipExpired { .. } => "membership_expired",
            Self::AlreadyCheckedIn { .. } => "already_checked_in",
            Self::Store(_) => "store_error",
        }
    }
}

/// Why a checkout was rejected. The ledger is unchanged in every case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("Session not found: {0}")]
    SessionNotFound(SessionId),

    #[error("Session already closed: {0}")]
    AlreadyClosed(SessionId),

    #[error("Store error: {0}")]
    Store(String),
}

impl CheckoutError {
    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }
}
