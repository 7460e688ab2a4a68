//! Core events emitted by the ledger service

use gymtrack_api::{CapacityWarning, SessionEndReason};
use gymtrack_util::{MemberId, RoomId, SessionId};

/// Events emitted by the ledger service
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreEvent {
    /// A session was opened
    CheckedIn {
        session_id: SessionId,
        member_id: MemberId,
        room_id: RoomId,
        capacity_warning: Option<CapacityWarning>,
    },

    /// A check-in was rejected
    CheckinDenied { lookup: String, reason: &'static str },

    /// A session was closed
    SessionEnded {
        session_id: SessionId,
        member_id: MemberId,
        reason: SessionEndReason,
        duration_minutes: u32,
    },
}
