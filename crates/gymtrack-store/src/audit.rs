//! Audit event types

use chrono::{DateTime, Utc};
use gymtrack_util::{MemberId, RoomId, SessionId};
use serde::{Deserialize, Serialize};

/// Types of audit events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuditEventType {
    /// Service started
    ServiceStarted,

    /// Service stopped
    ServiceStopped,

    /// Member checked in
    CheckedIn {
        session_id: SessionId,
        member_id: MemberId,
        room_id: RoomId,
        over_capacity: bool,
    },

    /// Check-in rejected
    CheckinDenied { lookup: String, reason: String },

    /// Session closed by checkout
    CheckedOut {
        session_id: SessionId,
        member_id: MemberId,
        duration_minutes: u32,
    },

    /// Session closed by the stale-session sweep
    AutoCheckedOut {
        session_id: SessionId,
        member_id: MemberId,
        duration_minutes: u32,
    },

    /// Directory collections replaced from an import
    DirectoryImported {
        members: usize,
        branches: usize,
        rooms: usize,
    },
}

/// Full audit event with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Unique event ID
    pub id: i64,

    /// Event timestamp
    pub timestamp: DateTime<Utc>,

    /// Event type and details
    pub event: AuditEventType,
}

impl AuditEvent {
    pub fn new(event: AuditEventType) -> Self {
        Self::at(gymtrack_util::now(), event)
    }

    pub fn at(timestamp: DateTime<Utc>, event: AuditEventType) -> Self {
        Self {
            id: 0, // Will be set by store
            timestamp,
            event,
        }
    }
}
