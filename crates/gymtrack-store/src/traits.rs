//! Store trait definitions

use gymtrack_api::{AttendanceSession, Branch, Member, Room};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use crate::{AuditEvent, StoreResult};

/// A record type persisted as one whole collection under a named slot
pub trait Collection: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Key of the slot holding the collection
    const SLOT: &'static str;
}

impl Collection for Member {
    const SLOT: &'static str = "gym-members";
}

impl Collection for Branch {
    const SLOT: &'static str = "gym-branches";
}

impl Collection for Room {
    const SLOT: &'static str = "gym-rooms";
}

impl Collection for AttendanceSession {
    const SLOT: &'static str = "gym-attendance-sessions";
}

/// Load/save access to one whole collection
pub trait Repository<T>: Send + Sync {
    /// Load the full collection; an empty slot loads as an empty list
    fn load(&self) -> StoreResult<Vec<T>>;

    /// Replace the full collection
    fn save(&self, items: &[T]) -> StoreResult<()>;
}

/// Append-only audit trail
pub trait AuditLog: Send + Sync {
    /// Append an audit event
    fn append_audit(&self, event: AuditEvent) -> StoreResult<()>;

    /// Get recent audit events, newest first
    fn recent_audits(&self, limit: usize) -> StoreResult<Vec<AuditEvent>>;
}

/// A backend providing every collection plus the audit log
pub trait Store:
    Repository<Member>
    + Repository<Branch>
    + Repository<Room>
    + Repository<AttendanceSession>
    + AuditLog
{
    /// Check if store is healthy
    fn is_healthy(&self) -> bool;
}

/// The repositories handed to the attendance engine
#[derive(Clone)]
pub struct Repositories {
    pub members: Arc<dyn Repository<Member>>,
    pub branches: Arc<dyn Repository<Branch>>,
    pub rooms: Arc<dyn Repository<Room>>,
    pub sessions: Arc<dyn Repository<AttendanceSession>>,
    pub audit: Arc<dyn AuditLog>,
}

impl Repositories {
    /// Take every repository from a single backend
    pub fn from_store<S: Store + 'static>(store: Arc<S>) -> Self {
        Self {
            members: store.clone(),
            branches: store.clone(),
            rooms: store.clone(),
            sessions: store.clone(),
            audit: store,
        }
    }
}
