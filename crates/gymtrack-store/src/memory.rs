//! In-memory store implementation
//!
//! Collections are kept serialized so that load/save behave exactly like
//! a persistent backend (callers always get fresh copies).

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tracing::debug;

use crate::{AuditEvent, AuditLog, Collection, Repository, Store, StoreError, StoreResult};

#[derive(Debug, Default)]
struct MemoryState {
    slots: HashMap<&'static str, String>,
    audit: Vec<AuditEvent>,
}

/// In-memory store for tests and embedding
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
    read_only: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// When set, every save and audit append fails with [`StoreError::ReadOnly`]
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }

    fn state(&self) -> StoreResult<std::sync::MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|_| StoreError::Database("memory store lock poisoned".into()))
    }

    fn check_writable(&self) -> StoreResult<()> {
        if self.read_only.load(Ordering::SeqCst) {
            return Err(StoreError::ReadOnly);
        }
        Ok(())
    }
}

impl<T: Collection> Repository<T> for MemoryStore {
    fn load(&self) -> StoreResult<Vec<T>> {
        let state = self.state()?;
        match state.slots.get(T::SLOT) {
            Some(json) => Ok(serde_json::from_str(json)?),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, items: &[T]) -> StoreResult<()> {
        self.check_writable()?;
        let json = serde_json::to_string(items)?;
        self.state()?.slots.insert(T::SLOT, json);
        debug!(slot = T::SLOT, count = items.len(), "Collection saved");
        Ok(())
    }
}

impl AuditLog for MemoryStore {
    fn append_audit(&self, mut event: AuditEvent) -> StoreResult<()> {
        self.check_writable()?;
        let mut state = self.state()?;
        event.id = state.audit.len() as i64 + 1;
        state.audit.push(event);
        Ok(())
    }

    fn recent_audits(&self, limit: usize) -> StoreResult<Vec<AuditEvent>> {
        let state = self.state()?;
        Ok(state.audit.iter().rev().take(limit).cloned().collect())
    }
}

impl Store for MemoryStore {
    fn is_healthy(&self) -> bool {
        self.state.lock().is_ok()
    }
}
