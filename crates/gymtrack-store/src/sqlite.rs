//! SQLite-based store implementation

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tracing::{debug, warn};

use crate::{AuditEvent, AuditLog, Collection, Repository, Store, StoreError, StoreResult};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite-based store. Each collection lives in one JSON row keyed by slot.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create a store at the given path
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        // One-shot commands and a running daemon share the file
        conn.busy_timeout(BUSY_TIMEOUT)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Create an in-memory store (for testing)
    pub fn in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;
        Ok(store)
    }

    fn conn(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Database("connection lock poisoned".into()))
    }

    fn init_schema(&self) -> StoreResult<()> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            -- Whole-collection slots
            CREATE TABLE IF NOT EXISTS collections (
                slot TEXT PRIMARY KEY,
                json TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );

            -- Audit log (append-only)
            CREATE TABLE IF NOT EXISTS audit_log (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp TEXT NOT NULL,
                event_json TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_audit_timestamp ON audit_log(timestamp);
            "#,
        )?;

        debug!("Store schema initialized");
        Ok(())
    }
}

impl<T: Collection> Repository<T> for SqliteStore {
    fn load(&self) -> StoreResult<Vec<T>> {
        let conn = self.conn()?;

        let json: Option<String> = conn
            .query_row(
                "SELECT json FROM collections WHERE slot = ?",
                [T::SLOT],
                |row| row.get(0),
            )
            .optional()?;

        match json {
            Some(s) => {
                let items: Vec<T> = serde_json::from_str(&s)?;
                debug!(slot = T::SLOT, count = items.len(), "Collection loaded");
                Ok(items)
            }
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, items: &[T]) -> StoreResult<()> {
        let conn = self.conn()?;
        let json = serde_json::to_string(items)?;

        conn.execute(
            r#"
            INSERT INTO collections (slot, json, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(slot)
            DO UPDATE SET json = excluded.json, updated_at = excluded.updated_at
            "#,
            params![T::SLOT, json, gymtrack_util::now().to_rfc3339()],
        )?;

        debug!(slot = T::SLOT, count = items.len(), "Collection saved");
        Ok(())
    }
}

impl AuditLog for SqliteStore {
    fn append_audit(&self, mut event: AuditEvent) -> StoreResult<()> {
        let conn = self.conn()?;
        let event_json = serde_json::to_string(&event.event)?;

        conn.execute(
            "INSERT INTO audit_log (timestamp, event_json) VALUES (?, ?)",
            params![event.timestamp.to_rfc3339(), event_json],
        )?;

        event.id = conn.last_insert_rowid();
        debug!(event_id = event.id, "Audit event appended");

        Ok(())
    }

    fn recent_audits(&self, limit: usize) -> StoreResult<Vec<AuditEvent>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(
            "SELECT id, timestamp, event_json FROM audit_log ORDER BY id DESC LIMIT ?",
        )?;

        let rows = stmt.query_map([limit as i64], |row| {
            let id: i64 = row.get(0)?;
            let timestamp_str: String = row.get(1)?;
            let event_json: String = row.get(2)?;
            Ok((id, timestamp_str, event_json))
        })?;

        let mut events = Vec::new();
        for row in rows {
            let (id, timestamp_str, event_json) = row?;
            let timestamp = DateTime::parse_from_rfc3339(&timestamp_str)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| StoreError::Serialization(e.to_string()))?;
            let event: crate::AuditEventType = serde_json::from_str(&event_json)?;

            events.push(AuditEvent {
                id,
                timestamp,
                event,
            });
        }

        Ok(events)
    }
}

impl Store for SqliteStore {
    fn is_healthy(&self) -> bool {
        match self.conn.lock() {
            Ok(conn) => conn.query_row("SELECT 1", [], |_| Ok(())).is_ok(),
            Err(_) => {
                warn!("Store lock poisoned");
                false
            }
        }
    }
}
