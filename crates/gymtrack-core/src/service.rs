//! Ledger service
//!
//! Serializes every ledger mutation behind an async `RwLock` and owns the
//! background task that sweeps stale sessions on a fixed period.

use gymtrack_api::{AttendanceSession, CheckIn, SessionEndReason};
use gymtrack_config::AttendancePolicy;
use gymtrack_store::{Repositories, StoreResult};
use gymtrack_util::{CheckinError, CheckoutError, Clock, SessionId};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{RwLock, broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::{CoreEvent, Directory, GymResult, MemberStanding, OccupancyReport, SessionLedger, occupancy};

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Shared state between the service handle and its sweep task
struct Shared {
    ledger: RwLock<SessionLedger>,
    clock: Arc<dyn Clock>,
    events: broadcast::Sender<CoreEvent>,
    sweeping: AtomicBool,
}

/// Clears the in-flight flag when a sweep finishes
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Shared {
    async fn sweep(&self) -> StoreResult<usize> {
        if self.sweeping.swap(true, Ordering::AcqRel) {
            debug!("Sweep already in flight, skipping");
            return Ok(0);
        }
        let _in_flight = InFlight(&self.sweeping);

        let closed = {
            let mut ledger = self.ledger.write().await;
            let now = self.clock.now();
            ledger.sweep(now)?
        };

        for session in &closed {
            self.emit(CoreEvent::SessionEnded {
                session_id: session.id.clone(),
                member_id: session.member_id.clone(),
                reason: SessionEndReason::AutoTimeout,
                duration_minutes: session.duration.unwrap_or_default(),
            });
        }

        Ok(closed.len())
    }

    /// Sweep before a read, logging instead of failing the read
    async fn sweep_before_view(&self) {
        if let Err(e) = self.sweep().await {
            warn!(error = %e, "Eager sweep failed");
        }
    }

    fn emit(&self, event: CoreEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }
}

/// Single writer for the session ledger
pub struct LedgerService {
    shared: Arc<Shared>,
    shutdown_tx: watch::Sender<bool>,
    sweeper: Mutex<Option<JoinHandle<()>>>,
}

impl LedgerService {
    /// Sweep once, then start the periodic sweep task.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn start(ledger: SessionLedger, clock: Arc<dyn Clock>) -> Self {
        let period = ledger.policy().sweep_interval;
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);

        let shared = Arc::new(Shared {
            ledger: RwLock::new(ledger),
            clock,
            events,
            sweeping: AtomicBool::new(false),
        });

        shared.sweep_before_view().await;

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let handle = tokio::spawn(run_sweeper(shared.clone(), period, shutdown_rx));

        Self {
            shared,
            shutdown_tx,
            sweeper: Mutex::new(Some(handle)),
        }
    }

    /// Current time according to the service clock
    pub fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.shared.clock.now()
    }

    /// Subscribe to check-in, denial and session-end events
    pub fn subscribe(&self) -> broadcast::Receiver<CoreEvent> {
        self.shared.events.subscribe()
    }

    pub async fn check_in(&self, lookup: &str) -> Result<CheckIn, CheckinError> {
        let result = {
            let mut ledger = self.shared.ledger.write().await;
            let now = self.shared.clock.now();
            ledger.check_in(lookup, now)
        };

        match &result {
            Ok(checkin) => self.shared.emit(CoreEvent::CheckedIn {
                session_id: checkin.session.id.clone(),
                member_id: checkin.session.member_id.clone(),
                room_id: checkin.session.room_id.clone(),
                capacity_warning: checkin.capacity_warning.clone(),
            }),
            Err(e) => self.shared.emit(CoreEvent::CheckinDenied {
                lookup: lookup.trim().to_string(),
                reason: e.reason_code(),
            }),
        }

        result
    }

    pub async fn check_out(&self, session_id: &SessionId) -> Result<AttendanceSession, CheckoutError> {
        let closed = {
            let mut ledger = self.shared.ledger.write().await;
            let now = self.shared.clock.now();
            ledger.check_out(session_id, now)?
        };

        self.shared.emit(CoreEvent::SessionEnded {
            session_id: closed.id.clone(),
            member_id: closed.member_id.clone(),
            reason: SessionEndReason::CheckedOut,
            duration_minutes: closed.duration.unwrap_or_default(),
        });

        Ok(closed)
    }

    /// Run a sweep now. Returns the number of sessions closed; an overlapping
    /// request while another sweep is running closes nothing.
    pub async fn sweep_now(&self) -> StoreResult<usize> {
        self.shared.sweep().await
    }

    /// Open sessions after an eager sweep
    pub async fn open_sessions(&self) -> Vec<AttendanceSession> {
        self.shared.sweep_before_view().await;
        let ledger = self.shared.ledger.read().await;
        ledger.open_sessions().into_iter().cloned().collect()
    }

    /// Who is inside, optionally narrowed to a branch and/or room
    pub async fn occupancy(
        &self,
        branch: Option<&gymtrack_util::BranchId>,
        room: Option<&gymtrack_util::RoomId>,
    ) -> OccupancyReport {
        self.shared.sweep_before_view().await;
        let ledger = self.shared.ledger.read().await;
        occupancy(ledger.sessions(), branch, room)
    }

    /// Snapshot of every session
    pub async fn sessions(&self) -> Vec<AttendanceSession> {
        self.shared.ledger.read().await.sessions().to_vec()
    }

    pub async fn get(&self, session_id: &SessionId) -> Option<AttendanceSession> {
        self.shared.ledger.read().await.get(session_id).cloned()
    }

    /// Most recent check-ins, newest first. `None` uses the configured length.
    pub async fn recent_checkins(&self, limit: Option<usize>) -> Vec<AttendanceSession> {
        let ledger = self.shared.ledger.read().await;
        let limit = limit.unwrap_or(ledger.policy().recent_checkins);
        ledger.recent_checkins(limit).into_iter().cloned().collect()
    }

    pub async fn standing(&self, lookup: &str) -> Result<MemberStanding, CheckinError> {
        self.shared.sweep_before_view().await;
        let ledger = self.shared.ledger.read().await;
        ledger.standing(lookup, self.shared.clock.now())
    }

    pub async fn policy(&self) -> AttendancePolicy {
        self.shared.ledger.read().await.policy().clone()
    }

    pub async fn repositories(&self) -> Repositories {
        self.shared.ledger.read().await.repositories().clone()
    }

    /// Fresh directory snapshot for report rendering
    pub async fn directory(&self) -> GymResult<Directory> {
        let repos = self.repositories().await;
        Ok(Directory::load(&repos)?)
    }

    /// Whether the sweep task is still running
    pub fn is_running(&self) -> bool {
        self.sweeper
            .lock()
            .map(|guard| guard.as_ref().is_some_and(|h| !h.is_finished()))
            .unwrap_or(false)
    }

    /// Stop the sweep task and wait for it to finish
    pub async fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);

        let handle = self
            .sweeper
            .lock()
            .map(|mut guard| guard.take())
            .unwrap_or_else(|e| e.into_inner().take());

        if let Some(handle) = handle
            && let Err(e) = handle.await
        {
            warn!(error = %e, "Sweep task ended abnormally");
        }
    }
}

impl Drop for LedgerService {
    fn drop(&mut self) {
        let _ = self.shutdown_tx.send(true);
    }
}

async fn run_sweeper(shared: Arc<Shared>, period: Duration, mut shutdown: watch::Receiver<bool>) {
    // tokio intervals panic on a zero period
    let period = period.max(Duration::from_millis(1));
    let mut interval = tokio::time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    info!(interval_ms = period.as_millis() as u64, "Sweep task started");

    loop {
        tokio::select! {
            _ = interval.tick() => {
                match shared.sweep().await {
                    Ok(0) => {}
                    Ok(closed) => debug!(closed, "Periodic sweep closed sessions"),
                    Err(e) => warn!(error = %e, "Periodic sweep failed"),
                }
            }
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }

    info!("Sweep task stopped");
}
