//! Session ledger
//!
//! Owns the attendance session collection. Every mutation reloads the
//! collection from the store, applies the change and persists it before it
//! is acknowledged, so writes made through another handle on the same store
//! are never overwritten. When the save fails the in-memory collection is
//! put back the way it was and the caller gets a `Store` error.

use chrono::{DateTime, Duration, Utc};
use gymtrack_api::{AttendanceSession, CheckIn, SessionEndReason};
use gymtrack_config::AttendancePolicy;
use gymtrack_store::{AuditEvent, AuditEventType, Repositories, StoreResult};
use gymtrack_util::{elapsed_minutes, CheckinError, CheckoutError, MemberId, SessionId};
use tracing::{debug, info, warn};

use crate::{capacity_warning, days_until_expiry, membership_status_within, Directory, MemberStanding};

/// The attendance session ledger
pub struct SessionLedger {
    repos: Repositories,
    policy: AttendancePolicy,
    sessions: Vec<AttendanceSession>,
}

impl SessionLedger {
    /// Load the session collection from the repositories
    pub fn load(repos: Repositories, policy: AttendancePolicy) -> StoreResult<Self> {
        let sessions = repos.sessions.load()?;
        let open = sessions.iter().filter(|s| s.is_open()).count();

        info!(
            session_count = sessions.len(),
            open_count = open,
            "Session ledger loaded"
        );

        Ok(Self {
            repos,
            policy,
            sessions,
        })
    }

    pub fn policy(&self) -> &AttendancePolicy {
        &self.policy
    }

    pub fn repositories(&self) -> &Repositories {
        &self.repos
    }

    /// Replace the in-memory collection with what is currently persisted
    pub fn reload(&mut self) -> StoreResult<()> {
        let sessions = self.repos.sessions.load()?;
        if sessions != self.sessions {
            debug!(session_count = sessions.len(), "Session ledger refreshed from store");
        }
        self.sessions = sessions;
        Ok(())
    }

    /// Admit a member identified by phone or id.
    ///
    /// Checks run in order and the first failure wins: unknown member,
    /// expired membership, already checked in. A full room only attaches a
    /// warning to the result.
    pub fn check_in(&mut self, lookup: &str, now: DateTime<Utc>) -> Result<CheckIn, CheckinError> {
        let result = self
            .reload()
            .and_then(|()| Directory::load(&self.repos))
            .map_err(|e| CheckinError::store(e.to_string()))
            .and_then(|directory| self.admit(&directory, lookup, now));

        match &result {
            Ok(checkin) => {
                let session = &checkin.session;
                self.audit(
                    now,
                    AuditEventType::CheckedIn {
                        session_id: session.id.clone(),
                        member_id: session.member_id.clone(),
                        room_id: session.room_id.clone(),
                        over_capacity: checkin.capacity_warning.is_some(),
                    },
                );

                info!(
                    session_id = %session.id,
                    member_id = %session.member_id,
                    room_id = %session.room_id,
                    membership = %checkin.membership,
                    "Member checked in"
                );

                if let Some(warning) = &checkin.capacity_warning {
                    warn!(
                        room_id = %warning.room_id,
                        occupancy = warning.occupancy,
                        capacity = warning.capacity,
                        "Room at or over capacity"
                    );
                }
            }
            Err(e) => {
                self.audit(
                    now,
                    AuditEventType::CheckinDenied {
                        lookup: lookup.trim().to_string(),
                        reason: e.reason_code().to_string(),
                    },
                );

                warn!(lookup = %lookup.trim(), reason = e.reason_code(), "Check-in denied");
            }
        }

        result
    }

    fn admit(
        &mut self,
        directory: &Directory,
        lookup: &str,
        now: DateTime<Utc>,
    ) -> Result<CheckIn, CheckinError> {
        let member = directory
            .find_member(lookup)
            .ok_or_else(|| CheckinError::MemberNotFound(lookup.trim().to_string()))?;

        let membership = membership_status_within(member, now, self.policy.expiring_soon_days);
        if !membership.may_check_in() {
            return Err(CheckinError::MembershipExpired {
                member_id: member.id.clone(),
                end_date: member.end_date,
            });
        }

        if let Some(open) = self.open_session_for(&member.id) {
            return Err(CheckinError::AlreadyCheckedIn {
                member_id: member.id.clone(),
                session_id: open.id.clone(),
            });
        }

        let capacity_warning = directory.room(&member.room_id).and_then(|room| {
            let occupancy = self
                .sessions
                .iter()
                .filter(|s| s.is_open() && s.room_id == room.id)
                .count();
            capacity_warning(room, occupancy)
        });

        let session = AttendanceSession::open(member, now);
        self.sessions.push(session.clone());

        if let Err(e) = self.persist() {
            self.sessions.pop();
            return Err(CheckinError::store(e.to_string()));
        }

        Ok(CheckIn {
            session,
            membership,
            capacity_warning,
        })
    }

    /// Close an open session. Duration is whole elapsed minutes, rounded down.
    pub fn check_out(
        &mut self,
        session_id: &SessionId,
        now: DateTime<Utc>,
    ) -> Result<AttendanceSession, CheckoutError> {
        self.reload()
            .map_err(|e| CheckoutError::store(e.to_string()))?;

        let index = self
            .sessions
            .iter()
            .position(|s| &s.id == session_id)
            .ok_or_else(|| CheckoutError::SessionNotFound(session_id.clone()))?;

        if self.sessions[index].is_closed() {
            debug!(session_id = %session_id, "Checkout of closed session ignored");
            return Err(CheckoutError::AlreadyClosed(session_id.clone()));
        }

        let prior = self.sessions[index].clone();
        let duration = elapsed_minutes(prior.checkin_time, now);
        self.sessions[index].close(now, duration, SessionEndReason::CheckedOut);

        if let Err(e) = self.persist() {
            self.sessions[index] = prior;
            return Err(CheckoutError::store(e.to_string()));
        }

        let closed = self.sessions[index].clone();
        self.audit(
            now,
            AuditEventType::CheckedOut {
                session_id: closed.id.clone(),
                member_id: closed.member_id.clone(),
                duration_minutes: duration,
            },
        );

        info!(
            session_id = %closed.id,
            member_id = %closed.member_id,
            duration_minutes = duration,
            "Member checked out"
        );

        Ok(closed)
    }

    /// Sweep with the configured timeout
    pub fn sweep(&mut self, now: DateTime<Utc>) -> StoreResult<Vec<AttendanceSession>> {
        let timeout = self.policy.auto_checkout_minutes;
        self.sweep_stale_open_sessions(now, timeout)
    }

    /// Force-close every open session that checked in more than
    /// `timeout_minutes` before `now`. Closed sessions get
    /// `checkout_time = checkin_time + timeout` and `duration = timeout`.
    ///
    /// Returns the sessions closed by this pass; the collection is saved
    /// once, and only when something was closed.
    pub fn sweep_stale_open_sessions(
        &mut self,
        now: DateTime<Utc>,
        timeout_minutes: u32,
    ) -> StoreResult<Vec<AttendanceSession>> {
        self.reload()?;

        let timeout = Duration::minutes(i64::from(timeout_minutes));
        let cutoff = now - timeout;

        let stale: Vec<usize> = self
            .sessions
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_open() && s.checkin_time < cutoff)
            .map(|(i, _)| i)
            .collect();

        if stale.is_empty() {
            debug!("Sweep found no stale sessions");
            return Ok(Vec::new());
        }

        let snapshot = self.sessions.clone();
        for &i in &stale {
            let session = &mut self.sessions[i];
            let checkout = session.checkin_time + timeout;
            session.close(checkout, timeout_minutes, SessionEndReason::AutoTimeout);
        }

        if let Err(e) = self.persist() {
            self.sessions = snapshot;
            warn!(error = %e, "Sweep could not be saved, rolled back");
            return Err(e);
        }

        let closed: Vec<AttendanceSession> =
            stale.iter().map(|&i| self.sessions[i].clone()).collect();

        for session in &closed {
            self.audit(
                now,
                AuditEventType::AutoCheckedOut {
                    session_id: session.id.clone(),
                    member_id: session.member_id.clone(),
                    duration_minutes: timeout_minutes,
                },
            );
            info!(
                session_id = %session.id,
                member_id = %session.member_id,
                "Stale session auto checked out"
            );
        }

        info!(closed = closed.len(), timeout_minutes, "Sweep complete");
        Ok(closed)
    }

    /// Membership standing plus any open session, for a phone or id lookup
    pub fn standing(&self, lookup: &str, now: DateTime<Utc>) -> Result<MemberStanding, CheckinError> {
        let directory =
            Directory::load(&self.repos).map_err(|e| CheckinError::store(e.to_string()))?;
        let member = directory
            .find_member(lookup)
            .ok_or_else(|| CheckinError::MemberNotFound(lookup.trim().to_string()))?;

        Ok(MemberStanding {
            status: membership_status_within(member, now, self.policy.expiring_soon_days),
            days_until_expiry: days_until_expiry(member, now),
            open_session: self.open_session_for(&member.id).cloned(),
            member: member.clone(),
        })
    }

    /// Every session, in check-in order
    pub fn sessions(&self) -> &[AttendanceSession] {
        &self.sessions
    }

    pub fn open_sessions(&self) -> Vec<&AttendanceSession> {
        self.sessions.iter().filter(|s| s.is_open()).collect()
    }

    pub fn open_session_for(&self, member_id: &MemberId) -> Option<&AttendanceSession> {
        self.sessions
            .iter()
            .find(|s| s.is_open() && &s.member_id == member_id)
    }

    pub fn get(&self, session_id: &SessionId) -> Option<&AttendanceSession> {
        self.sessions.iter().find(|s| &s.id == session_id)
    }

    /// Most recent check-ins, newest first
    pub fn recent_checkins(&self, limit: usize) -> Vec<&AttendanceSession> {
        let mut recent: Vec<&AttendanceSession> = self.sessions.iter().collect();
        recent.sort_by(|a, b| b.checkin_time.cmp(&a.checkin_time));
        recent.truncate(limit);
        recent
    }

    fn persist(&self) -> StoreResult<()> {
        self.repos.sessions.save(&self.sessions)
    }

    fn audit(&self, at: DateTime<Utc>, event: AuditEventType) {
        if let Err(e) = self.repos.audit.append_audit(AuditEvent::at(at, event)) {
            warn!(error = %e, "Failed to append audit event");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use gymtrack_api::{Member, MemberStatus, MembershipPlan, Room};
    use gymtrack_store::{AuditLog, MemoryStore, Repository, StoreError};
    use gymtrack_util::{BranchId, RoomId};
    use std::sync::Arc;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 10, 8, 0, 0).unwrap()
    }

    fn member(id: &str, phone: &str, room: &str) -> Member {
        Member::new(
            id,
            format!("Member {id}"),
            phone,
            "b-1",
            room,
            MembershipPlan::ThreeMonths,
            NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
        )
    }

    fn room(id: &str, capacity: u32) -> Room {
        Room {
            id: RoomId::new(id),
            branch_id: BranchId::new("b-1"),
            name: format!("Room {id}"),
            capacity,
            is_active: true,
        }
    }

    fn setup(members: &[Member], rooms: &[Room]) -> (Arc<MemoryStore>, SessionLedger) {
        let store = Arc::new(MemoryStore::new());
        Repository::<Member>::save(store.as_ref(), members).unwrap();
        Repository::<Room>::save(store.as_ref(), rooms).unwrap();
        let repos = Repositories::from_store(store.clone());
        let ledger = SessionLedger::load(repos, AttendancePolicy::default()).unwrap();
        (store, ledger)
    }

    fn default_setup() -> (Arc<MemoryStore>, SessionLedger) {
        setup(
            &[member("m-1", "555-0100", "r-1"), member("m-2", "555-0200", "r-1")],
            &[room("r-1", 20)],
        )
    }

    #[test]
    fn check_in_opens_session_and_persists() {
        let (store, mut ledger) = default_setup();

        let checkin = ledger.check_in(" 555-0100 ", t0()).unwrap();
        assert_eq!(checkin.session.member_id, MemberId::new("m-1"));
        assert_eq!(checkin.session.checkin_time, t0());
        assert_eq!(checkin.membership, MemberStatus::Active);
        assert!(checkin.capacity_warning.is_none());

        let saved: Vec<AttendanceSession> = store.load().unwrap();
        assert_eq!(saved, vec![checkin.session]);
    }

    #[test]
    fn check_in_by_member_id() {
        let (_, mut ledger) = default_setup();
        let checkin = ledger.check_in("m-2", t0()).unwrap();
        assert_eq!(checkin.session.member_id, MemberId::new("m-2"));
    }

    #[test]
    fn unknown_or_blank_lookup_is_not_found() {
        let (store, mut ledger) = default_setup();

        assert!(matches!(
            ledger.check_in("555-9999", t0()),
            Err(CheckinError::MemberNotFound(_))
        ));
        assert!(matches!(
            ledger.check_in("   ", t0()),
            Err(CheckinError::MemberNotFound(_))
        ));
        assert!(ledger.sessions().is_empty());

        let audits = store.recent_audits(1).unwrap();
        assert!(matches!(
            &audits[0].event,
            AuditEventType::CheckinDenied { reason, .. } if reason == "member_not_found"
        ));
    }

    #[test]
    fn double_check_in_is_rejected() {
        let (_, mut ledger) = default_setup();

        let first = ledger.check_in("555-0100", t0()).unwrap();
        let second = ledger.check_in("m-1", t0() + Duration::minutes(5));

        assert_eq!(
            second,
            Err(CheckinError::AlreadyCheckedIn {
                member_id: MemberId::new("m-1"),
                session_id: first.session.id,
            })
        );
        assert_eq!(ledger.open_sessions().len(), 1);
    }

    #[test]
    fn expired_membership_is_rejected() {
        let mut expired = member("m-3", "555-0300", "r-1");
        expired.end_date = t0().date_naive() - Duration::days(1);
        let (_, mut ledger) = setup(&[expired], &[room("r-1", 20)]);

        let result = ledger.check_in("555-0300", t0());
        assert!(matches!(result, Err(CheckinError::MembershipExpired { .. })));
        assert!(ledger.sessions().is_empty());
    }

    #[test]
    fn expiring_soon_membership_is_admitted() {
        let mut soon = member("m-3", "555-0300", "r-1");
        soon.end_date = t0().date_naive() + Duration::days(3);
        let (_, mut ledger) = setup(&[soon], &[room("r-1", 20)]);

        let checkin = ledger.check_in("555-0300", t0()).unwrap();
        assert_eq!(checkin.membership, MemberStatus::ExpiringSoon);
    }

    #[test]
    fn expiry_is_checked_before_open_session() {
        let mut lapsing = member("m-3", "555-0300", "r-1");
        lapsing.end_date = t0().date_naive() + Duration::days(1);
        let (_, mut ledger) = setup(&[lapsing], &[room("r-1", 20)]);

        ledger.check_in("555-0300", t0()).unwrap();
        let result = ledger.check_in("555-0300", t0() + Duration::days(3));
        assert!(matches!(result, Err(CheckinError::MembershipExpired { .. })));
    }

    #[test]
    fn full_room_admits_with_warning() {
        let (_, mut ledger) = setup(
            &[
                member("m-1", "555-0100", "r-1"),
                member("m-2", "555-0200", "r-1"),
                member("m-3", "555-0300", "r-1"),
            ],
            &[room("r-1", 2)],
        );

        assert!(ledger.check_in("555-0100", t0()).unwrap().capacity_warning.is_none());
        assert!(ledger.check_in("555-0200", t0()).unwrap().capacity_warning.is_none());

        let third = ledger.check_in("555-0300", t0()).unwrap();
        let warning = third.capacity_warning.unwrap();
        assert_eq!(warning.occupancy, 2);
        assert_eq!(warning.capacity, 2);

        let in_room = ledger
            .open_sessions()
            .into_iter()
            .filter(|s| s.room_id == RoomId::new("r-1"))
            .count();
        assert_eq!(in_room, 3);
    }

    #[test]
    fn unresolved_room_gives_no_warning() {
        let (_, mut ledger) = setup(&[member("m-1", "555-0100", "r-gone")], &[]);
        let checkin = ledger.check_in("555-0100", t0()).unwrap();
        assert!(checkin.capacity_warning.is_none());
        assert_eq!(checkin.session.room_id, RoomId::new("r-gone"));
    }

    #[test]
    fn checkout_floors_elapsed_minutes() {
        let (_, mut ledger) = default_setup();
        let session = ledger.check_in("555-0100", t0()).unwrap().session;

        // 119.9 minutes
        let later = t0() + Duration::seconds(119 * 60 + 54);
        let closed = ledger.check_out(&session.id, later).unwrap();

        assert_eq!(closed.checkout_time, Some(later));
        assert_eq!(closed.duration, Some(119));
        assert_eq!(closed.end_reason, Some(SessionEndReason::CheckedOut));
    }

    #[test]
    fn checkout_at_exact_timeout_is_still_manual() {
        let (store, mut ledger) = default_setup();
        let session = ledger.check_in("555-0100", t0()).unwrap().session;

        let closed = ledger
            .check_out(&session.id, t0() + Duration::minutes(120))
            .unwrap();
        assert_eq!(closed.duration, Some(120));
        assert_eq!(closed.end_reason, Some(SessionEndReason::CheckedOut));

        let saved: Vec<AttendanceSession> = store.load().unwrap();
        assert_eq!(saved[0].end_reason, Some(SessionEndReason::CheckedOut));
    }

    #[test]
    fn checkout_before_checkin_clamps_to_zero() {
        let (_, mut ledger) = default_setup();
        let session = ledger.check_in("555-0100", t0()).unwrap().session;

        let closed = ledger
            .check_out(&session.id, t0() - Duration::minutes(3))
            .unwrap();
        assert_eq!(closed.duration, Some(0));
    }

    #[test]
    fn second_checkout_is_rejected_and_changes_nothing() {
        let (_, mut ledger) = default_setup();
        let session = ledger.check_in("555-0100", t0()).unwrap().session;

        let first = ledger
            .check_out(&session.id, t0() + Duration::minutes(45))
            .unwrap();
        let second = ledger.check_out(&session.id, t0() + Duration::minutes(90));

        assert_eq!(second, Err(CheckoutError::AlreadyClosed(session.id.clone())));
        assert_eq!(ledger.get(&session.id), Some(&first));
    }

    #[test]
    fn checkout_of_unknown_session() {
        let (_, mut ledger) = default_setup();
        let id = SessionId::new();
        assert_eq!(
            ledger.check_out(&id, t0()),
            Err(CheckoutError::SessionNotFound(id.clone()))
        );
    }

    #[test]
    fn sweep_closes_stale_sessions_at_timeout() {
        let (_, mut ledger) = default_setup();
        let stale = ledger.check_in("555-0100", t0()).unwrap().session;
        let fresh = ledger
            .check_in("555-0200", t0() + Duration::minutes(60))
            .unwrap()
            .session;

        let closed = ledger.sweep(t0() + Duration::minutes(125)).unwrap();
        assert_eq!(closed.len(), 1);
        assert_eq!(closed[0].id, stale.id);
        assert_eq!(closed[0].checkout_time, Some(t0() + Duration::minutes(120)));
        assert_eq!(closed[0].duration, Some(120));
        assert_eq!(closed[0].end_reason, Some(SessionEndReason::AutoTimeout));

        assert!(ledger.get(&fresh.id).unwrap().is_open());
    }

    #[test]
    fn sweep_is_idempotent() {
        let (_, mut ledger) = default_setup();
        ledger.check_in("555-0100", t0()).unwrap();

        let now = t0() + Duration::minutes(200);
        assert_eq!(ledger.sweep(now).unwrap().len(), 1);
        assert_eq!(ledger.sweep(now).unwrap().len(), 0);
    }

    #[test]
    fn sweep_threshold_is_strict() {
        let (_, mut ledger) = default_setup();
        ledger.check_in("555-0100", t0()).unwrap();

        let closed = ledger
            .sweep_stale_open_sessions(t0() + Duration::minutes(120), 120)
            .unwrap();
        assert!(closed.is_empty());
    }

    #[test]
    fn member_can_return_after_checkout() {
        let (_, mut ledger) = default_setup();
        let first = ledger.check_in("555-0100", t0()).unwrap().session;
        ledger
            .check_out(&first.id, t0() + Duration::minutes(30))
            .unwrap();

        let again = ledger.check_in("555-0100", t0() + Duration::minutes(40));
        assert!(again.is_ok());
        assert_eq!(ledger.sessions().len(), 2);
    }

    #[test]
    fn failed_save_rolls_back_check_in() {
        let (store, mut ledger) = default_setup();
        store.set_read_only(true);

        let result = ledger.check_in("555-0100", t0());
        assert!(matches!(result, Err(CheckinError::Store(_))));
        assert!(ledger.sessions().is_empty());
    }

    #[test]
    fn failed_save_rolls_back_checkout_and_sweep() {
        let (store, mut ledger) = default_setup();
        let session = ledger.check_in("555-0100", t0()).unwrap().session;
        store.set_read_only(true);

        let result = ledger.check_out(&session.id, t0() + Duration::minutes(10));
        assert!(matches!(result, Err(CheckoutError::Store(_))));
        assert!(ledger.get(&session.id).unwrap().is_open());

        let result = ledger.sweep(t0() + Duration::minutes(300));
        assert!(matches!(result, Err(StoreError::ReadOnly)));
        assert!(ledger.get(&session.id).unwrap().is_open());
    }

    #[test]
    fn recent_checkins_newest_first() {
        let (_, mut ledger) = setup(
            &[
                member("m-1", "555-0100", "r-1"),
                member("m-2", "555-0200", "r-1"),
                member("m-3", "555-0300", "r-1"),
            ],
            &[room("r-1", 20)],
        );
        ledger.check_in("555-0100", t0()).unwrap();
        ledger.check_in("555-0200", t0() + Duration::minutes(2)).unwrap();
        ledger.check_in("555-0300", t0() + Duration::minutes(1)).unwrap();

        let recent: Vec<&str> = ledger
            .recent_checkins(2)
            .into_iter()
            .map(|s| s.member_id.as_str())
            .collect();
        assert_eq!(recent, vec!["m-2", "m-3"]);
    }

    #[test]
    fn standing_reports_open_session() {
        let (_, mut ledger) = default_setup();
        let session = ledger.check_in("555-0100", t0()).unwrap().session;

        let standing = ledger.standing("m-1", t0()).unwrap();
        assert_eq!(standing.status, MemberStatus::Active);
        assert_eq!(standing.open_session, Some(session));

        assert!(matches!(
            ledger.standing("nobody", t0()),
            Err(CheckinError::MemberNotFound(_))
        ));
    }

    #[test]
    fn writes_from_another_ledger_survive_a_sweep() {
        let (store, mut front_desk) = default_setup();
        let first = front_desk.check_in("555-0100", t0()).unwrap().session;

        // A second handle on the same store, loaded while m-1 was inside
        let repos = Repositories::from_store(store.clone());
        let mut daemon = SessionLedger::load(repos, AttendancePolicy::default()).unwrap();

        front_desk
            .check_out(&first.id, t0() + Duration::minutes(60))
            .unwrap();
        let second = front_desk
            .check_in("555-0200", t0() + Duration::minutes(60))
            .unwrap()
            .session;

        let closed = daemon.sweep(t0() + Duration::minutes(125)).unwrap();
        assert!(closed.is_empty());

        let saved: Vec<AttendanceSession> = store.load().unwrap();
        assert_eq!(saved.len(), 2);
        let saved_first = saved.iter().find(|s| s.id == first.id).unwrap();
        assert_eq!(saved_first.duration, Some(60));
        assert_eq!(saved_first.end_reason, Some(SessionEndReason::CheckedOut));
        assert!(saved.iter().any(|s| s.id == second.id && s.is_open()));

        // The stale handle still refuses a double check-in it never saw
        assert!(matches!(
            daemon.check_in("m-2", t0() + Duration::minutes(70)),
            Err(CheckinError::AlreadyCheckedIn { .. })
        ));
        assert_eq!(
            daemon.check_out(&first.id, t0() + Duration::minutes(70)),
            Err(CheckoutError::AlreadyClosed(first.id.clone()))
        );
    }

    #[test]
    fn reload_sees_persisted_sessions() {
        let (store, mut ledger) = default_setup();
        ledger.check_in("555-0100", t0()).unwrap();

        let repos = Repositories::from_store(store);
        let reloaded = SessionLedger::load(repos, AttendancePolicy::default()).unwrap();
        assert_eq!(reloaded.open_sessions().len(), 1);
        assert!(reloaded.open_session_for(&MemberId::new("m-1")).is_some());
    }
}
