//! Integration tests for gymtrackd
//!
//! These tests verify end-to-end behavior across config, store, ledger
//! service and reports, using an on-disk SQLite store.

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use gymtrack_api::{Branch, Member, MemberStatus, MembershipPlan, Room, SessionEndReason};
use gymtrack_config::{AttendancePolicy, parse_config};
use gymtrack_core::{
    Directory, LedgerService, SessionLedger, daily_export, daily_report, monthly_report,
};
use gymtrack_store::{AuditEventType, AuditLog, Repositories, SqliteStore};
use gymtrack_util::{BranchId, CheckinError, CheckoutError, ManualClock, RoomId};
use std::sync::Arc;

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 6, 30, 0).unwrap()
}

fn directory() -> Directory {
    let start = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
    let mut lapsed = Member::new(
        "m-3",
        "Lee Park",
        "555-0300",
        "b-1",
        "r-1",
        MembershipPlan::OneMonth,
        start,
    );
    lapsed.end_date = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();

    Directory {
        members: vec![
            Member::new("m-1", "Dana Reyes", "555-0100", "b-1", "r-1", MembershipPlan::SixMonths, start),
            Member::new("m-2", "Sam Ito", "555-0200", "b-1", "r-1", MembershipPlan::SixMonths, start),
            lapsed,
            Member::new("m-4", "Ada Cole", "555-0400", "b-1", "r-1", MembershipPlan::SixMonths, start),
        ],
        branches: vec![Branch {
            id: BranchId::new("b-1"),
            name: "Downtown".into(),
            code: "DT".into(),
            address: "1 Main St".into(),
            open_hours: "06:00-22:00".into(),
            is_active: true,
            created_at: None,
        }],
        rooms: vec![Room {
            id: RoomId::new("r-1"),
            branch_id: BranchId::new("b-1"),
            name: "Weights".into(),
            capacity: 2,
            is_active: true,
        }],
    }
}

async fn start(
    store: Arc<SqliteStore>,
    clock: Arc<ManualClock>,
) -> LedgerService {
    let config = parse_config(
        r#"
        config_version = 1

        [attendance]
        auto_checkout_minutes = 120
        sweep_interval_seconds = 3600
        "#,
    )
    .unwrap();

    let repos = Repositories::from_store(store);
    let ledger = SessionLedger::load(repos, config.attendance).unwrap();
    LedgerService::start(ledger, clock).await
}

#[tokio::test]
async fn test_front_desk_day() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(SqliteStore::open(dir.path().join("gymtrack.db")).unwrap());
    directory()
        .import(&Repositories::from_store(store.clone()))
        .unwrap();

    let clock = Arc::new(ManualClock::new(t0()));
    let service = start(store.clone(), clock.clone()).await;

    // Expired membership is turned away
    assert!(matches!(
        service.check_in("555-0300").await,
        Err(CheckinError::MembershipExpired { .. })
    ));

    // Room of two fills up, third member still admitted with a warning
    let dana = service.check_in("555-0100").await.unwrap().session;
    let sam = service.check_in("m-2").await.unwrap().session;
    let ada = service.check_in(" 555-0400 ").await.unwrap();
    assert!(ada.capacity_warning.is_some());
    assert_eq!(ada.membership, MemberStatus::Active);
    assert_eq!(service.open_sessions().await.len(), 3);

    // Double check-in
    assert!(matches!(
        service.check_in("555-0100").await,
        Err(CheckinError::AlreadyCheckedIn { .. })
    ));

    // Dana leaves after 59.5 minutes
    clock.advance(Duration::seconds(59 * 60 + 30));
    let closed = service.check_out(&dana.id).await.unwrap();
    assert_eq!(closed.duration, Some(59));
    assert_eq!(
        service.check_out(&dana.id).await,
        Err(CheckoutError::AlreadyClosed(dana.id.clone()))
    );

    // Everyone else forgets to check out
    clock.set(t0() + Duration::minutes(125));
    assert_eq!(service.sweep_now().await.unwrap(), 2);
    assert_eq!(service.sweep_now().await.unwrap(), 0);

    let swept = service.get(&sam.id).await.unwrap();
    assert_eq!(swept.checkout_time, Some(t0() + Duration::minutes(120)));
    assert_eq!(swept.duration, Some(120));

    service.shutdown().await;

    // Everything survived on disk
    let reopened = Arc::new(SqliteStore::open(dir.path().join("gymtrack.db")).unwrap());
    let service = start(reopened.clone(), Arc::new(ManualClock::new(t0() + Duration::hours(3)))).await;
    let sessions = service.sessions().await;
    assert_eq!(sessions.len(), 3);
    assert!(sessions.iter().all(|s| s.is_closed()));

    let report = daily_report(&sessions, t0().date_naive());
    assert_eq!(report.total_sessions, 3);
    assert_eq!(report.unique_members, 3);
    assert_eq!(report.total_minutes, 299);
    assert_eq!(report.average_minutes, 100);

    let table = daily_export(&report, &service.directory().await.unwrap());
    assert_eq!(table.rows.len(), 3);
    assert!(table.rows.iter().any(|r| r[0] == "Dana Reyes" && r[6] == "59 mins"));

    let monthly = monthly_report(&sessions, 2026, 3);
    assert_eq!(monthly.unique_members, 3);
    assert_eq!(monthly.average_sessions_per_member, 1.0);

    service.shutdown().await;

    // Audit trail recorded the day
    let audits = reopened.recent_audits(50).unwrap();
    let auto = audits
        .iter()
        .filter(|a| matches!(a.event, AuditEventType::AutoCheckedOut { .. }))
        .count();
    assert_eq!(auto, 2);
    assert!(audits.iter().any(|a| matches!(
        &a.event,
        AuditEventType::CheckinDenied { reason, .. } if reason == "membership_expired"
    )));
    assert!(audits.iter().any(|a| matches!(
        a.event,
        AuditEventType::CheckedIn { over_capacity: true, .. }
    )));
}

#[tokio::test]
async fn test_restart_sweeps_stale_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gymtrack.db");
    let store = Arc::new(SqliteStore::open(&path).unwrap());
    directory()
        .import(&Repositories::from_store(store.clone()))
        .unwrap();

    let service = start(store, Arc::new(ManualClock::new(t0()))).await;
    let session = service.check_in("555-0100").await.unwrap().session;
    service.shutdown().await;
    drop(service);

    // Service was down overnight
    let store = Arc::new(SqliteStore::open(&path).unwrap());
    let clock = Arc::new(ManualClock::new(t0() + Duration::hours(20)));
    let service = start(store, clock).await;

    let reloaded = service.get(&session.id).await.unwrap();
    assert_eq!(reloaded.duration, Some(120));

    // Member can check in again the next morning
    assert!(service.check_in("555-0100").await.is_ok());
    service.shutdown().await;
}

#[tokio::test]
async fn test_one_shot_commands_alongside_running_service() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gymtrack.db");
    let store = Arc::new(SqliteStore::open(&path).unwrap());
    directory()
        .import(&Repositories::from_store(store.clone()))
        .unwrap();

    // Long-running service
    let clock = Arc::new(ManualClock::new(t0()));
    let service = start(store, clock.clone()).await;
    let dana = service.check_in("555-0100").await.unwrap().session;

    // Separate process with its own connection and ledger
    let one_shot = Repositories::from_store(Arc::new(SqliteStore::open(&path).unwrap()));
    let mut cli = SessionLedger::load(one_shot, AttendancePolicy::default()).unwrap();
    let closed = cli.check_out(&dana.id, t0() + Duration::minutes(60)).unwrap();
    assert_eq!(closed.duration, Some(60));
    let sam = cli
        .check_in("555-0200", t0() + Duration::minutes(60))
        .unwrap()
        .session;

    clock.set(t0() + Duration::minutes(125));
    assert_eq!(service.sweep_now().await.unwrap(), 0);

    let sessions = service.sessions().await;
    assert_eq!(sessions.len(), 2);
    let dana_saved = sessions.iter().find(|s| s.id == dana.id).unwrap();
    assert_eq!(dana_saved.duration, Some(60));
    assert_eq!(dana_saved.end_reason, Some(SessionEndReason::CheckedOut));
    assert!(sessions.iter().any(|s| s.id == sam.id && s.is_open()));

    assert!(matches!(
        service.check_in("555-0200").await,
        Err(CheckinError::AlreadyCheckedIn { .. })
    ));
    service.shutdown().await;
}

#[test]
fn test_directory_snapshot_json() {
    let json = r#"{
        "members": [{
            "id": "m-1",
            "fullName": "Dana Reyes",
            "phone": "555-0100",
            "branchId": "b-1",
            "roomId": "r-1",
            "membershipPlan": "3-months",
            "startDate": "2026-01-10",
            "endDate": "2026-04-10"
        }],
        "rooms": [{ "id": "r-1", "branchId": "b-1", "name": "Weights", "capacity": 12 }]
    }"#;

    let snapshot: Directory = serde_json::from_str(json).unwrap();
    assert_eq!(snapshot.members.len(), 1);
    assert!(snapshot.branches.is_empty());
    assert!(snapshot.rooms[0].is_active);
}
