//! Directory and attendance records

use chrono::{DateTime, NaiveDate, Utc};
use gymtrack_util::{BranchId, MemberId, RoomId, SessionId};
use serde::{Deserialize, Serialize};

use crate::{calculate_end_date, MemberStatus, MembershipPlan};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Other,
}

/// A gym member as supplied by the member directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: MemberId,
    pub full_name: String,
    #[serde(default)]
    pub gender: Gender,
    pub phone: String,
    #[serde(default)]
    pub birthday: Option<NaiveDate>,
    #[serde(default)]
    pub address: String,
    pub branch_id: BranchId,
    /// Assigned home room
    pub room_id: RoomId,
    pub membership_plan: MembershipPlan,
    pub start_date: NaiveDate,
    /// Stored, not derived on read: `start_date` + plan months at the time
    /// the plan was last set.
    pub end_date: NaiveDate,
    #[serde(default)]
    pub photo_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_true() -> bool {
    true
}

impl Member {
    /// New active member with `end_date` computed from the plan
    pub fn new(
        id: impl Into<MemberId>,
        full_name: impl Into<String>,
        phone: impl Into<String>,
        branch_id: impl Into<BranchId>,
        room_id: impl Into<RoomId>,
        plan: MembershipPlan,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            full_name: full_name.into(),
            gender: Gender::default(),
            phone: phone.into(),
            birthday: None,
            address: String::new(),
            branch_id: branch_id.into(),
            room_id: room_id.into(),
            membership_plan: plan,
            start_date,
            end_date: calculate_end_date(start_date, plan),
            photo_url: None,
            is_active: true,
            created_at: None,
        }
    }

    /// Change plan and/or start date, recomputing `end_date` once
    pub fn set_plan(&mut self, plan: MembershipPlan, start_date: NaiveDate) {
        self.membership_plan = plan;
        self.start_date = start_date;
        self.end_date = calculate_end_date(start_date, plan);
    }

    /// Whether `key` (already trimmed) identifies this member by phone or id
    pub fn matches_lookup(&self, key: &str) -> bool {
        self.phone.trim() == key || self.id.as_str() == key
    }
}

/// A physical gym location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub id: BranchId,
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub open_hours: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A room within a branch. `capacity` is advisory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: RoomId,
    pub branch_id: BranchId,
    pub name: String,
    pub capacity: u32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// One open→closed presence interval of a member inside a room.
///
/// `branch_id`/`room_id` are copied from the member at check-in and are
/// never re-resolved. `duration` and `end_reason` are only present once
/// `checkout_time` is set. Records written before `end_reason` existed
/// load with it unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSession {
    pub id: SessionId,
    pub member_id: MemberId,
    pub branch_id: BranchId,
    pub room_id: RoomId,
    pub checkin_time: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkout_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_reason: Option<SessionEndReason>,
}

impl AttendanceSession {
    /// Open a session for `member`, snapshotting its current branch and room
    pub fn open(member: &Member, now: DateTime<Utc>) -> Self {
        Self {
            id: SessionId::new(),
            member_id: member.id.clone(),
            branch_id: member.branch_id.clone(),
            room_id: member.room_id.clone(),
            checkin_time: now,
            checkout_time: None,
            duration: None,
            end_reason: None,
        }
    }

    /// Close the session
    pub fn close(&mut self, at: DateTime<Utc>, duration: u32, reason: SessionEndReason) {
        self.checkout_time = Some(at);
        self.duration = Some(duration);
        self.end_reason = Some(reason);
    }

    pub fn is_open(&self) -> bool {
        self.checkout_time.is_none()
    }

    pub fn is_closed(&self) -> bool {
        self.checkout_time.is_some()
    }

    /// Calendar day (UTC) of the check-in
    pub fn checkin_date(&self) -> NaiveDate {
        self.checkin_time.date_naive()
    }
}

/// Raised when admitting one more occupant meets or exceeds room capacity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapacityWarning {
    pub room_id: RoomId,
    /// Open sessions in the room before this check-in
    pub occupancy: usize,
    pub capacity: u32,
}

/// Outcome of a successful check-in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckIn {
    pub session: AttendanceSession,
    /// Membership standing at check-in time (never `Expired`)
    pub membership: MemberStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity_warning: Option<CapacityWarning>,
}

/// How a session came to be closed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionEndReason {
    /// Staff or member checked out
    CheckedOut,
    /// Closed by the stale-session sweep
    AutoTimeout,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_member() -> Member {
        Member::new(
            "m-1",
            "Dana Reyes",
            "555-0100",
            "b-1",
            "r-1",
            MembershipPlan::ThreeMonths,
            NaiveDate::from_ymd_opt(2026, 1, 10).unwrap(),
        )
    }

    #[test]
    fn new_member_derives_end_date() {
        let member = sample_member();
        assert_eq!(member.end_date, NaiveDate::from_ymd_opt(2026, 4, 10).unwrap());
    }

    #[test]
    fn set_plan_recomputes_end_date() {
        let mut member = sample_member();
        member.set_plan(
            MembershipPlan::OneMonth,
            NaiveDate::from_ymd_opt(2026, 5, 1).unwrap(),
        );
        assert_eq!(member.end_date, NaiveDate::from_ymd_opt(2026, 6, 1).unwrap());
    }

    #[test]
    fn lookup_matches_phone_or_id() {
        let member = sample_member();
        assert!(member.matches_lookup("555-0100"));
        assert!(member.matches_lookup("m-1"));
        assert!(!member.matches_lookup("555-0199"));
    }

    #[test]
    fn open_session_snapshots_assignment() {
        let mut member = sample_member();
        let now = Utc.with_ymd_and_hms(2026, 2, 1, 7, 0, 0).unwrap();
        let session = AttendanceSession::open(&member, now);

        member.room_id = RoomId::new("r-2");

        assert!(session.is_open());
        assert_eq!(session.room_id, RoomId::new("r-1"));
        assert_eq!(session.branch_id, BranchId::new("b-1"));
        assert_eq!(session.checkin_date(), NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
    }

    #[test]
    fn session_json_uses_camel_case_and_omits_open_fields() {
        let member = sample_member();
        let now = Utc.with_ymd_and_hms(2026, 2, 1, 7, 0, 0).unwrap();
        let session = AttendanceSession::open(&member, now);

        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["memberId"], "m-1");
        assert_eq!(json["checkinTime"], "2026-02-01T07:00:00Z");
        assert!(json.get("checkoutTime").is_none());
        assert!(json.get("duration").is_none());
        assert!(json.get("endReason").is_none());
    }

    #[test]
    fn closed_session_records_end_reason() {
        let member = sample_member();
        let now = Utc.with_ymd_and_hms(2026, 2, 1, 7, 0, 0).unwrap();
        let mut session = AttendanceSession::open(&member, now);
        session.close(now + chrono::Duration::minutes(120), 120, SessionEndReason::CheckedOut);

        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["endReason"], "checked_out");
        assert_eq!(json["duration"], 120);

        let legacy = r#"{
            "id": "8c3a4f51-2d7e-4b8a-9f0e-1a2b3c4d5e6f",
            "memberId": "m-1",
            "branchId": "b-1",
            "roomId": "r-1",
            "checkinTime": "2026-02-01T07:00:00Z",
            "checkoutTime": "2026-02-01T08:00:00Z",
            "duration": 60
        }"#;
        let loaded: AttendanceSession = serde_json::from_str(legacy).unwrap();
        assert!(loaded.is_closed());
        assert_eq!(loaded.end_reason, None);
    }

    #[test]
    fn member_parses_with_profile_defaults() {
        let json = r#"{
            "id": "m-9",
            "fullName": "Sam Ito",
            "phone": "555-0109",
            "branchId": "b-1",
            "roomId": "r-1",
            "membershipPlan": "1-month",
            "startDate": "2026-01-01",
            "endDate": "2026-02-01"
        }"#;

        let member: Member = serde_json::from_str(json).unwrap();
        assert!(member.is_active);
        assert_eq!(member.gender, Gender::Other);
        assert_eq!(member.membership_plan, MembershipPlan::OneMonth);
    }
}
