//! Membership validation

use chrono::{DateTime, Utc};
use gymtrack_api::{AttendanceSession, Member, MemberStatus};
use serde::Serialize;

/// Days before the end date during which a membership is "expiring soon"
pub const EXPIRING_SOON_DAYS: u32 = 7;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Whole days until the membership ends, rounded up.
///
/// The end date counts from midnight UTC of that day, so a membership that
/// ends today reads 0 for the whole day and -1 from tomorrow on.
pub fn days_until_expiry(member: &Member, now: DateTime<Utc>) -> i64 {
    let end = member.end_date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    let Some(end) = end else {
        return i64::MAX;
    };

    let millis = end.signed_duration_since(now).num_milliseconds();
    let days = millis.div_euclid(MILLIS_PER_DAY);
    if millis.rem_euclid(MILLIS_PER_DAY) == 0 {
        days
    } else {
        days + 1
    }
}

/// Membership standing with the default 7-day window
pub fn membership_status(member: &Member, now: DateTime<Utc>) -> MemberStatus {
    membership_status_within(member, now, EXPIRING_SOON_DAYS)
}

/// Membership standing with a configurable expiring-soon window
pub fn membership_status_within(
    member: &Member,
    now: DateTime<Utc>,
    window_days: u32,
) -> MemberStatus {
    let days = days_until_expiry(member, now);
    if days < 0 {
        MemberStatus::Expired
    } else if days <= i64::from(window_days) {
        MemberStatus::ExpiringSoon
    } else {
        MemberStatus::Active
    }
}

/// A member's standing as shown at the front desk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberStanding {
    pub member: Member,
    pub status: MemberStatus,
    pub days_until_expiry: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_session: Option<AttendanceSession>,
}
