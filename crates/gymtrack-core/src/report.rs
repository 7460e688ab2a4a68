//! Report aggregation
//!
//! Pure functions over a session snapshot. Statistics count closed
//! sessions only and group them by the UTC date of check-in.

use chrono::{Datelike, NaiveDate};
use gymtrack_api::AttendanceSession;
use gymtrack_util::{BranchId, MemberId, RoomId};
use serde::Serialize;
use std::collections::HashSet;

/// Closed sessions checked in on one day
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyReport {
    pub date: NaiveDate,
    pub total_sessions: usize,
    pub unique_members: usize,
    pub total_minutes: u64,
    pub average_minutes: u64,
    pub sessions: Vec<AttendanceSession>,
}

/// One member's line in a monthly report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberMonthlyRow {
    pub member_id: MemberId,
    pub visits: usize,
    pub total_minutes: u64,
    pub average_minutes: u64,
}

/// Closed sessions checked in during one calendar month
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    pub year: i32,
    pub month: u32,
    pub total_sessions: usize,
    pub unique_members: usize,
    pub total_minutes: u64,
    /// Rounded to one decimal place
    pub average_sessions_per_member: f64,
    /// In order of each member's first session in the month
    pub members: Vec<MemberMonthlyRow>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitFrequency {
    Regular,
    #[serde(rename = "none")]
    NoVisits,
}

impl VisitFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            VisitFrequency::Regular => "regular",
            VisitFrequency::NoVisits => "none",
        }
    }
}

/// Attendance history of one member
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberReport {
    pub member_id: MemberId,
    pub total_visits: usize,
    pub total_minutes: u64,
    pub average_minutes: u64,
    pub frequency: VisitFrequency,
    /// Newest first
    pub history: Vec<AttendanceSession>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomCount {
    pub room_id: RoomId,
    pub branch_id: BranchId,
    pub count: usize,
}

/// Who is inside right now
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupancyReport {
    pub open: Vec<AttendanceSession>,
    /// Sorted by room id
    pub per_room: Vec<RoomCount>,
}

fn closed(sessions: &[AttendanceSession]) -> impl Iterator<Item = &AttendanceSession> {
    sessions.iter().filter(|s| s.is_closed())
}

fn total_minutes<'a>(sessions: impl IntoIterator<Item = &'a AttendanceSession>) -> u64 {
    sessions
        .into_iter()
        .map(|s| u64::from(s.duration.unwrap_or_default()))
        .sum()
}

/// Rounded mean, half away from zero; 0 for an empty set
fn rounded_average(total: u64, count: usize) -> u64 {
    if count == 0 {
        return 0;
    }
    (total as f64 / count as f64).round() as u64
}

fn unique_members(sessions: &[AttendanceSession]) -> usize {
    sessions
        .iter()
        .map(|s| &s.member_id)
        .collect::<HashSet<_>>()
        .len()
}

pub fn daily_report(sessions: &[AttendanceSession], date: NaiveDate) -> DailyReport {
    let day: Vec<AttendanceSession> = closed(sessions)
        .filter(|s| s.checkin_date() == date)
        .cloned()
        .collect();

    let total = total_minutes(&day);
    DailyReport {
        date,
        total_sessions: day.len(),
        unique_members: unique_members(&day),
        total_minutes: total,
        average_minutes: rounded_average(total, day.len()),
        sessions: day,
    }
}

pub fn monthly_report(sessions: &[AttendanceSession], year: i32, month: u32) -> MonthlyReport {
    let in_month: Vec<&AttendanceSession> = closed(sessions)
        .filter(|s| {
            let date = s.checkin_date();
            date.year() == year && date.month() == month
        })
        .collect();

    let mut members: Vec<MemberMonthlyRow> = Vec::new();
    for session in &in_month {
        let minutes = u64::from(session.duration.unwrap_or_default());
        match members.iter_mut().find(|r| r.member_id == session.member_id) {
            Some(row) => {
                row.visits += 1;
                row.total_minutes += minutes;
            }
            None => members.push(MemberMonthlyRow {
                member_id: session.member_id.clone(),
                visits: 1,
                total_minutes: minutes,
                average_minutes: 0,
            }),
        }
    }
    for row in &mut members {
        row.average_minutes = rounded_average(row.total_minutes, row.visits);
    }

    let average_sessions_per_member = if members.is_empty() {
        0.0
    } else {
        (in_month.len() as f64 / members.len() as f64 * 10.0).round() / 10.0
    };

    MonthlyReport {
        year,
        month,
        total_sessions: in_month.len(),
        unique_members: members.len(),
        total_minutes: total_minutes(in_month.iter().copied()),
        average_sessions_per_member,
        members,
    }
}

pub fn member_report(sessions: &[AttendanceSession], member_id: &MemberId) -> MemberReport {
    let mut history: Vec<AttendanceSession> = closed(sessions)
        .filter(|s| &s.member_id == member_id)
        .cloned()
        .collect();
    history.sort_by(|a, b| b.checkin_time.cmp(&a.checkin_time));

    let total = total_minutes(&history);
    MemberReport {
        member_id: member_id.clone(),
        total_visits: history.len(),
        total_minutes: total,
        average_minutes: rounded_average(total, history.len()),
        frequency: if history.is_empty() {
            VisitFrequency::NoVisits
        } else {
            VisitFrequency::Regular
        },
        history,
    }
}

/// Open sessions, optionally filtered by branch and/or room, with head counts
pub fn occupancy(
    sessions: &[AttendanceSession],
    branch: Option<&BranchId>,
    room: Option<&RoomId>,
) -> OccupancyReport {
    let open: Vec<AttendanceSession> = sessions
        .iter()
        .filter(|s| s.is_open())
        .filter(|s| branch.is_none_or(|b| &s.branch_id == b))
        .filter(|s| room.is_none_or(|r| &s.room_id == r))
        .cloned()
        .collect();

    let mut per_room: Vec<RoomCount> = Vec::new();
    for session in &open {
        match per_room.iter_mut().find(|c| c.room_id == session.room_id) {
            Some(count) => count.count += 1,
            None => per_room.push(RoomCount {
                room_id: session.room_id.clone(),
                branch_id: session.branch_id.clone(),
                count: 1,
            }),
        }
    }
    per_room.sort_by(|a, b| a.room_id.cmp(&b.room_id));

    OccupancyReport { open, per_room }
}
