//! Tabular export rows for reports
//!
//! Names are resolved through a directory snapshot. A missing member name
//! renders as `Unknown`, any other missing value as `N/A`.

use chrono::NaiveDate;
use gymtrack_api::AttendanceSession;
use gymtrack_util::format_clock_time;

use crate::{DailyReport, Directory, MemberReport, MonthlyReport};

const UNKNOWN: &str = "Unknown";
const NOT_AVAILABLE: &str = "N/A";

/// Header row plus data rows, ready for a serializer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportTable {
    pub filename: String,
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

fn or_na(value: Option<&str>) -> String {
    value.unwrap_or(NOT_AVAILABLE).to_string()
}

fn minutes_label(minutes: u64) -> String {
    format!("{minutes} mins")
}

/// Checkout time and duration cells; a session closed after zero minutes
/// still shows its duration
fn checkout_cells(session: &AttendanceSession) -> [String; 2] {
    [
        session
            .checkout_time
            .as_ref()
            .map(format_clock_time)
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        session
            .duration
            .map(|d| minutes_label(u64::from(d)))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
    ]
}

/// `Mar 2, 2026`
fn display_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

pub fn daily_export(report: &DailyReport, directory: &Directory) -> ExportTable {
    let rows = report
        .sessions
        .iter()
        .map(|s| {
            let member = directory.member(&s.member_id);
            let [checkout, duration] = checkout_cells(s);
            vec![
                member
                    .map(|m| m.full_name.clone())
                    .unwrap_or_else(|| UNKNOWN.to_string()),
                or_na(member.map(|m| m.phone.as_str())),
                or_na(directory.branch_name(&s.branch_id)),
                or_na(directory.room_name(&s.room_id)),
                format_clock_time(&s.checkin_time),
                checkout,
                duration,
            ]
        })
        .collect();

    ExportTable {
        filename: format!("gym-daily-report-{}.csv", report.date),
        headers: vec!["Member", "Phone", "Branch", "Room", "CheckIn", "CheckOut", "Duration"],
        rows,
    }
}

pub fn monthly_export(report: &MonthlyReport, directory: &Directory) -> ExportTable {
    let rows = report
        .members
        .iter()
        .map(|row| {
            let member = directory.member(&row.member_id);
            vec![
                member
                    .map(|m| m.full_name.clone())
                    .unwrap_or_else(|| UNKNOWN.to_string()),
                or_na(member.map(|m| m.phone.as_str())),
                row.visits.to_string(),
                minutes_label(row.total_minutes),
                minutes_label(row.average_minutes),
            ]
        })
        .collect();

    ExportTable {
        filename: format!("gym-monthly-report-{:04}-{:02}.csv", report.year, report.month),
        headers: vec!["Member", "Phone", "TotalVisits", "TotalDuration", "AvgDuration"],
        rows,
    }
}

pub fn member_export(report: &MemberReport, directory: &Directory) -> ExportTable {
    let rows = report
        .history
        .iter()
        .map(|s| {
            let [checkout, duration] = checkout_cells(s);
            vec![
                display_date(s.checkin_date()),
                or_na(directory.branch_name(&s.branch_id)),
                or_na(directory.room_name(&s.room_id)),
                format_clock_time(&s.checkin_time),
                checkout,
                duration,
            ]
        })
        .collect();

    let name = directory
        .member_name(&report.member_id)
        .unwrap_or(report.member_id.as_str());
    let slug = name.split_whitespace().collect::<Vec<_>>().join("-");

    ExportTable {
        filename: format!("gym-member-report-{slug}.csv"),
        headers: vec!["Date", "Branch", "Room", "CheckIn", "CheckOut", "Duration"],
        rows,
    }
}
