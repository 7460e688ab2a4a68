//! Membership plans and status values

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Fixed-length membership plans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MembershipPlan {
    #[serde(rename = "1-month")]
    OneMonth,
    #[serde(rename = "3-months")]
    ThreeMonths,
    #[serde(rename = "6-months")]
    SixMonths,
    #[serde(rename = "12-months")]
    TwelveMonths,
}

impl MembershipPlan {
    pub const ALL: [MembershipPlan; 4] = [
        MembershipPlan::OneMonth,
        MembershipPlan::ThreeMonths,
        MembershipPlan::SixMonths,
        MembershipPlan::TwelveMonths,
    ];

    /// Whole calendar months covered by the plan
    pub fn months(&self) -> u32 {
        match self {
            MembershipPlan::OneMonth => 1,
            MembershipPlan::ThreeMonths => 3,
            MembershipPlan::SixMonths => 6,
            MembershipPlan::TwelveMonths => 12,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MembershipPlan::OneMonth => "1-month",
            MembershipPlan::ThreeMonths => "3-months",
            MembershipPlan::SixMonths => "6-months",
            MembershipPlan::TwelveMonths => "12-months",
        }
    }
}

impl fmt::Display for MembershipPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown membership plan: {0}")]
pub struct UnknownPlan(pub String);

impl FromStr for MembershipPlan {
    type Err = UnknownPlan;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MembershipPlan::ALL
            .into_iter()
            .find(|p| p.as_str() == s.trim())
            .ok_or_else(|| UnknownPlan(s.to_string()))
    }
}

/// End date of a membership: start date plus the plan's whole months.
///
/// Month-end starts clamp to the last day of the target month
/// (Jan 31 + 1 month = Feb 28/29).
pub fn calculate_end_date(start: NaiveDate, plan: MembershipPlan) -> NaiveDate {
    start
        .checked_add_months(Months::new(plan.months()))
        .unwrap_or(NaiveDate::MAX)
}

/// Membership standing at a point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MemberStatus {
    Active,
    ExpiringSoon,
    Expired,
}

impl MemberStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberStatus::Active => "active",
            MemberStatus::ExpiringSoon => "expiring-soon",
            MemberStatus::Expired => "expired",
        }
    }

    pub fn may_check_in(&self) -> bool {
        !matches!(self, MemberStatus::Expired)
    }
}

impl fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
