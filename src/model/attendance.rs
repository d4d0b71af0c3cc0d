use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum AttendanceStatus {
    CheckedIn,
    #[default]
    CheckedOut,
}

/// Live per-person record for the current day-cycle.
///
/// A record with no timestamps is "untouched"; one with `check_out_time`
/// populated is "closed" and eligible for archival. These are the only two
/// flavors of `CheckedOut`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AttendanceRecord {
    pub status: AttendanceStatus,
    #[schema(example = "2024-06-01T08:00:00", value_type = String, format = "date-time", nullable = true)]
    pub check_in_time: Option<NaiveDateTime>,
    #[schema(example = "teacher1", nullable = true)]
    pub check_in_actor: Option<String>,
    #[schema(example = "2024-06-01T18:12:00", value_type = String, format = "date-time", nullable = true)]
    pub check_out_time: Option<NaiveDateTime>,
    #[schema(example = "teacher1", nullable = true)]
    pub check_out_actor: Option<String>,
    /// Minutes past the pickup cutoff, computed at check-out. Nursery only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = 12, nullable = true)]
    pub overtime_minutes: Option<u32>,
    /// Whether the check-in missed the grace deadline. Staff only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = false, nullable = true)]
    pub is_late: Option<bool>,
}

impl Default for AttendanceRecord {
    fn default() -> Self {
        Self {
            status: AttendanceStatus::CheckedOut,
            check_in_time: None,
            check_in_actor: None,
            check_out_time: None,
            check_out_actor: None,
            overtime_minutes: None,
            is_late: None,
        }
    }
}

impl AttendanceRecord {
    /// Completed a full check-in/check-out cycle today.
    pub fn is_closed(&self) -> bool {
        self.status == AttendanceStatus::CheckedOut && self.check_out_time.is_some()
    }
}

/// Notification emitted on every successful transition. Consumers (the HTTP
/// layer, a toast UI) are free to ignore it.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum TransitionEvent {
    CheckedIn {
        person_id: String,
        display_name: String,
        at: NaiveDateTime,
        #[serde(skip_serializing_if = "Option::is_none")]
        is_late: Option<bool>,
    },
    CheckedOut {
        person_id: String,
        display_name: String,
        at: NaiveDateTime,
        #[serde(skip_serializing_if = "Option::is_none")]
        overtime_minutes: Option<u32>,
    },
}

/// Snapshot of one person's closed record at archival time.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ArchivedEntry {
    pub person_id: String,
    pub display_name: String,
    pub record: AttendanceRecord,
}

/// All closed records archived for one calendar day.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ArchivedDay {
    #[schema(example = "2024-06-01", value_type = String, format = "date")]
    pub date: NaiveDate,
    pub records: Vec<ArchivedEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum OvertimeFilter {
    #[default]
    Any,
    /// Only records that accrued overtime.
    With,
    /// Only records with no overtime recorded (unset or zero).
    Without,
}

impl OvertimeFilter {
    pub fn matches(&self, record: &AttendanceRecord) -> bool {
        match self {
            OvertimeFilter::Any => true,
            OvertimeFilter::With => record.overtime_minutes.unwrap_or(0) > 0,
            OvertimeFilter::Without => record.overtime_minutes.unwrap_or(0) == 0,
        }
    }
}

/// Query over archived days. The date range is applied per day, never inside
/// a day; person and overtime predicates narrow each day's records.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct HistoryFilter {
    /// Inclusive lower bound on the archived date
    #[param(example = "2024-06-01", value_type = String, format = "date")]
    pub from: Option<NaiveDate>,
    /// Inclusive upper bound on the archived date
    #[param(example = "2024-06-30", value_type = String, format = "date")]
    pub to: Option<NaiveDate>,
    /// Narrow each day to a single person
    pub person_id: Option<String>,
    /// Overtime predicate: any, with, without
    #[param(example = "with", value_type = String)]
    pub overtime: Option<OvertimeFilter>,
}
