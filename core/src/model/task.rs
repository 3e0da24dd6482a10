use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::UnknownValue;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];
    pub const UNRANKED: u8 = 3;

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Critical,
    Major,
    Minor,
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Major
    }
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Critical, Severity::Major, Severity::Minor];
    pub const UNRANKED: u8 = 3;

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::Major => "Major",
            Severity::Minor => "Minor",
        }
    }

    pub fn rank(&self) -> u8 {
        match self {
            Severity::Critical => 0,
            Severity::Major => 1,
            Severity::Minor => 2,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    ToDo,
    InProgress,
    Completed,
    Canceled,
    Reopened,
}

impl Default for Status {
    fn default() -> Self {
        Status::ToDo
    }
}

impl Status {
    pub const ALL: [Status; 5] = [
        Status::ToDo,
        Status::InProgress,
        Status::Completed,
        Status::Canceled,
        Status::Reopened,
    ];
    pub const UNRANKED: u8 = 5;

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::ToDo => "To Do",
            Status::InProgress => "In Progress",
            Status::Completed => "Completed",
            Status::Canceled => "Canceled",
            Status::Reopened => "Reopened",
        }
    }

    /// Active work first, closed work last.
    pub fn rank(&self) -> u8 {
        match self {
            Status::InProgress => 0,
            Status::ToDo => 1,
            Status::Reopened => 2,
            Status::Completed => 3,
            Status::Canceled => 4,
        }
    }

    /// Terminal tasks are exempt from due date validation.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Completed | Status::Canceled)
    }
}

macro_rules! text_enum {
    ($ty:ident, $field:literal) => {
        impl FromStr for $ty {
            type Err = UnknownValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let needle = s.trim();
                $ty::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(needle))
                    .ok_or_else(|| UnknownValue {
                        field: $field,
                        value: s.to_string(),
                    })
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

text_enum!(Priority, "priority");
text_enum!(Severity, "severity");
text_enum!(Status, "status");

/// A stored task.
///
/// Enumerated fields are kept as text: a record carrying a value outside the
/// known set still loads, saves and ranks (in last place). Use
/// [`Task::priority_kind`] and friends for the typed view.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    /// `YYYY-MM-DD`
    pub due_date: String,
    /// `HH:MM`; `None` means no specific time and counts as midnight.
    pub time: Option<String>,
    pub status: String,
    pub priority: String,
    pub severity: String,
    pub owner: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    pub fn new(owner: String, title: String, due_date: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            description: None,
            due_date,
            time: None,
            status: Status::default().to_string(),
            priority: Priority::default().to_string(),
            severity: Severity::default().to_string(),
            owner,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn priority_kind(&self) -> Option<Priority> {
        self.priority.parse().ok()
    }

    pub fn severity_kind(&self) -> Option<Severity> {
        self.severity.parse().ok()
    }

    pub fn status_kind(&self) -> Option<Status> {
        self.status.parse().ok()
    }

    pub fn is_terminal(&self) -> bool {
        self.status_kind().map(|s| s.is_terminal()).unwrap_or(false)
    }
}
