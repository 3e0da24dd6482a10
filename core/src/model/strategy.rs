use crate::model::task::{Priority, Severity, Status, Task};
use crate::validation::compose_due;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::UnknownValue;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    Priority,
    Severity,
    Status,
    DueDate,
}

impl Default for SortKey {
    fn default() -> Self {
        SortKey::Status
    }
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [SortKey::Priority, SortKey::Severity, SortKey::Status, SortKey::DueDate];

    /// Keys consulted in order when comparing two tasks. The primary key is
    /// always first; the rest break ties.
    pub fn chain(&self) -> [SortKey; 4] {
        match self {
            SortKey::Priority => [SortKey::Priority, SortKey::Severity, SortKey::Status, SortKey::DueDate],
            SortKey::Severity => [SortKey::Severity, SortKey::Priority, SortKey::Status, SortKey::DueDate],
            SortKey::DueDate => [SortKey::DueDate, SortKey::Priority, SortKey::Severity, SortKey::Status],
            SortKey::Status => [SortKey::Status, SortKey::Priority, SortKey::Severity, SortKey::DueDate],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Priority => "priority",
            SortKey::Severity => "severity",
            SortKey::Status => "status",
            SortKey::DueDate => "due-date",
        }
    }
}

impl FromStr for SortKey {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "priority" | "pri" => Ok(SortKey::Priority),
            "severity" | "sev" => Ok(SortKey::Severity),
            "status" => Ok(SortKey::Status),
            "due-date" | "duedate" | "due_date" | "due" => Ok(SortKey::DueDate),
            _ => Err(UnknownValue { field: "sort key", value: s.to_string() }),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    #[serde(rename = "asc", alias = "ascending")]
    Ascending,
    #[serde(rename = "desc", alias = "descending")]
    Descending,
}

impl Default for SortOrder {
    fn default() -> Self {
        SortOrder::Ascending
    }
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "asc",
            SortOrder::Descending => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = UnknownValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            _ => Err(UnknownValue { field: "sort order", value: s.to_string() }),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the list view sorts by. Defaults to status, ascending.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortStrategy {
    #[serde(default, rename = "sort")]
    pub key: SortKey,
    #[serde(default)]
    pub order: SortOrder,
}

impl SortStrategy {
    pub fn new(key: SortKey, order: SortOrder) -> Self {
        Self { key, order }
    }
}

/// Rank of one task under one key. Lower sorts first when ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rank {
    Table(u8),
    // `None` is an unparseable due point; it stays last in both directions.
    Due(Option<NaiveDateTime>),
}

fn rank_of(task: &Task, key: SortKey) -> Rank {
    match key {
        SortKey::Priority => Rank::Table(task.priority_kind().map(|p| p.rank()).unwrap_or(Priority::UNRANKED)),
        SortKey::Severity => Rank::Table(task.severity_kind().map(|s| s.rank()).unwrap_or(Severity::UNRANKED)),
        SortKey::Status => Rank::Table(task.status_kind().map(|s| s.rank()).unwrap_or(Status::UNRANKED)),
        SortKey::DueDate => Rank::Due(compose_due(&task.due_date, task.time.as_deref())),
    }
}

fn compare_rank(a: Rank, b: Rank, order: SortOrder) -> Ordering {
    let directed = |ord: Ordering| match order {
        SortOrder::Ascending => ord,
        SortOrder::Descending => ord.reverse(),
    };
    match (a, b) {
        (Rank::Table(x), Rank::Table(y)) => directed(x.cmp(&y)),
        (Rank::Due(Some(x)), Rank::Due(Some(y))) => directed(x.cmp(&y)),
        (Rank::Due(Some(_)), Rank::Due(None)) => Ordering::Less,
        (Rank::Due(None), Rank::Due(Some(_))) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

/// Compares two tasks by walking the fallback chain of the strategy's key.
///
/// The first key on which the tasks differ decides; `Descending` flips that
/// decision except that an unparseable due date always loses to a valid one.
/// Ties on every key compare `Equal`.
pub fn compare_tasks(a: &Task, b: &Task, strategy: SortStrategy) -> Ordering {
    strategy
        .key
        .chain()
        .iter()
        .map(|&key| compare_rank(rank_of(a, key), rank_of(b, key), strategy.order))
        .find(|ord| ord.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Returns the tasks in list-view order. The input is left as is; fully tied
/// tasks keep their input order.
pub fn rank_tasks(tasks: &[Task], strategy: SortStrategy) -> Vec<Task> {
    let mut ranked = tasks.to_vec();
    sort_tasks(&mut ranked, strategy);
    ranked
}

/// In-place variant of [`rank_tasks`].
pub fn sort_tasks(tasks: &mut [Task], strategy: SortStrategy) {
    // `sort_by` is stable.
    tasks.sort_by(|a, b| compare_tasks(a, b, strategy));
}
