use serde::{Serialize, Deserialize};
use chrono::{DateTime, NaiveDateTime, Utc};
use uuid::Uuid;
use crate::model::task::{Priority, Severity, Status, Task};
use crate::validation::compose_due;

/// Fields a caller may set on create and replaces wholesale on edit.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub due_date: String,
    pub time: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub severity: Option<String>,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>, due_date: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            due_date: due_date.into(),
            ..Self::default()
        }
    }

    /// Seeds a draft with every mutable field of `task`, for edits that only
    /// touch some of them.
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            due_date: task.due_date.clone(),
            time: task.time.clone(),
            status: Some(task.status.clone()),
            priority: Some(task.priority.clone()),
            severity: Some(task.severity.clone()),
        }
    }

    pub(crate) fn status_or_default(&self) -> String {
        non_empty(&self.status).unwrap_or_else(|| Status::default().to_string())
    }

    pub(crate) fn priority_or_default(&self) -> String {
        non_empty(&self.priority).unwrap_or_else(|| Priority::default().to_string())
    }

    pub(crate) fn severity_or_default(&self) -> String {
        non_empty(&self.severity).unwrap_or_else(|| Severity::default().to_string())
    }

    pub(crate) fn time_or_none(&self) -> Option<String> {
        non_empty(&self.time)
    }

    pub(crate) fn description_or_none(&self) -> Option<String> {
        non_empty(&self.description)
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().map(|v| v.trim()).filter(|v| !v.is_empty()).map(str::to_string)
}

/// A task as the list view renders it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TaskDto {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub due_date: String,
    pub time: Option<String>,
    pub status: String,
    pub priority: String,
    pub severity: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    // `None` when the stored date/time does not compose.
    pub due_at: Option<NaiveDateTime>,
}

impl TaskDto {
    pub fn from_entity(task: Task) -> Self {
        let due_at = compose_due(&task.due_date, task.time.as_deref());
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            due_date: task.due_date,
            time: task.time,
            status: task.status,
            priority: task.priority,
            severity: task.severity,
            created_at: task.created_at,
            updated_at: task.updated_at,
            due_at,
        }
    }

    /// True when the due point has passed and the task is still open.
    pub fn is_overdue(&self, now: NaiveDateTime) -> bool {
        let terminal = self.status.parse::<Status>().map(|s| s.is_terminal()).unwrap_or(false);
        !terminal && self.due_at.map(|due| due < now).unwrap_or(false)
    }
}
