use crate::error::TaskError;
use crate::model::strategy::{sort_tasks, SortStrategy};
use crate::model::task::Task;
use crate::repository::TaskRepository;
use crate::service::dto::{TaskDraft, TaskDto};
use crate::validation::{validate_due, ValidationError};
use anyhow::Result;
use chrono::{NaiveDateTime, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Owner-scoped task operations.
///
/// Writes run the due date validator first and touch storage only when it
/// passes. Callers pass `now` so the check is reproducible.
pub struct TaskService<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn add_task(&self, owner: &str, draft: TaskDraft, now: NaiveDateTime) -> Result<Task> {
        let title = checked_title(&draft)?;
        let mut task = Task::new(owner.to_string(), title, draft.due_date.clone());
        apply_draft(&mut task, &draft);
        check_due(&task, now)?;

        let created = self.repo.create(task)?;
        info!(task_id = %created.id, owner, "task created");
        Ok(created)
    }

    /// Replaces every mutable field of the owner's task with the draft.
    pub fn edit_task(&self, owner: &str, id: &Uuid, draft: TaskDraft, now: NaiveDateTime) -> Result<Task> {
        let title = checked_title(&draft)?;
        let mut task = self.repo.get(owner, id)?;
        task.title = title;
        task.due_date = draft.due_date.clone();
        apply_draft(&mut task, &draft);
        check_due(&task, now)?;

        task.updated_at = Utc::now();
        self.repo.update(owner, &task)?;
        info!(task_id = %task.id, owner, "task updated");
        Ok(task)
    }

    pub fn delete_task(&self, owner: &str, id: &Uuid) -> Result<()> {
        self.repo.delete(owner, id)?;
        info!(task_id = %id, owner, "task deleted");
        Ok(())
    }

    pub fn get_task(&self, owner: &str, id: &Uuid) -> Result<Task> {
        self.repo.get(owner, id)
    }

    /// The owner's full task set in list-view order.
    pub fn list_tasks(&self, owner: &str, strategy: SortStrategy) -> Result<Vec<TaskDto>> {
        let mut tasks = self.repo.list(owner)?;
        sort_tasks(&mut tasks, strategy);
        debug!(owner, count = tasks.len(), sort = %strategy.key, order = %strategy.order, "ranked tasks");

        Ok(tasks.into_iter().map(TaskDto::from_entity).collect())
    }
}

fn checked_title(draft: &TaskDraft) -> Result<String> {
    let title = draft.title.trim();
    if title.is_empty() {
        return Err(TaskError::EmptyTitle.into());
    }
    Ok(title.to_string())
}

fn apply_draft(task: &mut Task, draft: &TaskDraft) {
    task.description = draft.description_or_none();
    task.time = draft.time_or_none();
    task.status = draft.status_or_default();
    task.priority = draft.priority_or_default();
    task.severity = draft.severity_or_default();
}

fn check_due(task: &Task, now: NaiveDateTime) -> Result<(), ValidationError> {
    validate_due(&task.due_date, task.time.as_deref(), &task.status, now).inspect_err(|err| {
        warn!(error = ?err, due_date = %task.due_date, time = ?task.time, "rejected due date");
    })
}
