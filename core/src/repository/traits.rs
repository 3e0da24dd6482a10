use crate::model::task::Task;
use anyhow::Result;
use uuid::Uuid;

/// Storage for tasks. Every read and write past `create` is scoped to one
/// owner; a task held by someone else is reported as missing.
pub trait TaskRepository {
    fn create(&self, task: Task) -> Result<Task>;
    /// The owner's tasks, most recently created first.
    fn list(&self, owner: &str) -> Result<Vec<Task>>;
    fn get(&self, owner: &str, id: &Uuid) -> Result<Task>;
    fn update(&self, owner: &str, task: &Task) -> Result<()>;
    fn delete(&self, owner: &str, id: &Uuid) -> Result<()>;
}
