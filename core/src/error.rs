use thiserror::Error;
use uuid::Uuid;

/// Text that does not name a known value of an enumerated task field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {field}: '{value}'")]
pub struct UnknownValue {
    pub field: &'static str,
    pub value: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TaskError {
    #[error("Task title is required.")]
    EmptyTitle,

    /// Also returned when the task exists but belongs to another owner.
    #[error("Task {id} not found or you are not authorized to access it.")]
    NotFound { id: Uuid },
}
