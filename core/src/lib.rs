pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod repository;
pub mod service;
pub mod validation;

pub use config::Settings;
pub use error::{TaskError, UnknownValue};
pub use model::task::{Task, Priority, Severity, Status};
pub use model::strategy::{SortKey, SortOrder, SortStrategy, compare_tasks, rank_tasks, sort_tasks};
pub use repository::{TaskRepository, FileTaskRepository};
pub use input::{parse_args, expand_key, apply_fields, ParsedInput, FIELD_KEYS};
pub use validation::{validate_due, compose_due, ValidationError};
pub use service::task_service::TaskService;
pub use service::dto::{TaskDraft, TaskDto};
