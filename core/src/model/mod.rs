pub mod strategy;
pub mod task;
