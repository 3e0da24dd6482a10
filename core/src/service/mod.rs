pub mod dto;
pub mod task_service;

#[cfg(test)]
mod task_service_test;
