//! Scheduling failures
//!
//! Every variant is recoverable: the public entry point turns them into an
//! invalid [`ScheduleResponse`](super::ScheduleResponse) and never panics.
//! The `Display` text doubles as the response message.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ScheduleError {
    #[error("No tasks provided for scheduling.")]
    EmptyInput,

    #[error("Task at position {index} has a blank title.")]
    BlankTitle { index: usize },

    #[error("Task at position {index} has a title longer than {max} characters.")]
    TitleTooLong { index: usize, max: usize },

    #[error("Duplicate task title '{0}'. Task titles must be unique.")]
    DuplicateTitle(String),

    #[error("Task '{0}' cannot depend on itself.")]
    SelfDependency(String),

    #[error("Task '{task}' has an invalid estimate of {hours} hours. Estimates must be between 0.1 and 1000 hours.")]
    InvalidEstimate { task: String, hours: f64 },

    #[error("Dependency '{dependency}' not found in task list for task '{task}'.")]
    UnknownDependency { task: String, dependency: String },

    #[error("Circular dependency detected. Cannot schedule tasks.{}", involved(.tasks))]
    CyclicDependency { tasks: Vec<String> },

    #[error("Error scheduling tasks: {0}")]
    Internal(String),
}

impl ScheduleError {
    /// Returns true for failures caused by the shape of the input rather than
    /// the dependency graph
    pub fn is_validation(&self) -> bool {
        !matches!(
            self,
            ScheduleError::CyclicDependency { .. } | ScheduleError::Internal(_)
        )
    }
}

fn involved(tasks: &[String]) -> String {
    if tasks.is_empty() {
        String::new()
    } else {
        format!(" Tasks involved: {}.", tasks.join(", "))
    }
}
