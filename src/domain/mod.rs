//! Domain models for smart scheduling
//!
//! Contains the scheduling core without any I/O concerns. Every call builds
//! and discards its own graph and queue, so the functions here are safe to
//! call concurrently for independent requests.

mod error;
mod graph;
mod projection;
mod schedule;
mod sorter;
mod task;
mod validate;

pub use error::ScheduleError;
pub use graph::DependencyGraph;
pub use projection::{
    project_completion, CompletionProjection, ProjectionError, TaskProjection,
    DEFAULT_HOURS_PER_DAY,
};
pub use schedule::{schedule, schedule_tasks, try_schedule, ScheduleResponse, SUCCESS_MESSAGE};
pub use sorter::sort_by_deadline;
pub use task::{due_date, parse_due_date, ScheduleRequest, ScheduleTask, DUE_DATE_FORMAT};
pub use validate::{validate_tasks, MAX_ESTIMATED_HOURS, MAX_TITLE_LEN, MIN_ESTIMATED_HOURS};
