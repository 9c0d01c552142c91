//! Completion projection
//!
//! Walks a finished schedule as if one person worked through it serially for
//! a fixed number of hours per day, and marks tasks whose projected completion
//! lands after their due date. Advisory only: a late projection never makes a
//! schedule invalid.

use chrono::{NaiveDateTime, TimeDelta};
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;
use tracing::warn;

use super::task::{due_date, ScheduleTask};

/// Default working hours per day
pub const DEFAULT_HOURS_PER_DAY: f64 = 8.0;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProjectionError {
    #[error("Hours per day must be a positive number, got {0}")]
    InvalidHoursPerDay(f64),

    #[error("Scheduled task '{0}' is not in the task list")]
    UnknownTask(String),

    #[error("Projected completion of '{0}' is out of the supported date range")]
    OutOfRange(String),
}

/// Projected timeline of one task
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskProjection {
    pub title: String,
    #[serde(with = "due_date")]
    pub starts_at: NaiveDateTime,
    #[serde(with = "due_date")]
    pub completes_at: NaiveDateTime,
    #[serde(with = "due_date")]
    pub due_date: NaiveDateTime,
    /// Whole working days charged to this task
    pub days: i64,
    pub late: bool,
}

/// Projected timeline of a whole schedule
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionProjection {
    pub tasks: Vec<TaskProjection>,
}

impl CompletionProjection {
    /// Tasks projected to finish after their due date
    pub fn late_tasks(&self) -> impl Iterator<Item = &TaskProjection> {
        self.tasks.iter().filter(|t| t.late)
    }

    /// Returns true if every task is projected to finish on time
    pub fn is_on_time(&self) -> bool {
        self.tasks.iter().all(|t| !t.late)
    }

    /// Projected completion of the last task
    pub fn finishes_at(&self) -> Option<NaiveDateTime> {
        self.tasks.last().map(|t| t.completes_at)
    }
}

/// Projects completion dates for `order`, starting at `start`.
///
/// Each task takes `ceil(estimated_hours / hours_per_day)` whole days and
/// starts when the previous one completes.
pub fn project_completion(
    order: &[String],
    tasks: &[ScheduleTask],
    start: NaiveDateTime,
    hours_per_day: f64,
) -> Result<CompletionProjection, ProjectionError> {
    if !hours_per_day.is_finite() || hours_per_day <= 0.0 {
        return Err(ProjectionError::InvalidHoursPerDay(hours_per_day));
    }

    let by_title: HashMap<&str, &ScheduleTask> =
        tasks.iter().map(|t| (t.title.as_str(), t)).collect();

    let mut cursor = start;
    let mut projected = Vec::with_capacity(order.len());

    for title in order {
        let task = by_title
            .get(title.as_str())
            .ok_or_else(|| ProjectionError::UnknownTask(title.clone()))?;

        let days = (task.estimated_hours / hours_per_day).ceil() as i64;
        let completes_at = TimeDelta::try_days(days)
            .and_then(|delta| cursor.checked_add_signed(delta))
            .ok_or_else(|| ProjectionError::OutOfRange(title.clone()))?;
        let late = completes_at > task.due_date;

        if late {
            warn!(
                task = %title,
                due = %task.due_date,
                projected = %completes_at,
                "task projected to finish after its due date"
            );
        }

        projected.push(TaskProjection {
            title: title.clone(),
            starts_at: cursor,
            completes_at,
            due_date: task.due_date,
            days,
            late,
        });
        cursor = completes_at;
    }

    Ok(CompletionProjection { tasks: projected })
}
