//! Input validation for scheduling requests.
//!
//! Runs before graph construction so the graph builder can assume every
//! dependency names exactly one task in the request.
//!
//! The request must not be empty. Titles are then checked across the whole
//! list (non-blank, at most [`MAX_TITLE_LEN`] characters, unique). After
//! that each task is checked in input order: its estimate lies within
//! [`MIN_ESTIMATED_HOURS`]..=[`MAX_ESTIMATED_HOURS`], it does not depend on
//! itself, and every dependency names a task in the request. The first
//! failing check is reported.

use std::collections::HashSet;

use super::error::ScheduleError;
use super::task::ScheduleTask;

/// Smallest accepted estimate, in hours
pub const MIN_ESTIMATED_HOURS: f64 = 0.1;

/// Largest accepted estimate, in hours
pub const MAX_ESTIMATED_HOURS: f64 = 1000.0;

/// Longest accepted title, in characters
pub const MAX_TITLE_LEN: usize = 200;

/// Validates a task list, failing fast on the first problem found
pub fn validate_tasks(tasks: &[ScheduleTask]) -> Result<(), ScheduleError> {
    if tasks.is_empty() {
        return Err(ScheduleError::EmptyInput);
    }

    let mut titles = HashSet::with_capacity(tasks.len());
    for (index, task) in tasks.iter().enumerate() {
        if task.title.trim().is_empty() {
            return Err(ScheduleError::BlankTitle { index });
        }
        if task.title.chars().count() > MAX_TITLE_LEN {
            return Err(ScheduleError::TitleTooLong {
                index,
                max: MAX_TITLE_LEN,
            });
        }
        if !titles.insert(task.title.as_str()) {
            return Err(ScheduleError::DuplicateTitle(task.title.clone()));
        }
    }

    for task in tasks {
        if !(MIN_ESTIMATED_HOURS..=MAX_ESTIMATED_HOURS).contains(&task.estimated_hours) {
            return Err(ScheduleError::InvalidEstimate {
                task: task.title.clone(),
                hours: task.estimated_hours,
            });
        }

        for dependency in &task.dependencies {
            if dependency == &task.title {
                return Err(ScheduleError::SelfDependency(task.title.clone()));
            }
            if !titles.contains(dependency.as_str()) {
                return Err(ScheduleError::UnknownDependency {
                    task: task.title.clone(),
                    dependency: dependency.clone(),
                });
            }
        }
    }

    Ok(())
}
