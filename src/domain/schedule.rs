//! Scheduling entry points and response assembly
//!
//! Pipeline: validate -> build graph -> deadline-priority sort -> assemble.
//! Each stage short-circuits with a [`ScheduleError`]; [`schedule`] folds
//! every failure into an invalid [`ScheduleResponse`].

use serde::{Deserialize, Serialize};
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, info, info_span};

use super::error::ScheduleError;
use super::graph::DependencyGraph;
use super::sorter::sort_by_deadline;
use super::task::{ScheduleRequest, ScheduleTask};
use super::validate::validate_tasks;

/// Message attached to successful responses
pub const SUCCESS_MESSAGE: &str = "Tasks scheduled successfully.";

/// Outcome of a scheduling request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    /// Task titles in execution order; empty when invalid
    pub recommended_order: Vec<String>,
    pub is_valid: bool,
    /// Always present when invalid
    pub message: Option<String>,
}

impl ScheduleResponse {
    /// Wraps a successful ordering
    pub fn success(order: Vec<String>) -> Self {
        Self {
            recommended_order: order,
            is_valid: true,
            message: Some(SUCCESS_MESSAGE.to_string()),
        }
    }

    /// Wraps a failure
    pub fn failure(error: &ScheduleError) -> Self {
        Self {
            recommended_order: Vec::new(),
            is_valid: false,
            message: Some(error.to_string()),
        }
    }
}

impl From<Result<Vec<String>, ScheduleError>> for ScheduleResponse {
    fn from(result: Result<Vec<String>, ScheduleError>) -> Self {
        match result {
            Ok(order) => Self::success(order),
            Err(e) => Self::failure(&e),
        }
    }
}

/// Orders the tasks of a request, returning a typed error on failure
pub fn try_schedule(request: &ScheduleRequest) -> Result<Vec<String>, ScheduleError> {
    schedule_tasks(&request.tasks)
}

/// Orders a slice of tasks, returning a typed error on failure
pub fn schedule_tasks(tasks: &[ScheduleTask]) -> Result<Vec<String>, ScheduleError> {
    let _span = info_span!("schedule", tasks = tasks.len()).entered();

    validate_tasks(tasks)?;
    debug!("input validated");

    let graph = DependencyGraph::from_tasks(tasks)?;
    debug!(edges = graph.edge_count(), "dependency graph built");

    let order = sort_by_deadline(&graph)?;
    debug!(scheduled = order.len(), "tasks ordered");

    Ok(order.into_iter().map(String::from).collect())
}

/// Orders the tasks of a request.
///
/// Never panics: every failure, including unexpected internal ones, comes
/// back as a response with `is_valid == false`.
pub fn schedule(request: &ScheduleRequest) -> ScheduleResponse {
    contain(|| try_schedule(request))
}

/// Runs a scheduling pass, turning a panic into an internal error
fn contain<F>(pass: F) -> ScheduleResponse
where
    F: FnOnce() -> Result<Vec<String>, ScheduleError>,
{
    let result = panic::catch_unwind(AssertUnwindSafe(pass))
        .unwrap_or_else(|payload| Err(ScheduleError::Internal(panic_message(&*payload))));

    match &result {
        Err(e) if e.is_validation() => debug!(error = %e, "request rejected"),
        Err(e) => info!(error = %e, "scheduling failed"),
        Ok(_) => {}
    }

    result.into()
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unexpected failure".to_string())
}
