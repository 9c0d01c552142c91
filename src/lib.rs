//! Smart Schedule - deadline-aware ordering for dependent tasks
//!
//! Given a set of tasks with estimates, due dates and dependencies, produces
//! an execution order in which every task follows its prerequisites and,
//! whenever several tasks are free to start, the one due soonest goes first.
//! Missing dependencies and dependency cycles are reported instead of ordered.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{schedule, try_schedule, ScheduleError, ScheduleRequest, ScheduleResponse, ScheduleTask};
