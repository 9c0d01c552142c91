//! Schedule task model
//!
//! A [`ScheduleTask`] is the unit the scheduler orders. Its title is its
//! identity within a single request, and dependencies refer to other tasks
//! by title.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Serialized form of due dates
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A task submitted for scheduling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleTask {
    /// Unique title within the request
    pub title: String,

    /// Estimated effort in hours
    pub estimated_hours: f64,

    /// Deadline, compared at full date and time precision
    #[serde(with = "due_date")]
    pub due_date: NaiveDateTime,

    /// Titles of tasks that must be done first
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl ScheduleTask {
    /// Creates a task with no dependencies
    pub fn new(title: impl Into<String>, estimated_hours: f64, due_date: NaiveDateTime) -> Self {
        Self {
            title: title.into(),
            estimated_hours,
            due_date,
            dependencies: Vec::new(),
        }
    }

    /// Adds a dependency on another task by title
    pub fn with_dependency(mut self, title: impl Into<String>) -> Self {
        self.dependencies.push(title.into());
        self
    }

    /// Adds several dependencies at once
    pub fn with_dependencies<I, S>(mut self, titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies.extend(titles.into_iter().map(Into::into));
        self
    }

    /// Returns true if this task names `title` as a dependency
    pub fn depends_on(&self, title: &str) -> bool {
        self.dependencies.iter().any(|d| d == title)
    }
}

/// A scheduling request: the full set of tasks to order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRequest {
    #[serde(default)]
    pub tasks: Vec<ScheduleTask>,
}

impl ScheduleRequest {
    pub fn new(tasks: Vec<ScheduleTask>) -> Self {
        Self { tasks }
    }

    /// Returns true if the request has no tasks
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Returns the number of tasks
    pub fn len(&self) -> usize {
        self.tasks.len()
    }
}

impl FromIterator<ScheduleTask> for ScheduleRequest {
    fn from_iter<T: IntoIterator<Item = ScheduleTask>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Parses a due date.
///
/// Accepts a plain date (midnight), a naive date-time, or RFC 3339. An
/// RFC 3339 offset is dropped and the wall-clock time kept as written.
pub fn parse_due_date(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.naive_local());
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, fmt) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Serde adapter for due dates in the wire format
pub mod due_date {
    use super::*;

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(DUE_DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_due_date(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid due date: '{}'", raw)))
    }
}
