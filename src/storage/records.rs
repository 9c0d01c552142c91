//! JSONL task store
//!
//! The tracking application keeps its tasks in a JSONL file, one record per
//! line. This module reads that file under a shared lock and turns the open
//! tasks into a [`ScheduleRequest`].

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime, TimeDelta};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::config::StoreConfig;
use crate::domain::{parse_due_date, ScheduleRequest, ScheduleTask};

/// Dependencies as persisted: either one comma-separated string or a list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDependencies {
    List(Vec<String>),
    Text(String),
}

impl RawDependencies {
    /// Returns trimmed, non-empty dependency titles in declared order
    pub fn titles(&self) -> Vec<String> {
        let raw: Vec<&str> = match self {
            RawDependencies::List(items) => items.iter().map(String::as_str).collect(),
            RawDependencies::Text(text) => text.split(',').collect(),
        };

        raw.into_iter()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }
}

/// A task as stored by the tracking application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub title: String,

    #[serde(default)]
    pub due_date: Option<String>,

    #[serde(default)]
    pub estimated_hours: Option<f64>,

    #[serde(default)]
    pub dependencies: Option<RawDependencies>,

    #[serde(default)]
    pub is_completed: bool,
}

impl TaskRecord {
    /// Returns the record's dependency titles
    pub fn dependency_titles(&self) -> Vec<String> {
        self.dependencies
            .as_ref()
            .map(RawDependencies::titles)
            .unwrap_or_default()
    }
}

/// Read-only store for task records in JSONL format
pub struct TaskStore {
    path: PathBuf,
}

impl TaskStore {
    /// Creates a store backed by the given file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads all records from the store, in file order
    pub fn read_all(&self) -> Result<Vec<TaskRecord>> {
        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open task store: {}", self.path.display()))?;

        // Acquire shared lock for reading
        file.lock_shared()
            .context("Failed to acquire read lock on task store")?;

        // Lock is released when file is dropped
        parse_records(BufReader::new(&file))
    }

    /// Reads the store and builds a scheduling request from its open tasks
    pub fn schedule_request(&self, defaults: &StoreConfig, today: NaiveDate) -> Result<ScheduleRequest> {
        let records = self.read_all()?;
        debug!(
            path = %self.path.display(),
            records = records.len(),
            "read task store"
        );
        Ok(build_request(&records, defaults, today))
    }
}

/// Parses JSONL task records, skipping blank lines
pub fn parse_records(reader: impl BufRead) -> Result<Vec<TaskRecord>> {
    let mut records = Vec::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", line_num + 1))?;

        if line.trim().is_empty() {
            continue;
        }

        let record: TaskRecord = serde_json::from_str(&line)
            .with_context(|| format!("Failed to parse task at line {}", line_num + 1))?;
        records.push(record);
    }

    Ok(records)
}

/// Builds a request from the open records.
///
/// Completed records are dropped, along with any dependency on them since it
/// is already satisfied. A title that also has an open record keeps its
/// dependents waiting on the open one. Missing or unreadable due dates become
/// `today + default_due_days`; missing or zero estimates become
/// `default_estimated_hours`. Unknown dependency titles are kept so that
/// validation reports them.
pub fn build_request(records: &[TaskRecord], defaults: &StoreConfig, today: NaiveDate) -> ScheduleRequest {
    let completed: HashSet<&str> = records
        .iter()
        .filter(|r| r.is_completed)
        .map(|r| r.title.as_str())
        .collect();
    let open: HashSet<&str> = records
        .iter()
        .filter(|r| !r.is_completed)
        .map(|r| r.title.as_str())
        .collect();

    let default_due = today
        .checked_add_signed(TimeDelta::days(i64::from(defaults.default_due_days)))
        .unwrap_or(today)
        .and_time(NaiveTime::default());

    records
        .iter()
        .filter(|r| !r.is_completed)
        .map(|record| {
            let due_date = match record.due_date.as_deref() {
                Some(raw) => parse_due_date(raw).unwrap_or_else(|| {
                    warn!(task = %record.title, due = raw, "unreadable due date, using default");
                    default_due
                }),
                None => default_due,
            };

            let estimated_hours = match record.estimated_hours {
                Some(hours) if hours != 0.0 => hours,
                _ => defaults.default_estimated_hours,
            };

            let dependencies = record
                .dependency_titles()
                .into_iter()
                .filter(|dep| {
                    !completed.contains(dep.as_str()) || open.contains(dep.as_str())
                });

            ScheduleTask::new(record.title.clone(), estimated_hours, due_date)
                .with_dependencies(dependencies)
        })
        .collect()
}
