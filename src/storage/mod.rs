//! # Storage Layer
//!
//! File-backed inputs for the scheduler. Nothing here writes: schedule
//! results are never persisted.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Task records | JSONL (one JSON per line) | any path, e.g. `tasks.jsonl` |
//! | Project config | TOML | `.smart-schedule.toml` (nearest ancestor) |
//! | Global config | TOML | `<config dir>/smart-schedule/config.toml` |
//!
//! ## Concurrency Safety
//!
//! [`TaskStore`] takes a shared `fs2` lock while reading, so it never sees a
//! half-written file from a writer that holds the exclusive lock.
//!
//! ## Key Types
//!
//! - [`TaskStore`] - Reads task records and builds scheduling requests
//! - [`Config`] - Project and global configuration

mod config;
mod records;

pub use config::{
    parse_project_config, Config, ConfigError, GlobalConfig, OutputFormat, ProjectConfig,
    ScheduleConfig, StoreConfig, PROJECT_CONFIG_FILE,
};
pub use records::{build_request, parse_records, RawDependencies, TaskRecord, TaskStore};
