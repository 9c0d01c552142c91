//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `plan <FILE>` | Order the tasks of a JSON/YAML request |
//! | `store <FILE>` | Order the open tasks of a JSONL task store |
//! | `config` | Show the effective configuration |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON (the schedule response shape)
//!
//! ## Logging
//!
//! Use `--verbose` (or `-v`) for debug logs, or `--log-level`:
//! ```bash
//! smart-schedule --log-level trace plan tasks.json
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod logging;
mod output;
mod plan;

pub use app::{run, Cli, Commands, LogLevel, PlanArgs};
pub use output::{Output, OutputFormat};
pub use plan::{read_request, PlanReport, PlanSettings};
