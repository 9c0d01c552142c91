//! Main CLI application structure

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::debug;

use super::logging::init_logging;
use super::output::{Output, OutputFormat};
use super::plan;
use crate::storage::Config;

#[derive(Parser)]
#[command(name = "smart-schedule")]
#[command(author, version, about = "Deadline-aware ordering for dependent tasks")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the configured format)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Logging level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Project configuration file (replaces .smart-schedule.toml lookup)
    #[arg(long, global = true, value_name = "PATH", env = "SMART_SCHEDULE_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Order the tasks of a request file (JSON or YAML, `-` for stdin)
    Plan {
        /// Request file
        input: PathBuf,

        #[command(flatten)]
        args: PlanArgs,
    },

    /// Order the open tasks of a JSONL task store
    Store {
        /// Task store file
        path: PathBuf,

        /// Reference date for default due dates (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        today: Option<String>,

        #[command(flatten)]
        args: PlanArgs,
    },

    /// Show the effective configuration
    Config,
}

/// Options shared by the scheduling commands
#[derive(Debug, Clone, Args)]
pub struct PlanArgs {
    /// Project completion dates and flag late tasks
    #[arg(long)]
    pub project: bool,

    /// Start of the projection (date or date-time, defaults to now)
    #[arg(long, value_name = "DATE")]
    pub start: Option<String>,

    /// Working hours per day for the projection
    #[arg(long, value_name = "HOURS")]
    pub hours_per_day: Option<f64>,
}

/// Log level as exposed on the CLI
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level, cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };
    debug!(source = ?config.source, "configuration loaded");

    let format = cli
        .format
        .unwrap_or_else(|| config.global.default_format.into());
    let output = Output::new(format);

    match cli.command {
        Commands::Plan { input, args } => plan::plan_file(&output, &input, &config, &args)?,

        Commands::Store { path, today, args } => {
            plan::plan_store(&output, &path, today.as_deref(), &config, &args)?
        }

        Commands::Config => show_config(&output, &config),
    }

    debug!("command completed successfully");
    Ok(())
}

/// Prints the effective configuration
fn show_config(output: &Output, config: &Config) {
    if output.is_json() {
        output.data(config);
        return;
    }

    match &config.source {
        Some(path) => println!("# project config: {}", path.display()),
        None => println!("# project config: (defaults)"),
    }

    match toml::to_string_pretty(&config.project) {
        Ok(text) => print!("{}", text),
        Err(_) => output.data(&config.project),
    }
}
