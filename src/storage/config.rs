//! Configuration handling for smart-schedule
//!
//! Configuration is read from `.smart-schedule.toml` (project, found by
//! walking up from the working directory) and `~/.config/smart-schedule/config.toml`
//! (global). Both are optional. An explicit file passed with `--config`
//! replaces the project file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{DEFAULT_HOURS_PER_DAY, MAX_ESTIMATED_HOURS, MIN_ESTIMATED_HOURS};

/// Name of the project-level configuration file
pub const PROJECT_CONFIG_FILE: &str = ".smart-schedule.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Scheduling settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Working hours per day used by the completion projection
    pub hours_per_day: f64,

    /// Always include the completion projection in results
    pub project_completion: bool,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            hours_per_day: DEFAULT_HOURS_PER_DAY,
            project_completion: false,
        }
    }
}

/// Defaults applied when building requests from a task store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StoreConfig {
    /// Days from today assigned to tasks without a due date
    pub default_due_days: u32,

    /// Estimate assigned to tasks without one
    pub default_estimated_hours: f64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            default_due_days: 7,
            default_estimated_hours: 1.0,
        }
    }
}

/// Project-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ProjectConfig {
    /// Scheduling settings
    pub schedule: ScheduleConfig,

    /// Task store settings
    pub store: StoreConfig,
}

impl ProjectConfig {
    /// Checks value ranges that serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        let hours = self.schedule.hours_per_day;
        if !hours.is_finite() || hours <= 0.0 || hours > 24.0 {
            return Err(ConfigError::Invalid(format!(
                "schedule.hours_per_day must be in (0, 24], got {}",
                hours
            )));
        }

        let estimate = self.store.default_estimated_hours;
        if !(MIN_ESTIMATED_HOURS..=MAX_ESTIMATED_HOURS).contains(&estimate) {
            return Err(ConfigError::Invalid(format!(
                "store.default_estimated_hours must be between {} and {}, got {}",
                MIN_ESTIMATED_HOURS, MAX_ESTIMATED_HOURS, estimate
            )));
        }

        Ok(())
    }
}

/// Global user configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct GlobalConfig {
    /// Default output format (text or json)
    pub default_format: OutputFormat,
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Combined configuration (global + project)
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    pub project: ProjectConfig,
    pub global: GlobalConfig,
    /// File the project configuration came from, if any
    pub source: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from default locations
    pub fn load() -> Result<Self> {
        let global = Self::load_global()?;
        let source = std::env::current_dir()
            .ok()
            .and_then(|dir| Self::find_project_config(&dir));

        let project = match &source {
            Some(path) => Self::load_project_config(path)?,
            None => ProjectConfig::default(),
        };

        Ok(Self {
            project,
            global,
            source,
        })
    }

    /// Loads global configuration plus an explicit project file
    pub fn from_file(path: &Path) -> Result<Self> {
        let global = Self::load_global()?;
        let project = Self::load_project_config(path)?;

        Ok(Self {
            project,
            global,
            source: Some(path.to_path_buf()),
        })
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "smart-schedule", "smart-schedule")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Loads global configuration
    fn load_global() -> Result<GlobalConfig> {
        let config_dir = match Self::global_config_dir() {
            Some(dir) => dir,
            None => return Ok(GlobalConfig::default()),
        };

        let config_path = config_dir.join("config.toml");
        if !config_path.exists() {
            return Ok(GlobalConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read global config: {}", config_path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse global config")
    }

    /// Loads and validates a project configuration file
    fn load_project_config(path: &Path) -> Result<ProjectConfig> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read project config: {}", path.display()))?;

        let config = parse_project_config(&content)
            .with_context(|| format!("Invalid project config: {}", path.display()))?;

        Ok(config)
    }

    /// Finds the nearest project config file at or above `start`
    pub fn find_project_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            let candidate = current.join(PROJECT_CONFIG_FILE);
            if candidate.is_file() {
                return Some(candidate);
            }

            if !current.pop() {
                return None;
            }
        }
    }
}

/// Parses and validates project configuration text
pub fn parse_project_config(content: &str) -> Result<ProjectConfig, ConfigError> {
    let config: ProjectConfig =
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
    config.validate()?;
    Ok(config)
}
