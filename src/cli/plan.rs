//! Scheduling commands (plan, store)

use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::Serialize;
use tracing::{debug, info};

use super::app::PlanArgs;
use super::output::Output;
use crate::domain::{
    parse_due_date, project_completion, schedule, CompletionProjection, ScheduleRequest,
    ScheduleResponse, DUE_DATE_FORMAT,
};
use crate::storage::{Config, TaskStore};

/// Effective settings for one scheduling run
#[derive(Debug, Clone, PartialEq)]
pub struct PlanSettings {
    pub project: bool,
    pub start: NaiveDateTime,
    pub hours_per_day: f64,
}

impl PlanSettings {
    /// Merges command-line flags over configuration
    pub fn resolve(args: &PlanArgs, config: &Config) -> Result<Self> {
        let start = match args.start.as_deref() {
            Some(raw) => parse_due_date(raw)
                .with_context(|| format!("Invalid --start date: '{}'", raw))?,
            None => Local::now().naive_local(),
        };

        let hours_per_day = args
            .hours_per_day
            .unwrap_or(config.project.schedule.hours_per_day);
        if !hours_per_day.is_finite() || hours_per_day <= 0.0 {
            bail!("--hours-per-day must be a positive number, got {}", hours_per_day);
        }

        Ok(Self {
            project: args.project || config.project.schedule.project_completion,
            start,
            hours_per_day,
        })
    }
}

/// Schedule result plus the optional completion projection
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanReport {
    #[serde(flatten)]
    pub response: ScheduleResponse,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection: Option<CompletionProjection>,
}

/// Orders the tasks of a request file (`-` reads JSON from stdin)
pub fn plan_file(output: &Output, input: &Path, config: &Config, args: &PlanArgs) -> Result<()> {
    let settings = PlanSettings::resolve(args, config)?;
    let request = read_request(input)?;
    debug!(input = %input.display(), tasks = request.len(), "loaded request");

    report(output, &request, &settings)
}

/// Orders the open tasks of a JSONL task store
pub fn plan_store(
    output: &Output,
    path: &Path,
    today: Option<&str>,
    config: &Config,
    args: &PlanArgs,
) -> Result<()> {
    let settings = PlanSettings::resolve(args, config)?;
    let today = match today {
        Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .with_context(|| format!("Invalid --today date: '{}'", raw))?,
        None => Local::now().date_naive(),
    };

    let store = TaskStore::new(path);
    let request = store.schedule_request(&config.project.store, today)?;
    info!(
        path = %store.path().display(),
        tasks = request.len(),
        "built request from task store"
    );

    report(output, &request, &settings)
}

/// Reads a request from JSON or YAML, chosen by file extension
pub fn read_request(input: &Path) -> Result<ScheduleRequest> {
    if input.as_os_str() == "-" {
        let mut content = String::new();
        std::io::stdin()
            .read_to_string(&mut content)
            .context("Failed to read request from stdin")?;
        return serde_json::from_str(&content).context("Failed to parse request from stdin");
    }

    let content = fs::read_to_string(input)
        .with_context(|| format!("Failed to read request: {}", input.display()))?;

    let is_yaml = input
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
        .unwrap_or(false);

    if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML request: {}", input.display()))
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON request: {}", input.display()))
    }
}

/// Schedules the request and prints the result
fn report(output: &Output, request: &ScheduleRequest, settings: &PlanSettings) -> Result<()> {
    let response = schedule(request);

    let projection = if response.is_valid && settings.project {
        Some(project_completion(
            &response.recommended_order,
            &request.tasks,
            settings.start,
            settings.hours_per_day,
        )?)
    } else {
        None
    };

    let plan = PlanReport {
        response,
        projection,
    };

    if output.is_json() {
        output.data(&plan);
    } else {
        print_text(output, &plan);
    }

    if !plan.response.is_valid {
        bail!(
            "{}",
            plan.response
                .message
                .as_deref()
                .unwrap_or("Scheduling failed")
        );
    }

    Ok(())
}

fn print_text(output: &Output, plan: &PlanReport) {
    if !plan.response.is_valid {
        // The failure message is reported by the caller
        return;
    }

    let order = &plan.response.recommended_order;

    match &plan.projection {
        None => {
            println!("Recommended order ({}):", order.len());
            for (pos, title) in order.iter().enumerate() {
                println!("{:>3}. {}", pos + 1, title);
            }
        }
        Some(projection) => {
            println!("Recommended order ({}):", order.len());
            println!(
                "{:>3}  {:<30} {:<20} {:<20} STATUS",
                "#", "TITLE", "DUE", "COMPLETES"
            );
            println!("{}", "-".repeat(84));
            for (pos, task) in projection.tasks.iter().enumerate() {
                let due = task.due_date.format(DUE_DATE_FORMAT).to_string();
                let completes = task.completes_at.format(DUE_DATE_FORMAT).to_string();
                let position = format!("{:>3}", pos + 1);
                let title = format!("{:<30}", task.title);
                let due = format!("{:<20}", due);
                let completes = format!("{:<20}", completes);
                let status = if task.late { "LATE" } else { "on time" };
                output.row(&[position.as_str(), title.as_str(), due.as_str(), completes.as_str(), status]);
            }

            println!();
            if let Some(finish) = projection.finishes_at() {
                println!("Projected finish: {}", finish.format(DUE_DATE_FORMAT));
            }
            if projection.is_on_time() {
                println!("All tasks projected to finish on time.");
            } else {
                println!(
                    "{} task(s) projected to finish after their due date.",
                    projection.late_tasks().count()
                );
            }
        }
    }

    if let Some(message) = &plan.response.message {
        println!();
        println!("{}", message);
    }
}
