//! Logging setup using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the log level:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `--verbose` (debug)
//! 3. `SMART_SCHEDULE_LOG` environment variable (e.g. "info", "debug")
//! 4. default to `warn`
//!
//! Logs are sent to STDERR so that stdout carries only command output.

use tracing_subscriber::fmt;

use super::app::LogLevel;

/// Environment variable consulted for the log level
pub const LOG_ENV: &str = "SMART_SCHEDULE_LOG";

/// Initialise the global logging subscriber.
///
/// Call once at startup; later calls leave the first subscriber in place.
pub fn init_logging(cli_level: Option<LogLevel>, verbose: bool) {
    let level = resolve_level(cli_level, verbose, std::env::var(LOG_ENV).ok().as_deref());

    let _ = fmt()
        .with_max_level(level)
        .with_target(verbose)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn resolve_level(cli_level: Option<LogLevel>, verbose: bool, env: Option<&str>) -> tracing::Level {
    match cli_level {
        Some(lvl) => level_from_log_level(lvl),
        None if verbose => tracing::Level::DEBUG,
        None => env
            .and_then(parse_level_str)
            .unwrap_or(tracing::Level::WARN),
    }
}

fn level_from_log_level(lvl: LogLevel) -> tracing::Level {
    match lvl {
        LogLevel::Error => tracing::Level::ERROR,
        LogLevel::Warn => tracing::Level::WARN,
        LogLevel::Info => tracing::Level::INFO,
        LogLevel::Debug => tracing::Level::DEBUG,
        LogLevel::Trace => tracing::Level::TRACE,
    }
}

fn parse_level_str(s: &str) -> Option<tracing::Level> {
    match s.trim().to_lowercase().as_str() {
        "error" => Some(tracing::Level::ERROR),
        "warn" | "warning" => Some(tracing::Level::WARN),
        "info" => Some(tracing::Level::INFO),
        "debug" => Some(tracing::Level::DEBUG),
        "trace" => Some(tracing::Level::TRACE),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_beats_verbose_and_env() {
        let level = resolve_level(Some(LogLevel::Error), true, Some("trace"));
        assert_eq!(level, tracing::Level::ERROR);
    }

    #[test]
    fn verbose_means_debug() {
        assert_eq!(resolve_level(None, true, Some("error")), tracing::Level::DEBUG);
    }

    #[test]
    fn env_then_default() {
        assert_eq!(resolve_level(None, false, Some(" Info ")), tracing::Level::INFO);
        assert_eq!(resolve_level(None, false, Some("loud")), tracing::Level::WARN);
        assert_eq!(resolve_level(None, false, None), tracing::Level::WARN);
    }
}
