//! Logging setup
//!
//! Two outputs:
//! - stderr: level chosen by `-v` count, WARN when quiet
//! - `shared-config.log` in the log directory: level from the tool config,
//!   rotated daily and pruned to `log_max_files`
//!
//! stdout is never written to by logging so JSON output stays parseable.

use crate::config::GlobalConfig;
use crate::utils::paths::expand_tilde;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

const LOG_FILE_PREFIX: &str = "shared-config";

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub log_directory: PathBuf,
    pub file_level: Level,
    pub console_level: Level,
    /// Rotated log files kept after pruning
    pub max_files: u32,
}

impl LoggingConfig {
    pub fn from_config(global: &GlobalConfig, verbosity: u8) -> Self {
        Self {
            log_directory: global.log_directory.clone(),
            file_level: parse_level(&global.log_level),
            console_level: console_level(verbosity),
            max_files: global.log_max_files,
        }
    }
}

/// Console level for a `-v` count
pub fn console_level(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn parse_level(log_level: &str) -> Level {
    log_level.trim().parse().unwrap_or_else(|_| {
        if log_level.eq_ignore_ascii_case("warning") {
            Level::WARN
        } else {
            Level::INFO
        }
    })
}

/// Install the file and console layers
///
/// Keep the returned guard alive until exit; dropping it flushes the file writer.
pub fn init_logging(config: &LoggingConfig) -> Result<LogGuard> {
    let log_dir = expand_tilde(&config.log_directory);
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory: {:?}", log_dir))?;

    let appender = RollingFileAppender::new(
        Rotation::DAILY,
        &log_dir,
        format!("{}.log", LOG_FILE_PREFIX),
    );
    let (writer, file_guard) = tracing_appender::non_blocking(appender);

    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_filter(level_filter(config.file_level)?);

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .with_filter(level_filter(config.console_level)?);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    let removed = prune_logs(&log_dir, config.max_files)?;
    if removed > 0 {
        tracing::debug!("Pruned {} old log file(s) from {:?}", removed, log_dir);
    }

    Ok(LogGuard {
        _file_guard: file_guard,
    })
}

/// Console-only logging for commands that run without a config file
pub fn init_console_logging(level: Level) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string().to_lowercase()));

    // A subscriber may already be installed (tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

/// `RUST_LOG` wins; otherwise this crate logs at `level` and dependencies at WARN
fn level_filter(level: Level) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let own = format!("shared_config={}", level.to_string().to_lowercase())
        .parse::<Directive>()
        .context("Invalid log level directive")?;
    Ok(EnvFilter::new("warn").add_directive(own))
}

/// Delete all but the `keep` most recently modified log files
fn prune_logs(log_dir: &Path, keep: u32) -> Result<usize> {
    let mut logs: Vec<(PathBuf, Option<std::time::SystemTime>)> = fs::read_dir(log_dir)
        .with_context(|| format!("Failed to read log directory: {:?}", log_dir))?
        .filter_map(|entry| entry.ok())
        .filter(|entry| is_log_file(&entry.file_name().to_string_lossy()))
        .map(|entry| {
            let modified = entry.metadata().and_then(|m| m.modified()).ok();
            (entry.path(), modified)
        })
        .collect();

    logs.sort_by(|a, b| b.1.cmp(&a.1));

    let mut removed = 0;
    for (path, _) in logs.into_iter().skip(keep as usize) {
        match fs::remove_file(&path) {
            Ok(()) => removed += 1,
            Err(e) => tracing::warn!("Failed to remove old log file {:?}: {}", path, e),
        }
    }
    Ok(removed)
}

fn is_log_file(name: &str) -> bool {
    name.starts_with(LOG_FILE_PREFIX) && name.contains(".log")
}

/// Keeps the non-blocking file writer alive
pub struct LogGuard {
    _file_guard: WorkerGuard,
}
