//! Structured logging for the library and its demo.
//!
//! Built on the `tracing` ecosystem:
//! - `tracing_subscriber` for the layered subscriber and `EnvFilter`
//! - `tracing_appender` for non-blocking output
//! - JSON lines for machine-readable logs, or a human-readable format
//!
//! Each process gets a run ID (UUID v7). When a log directory is configured
//! the run writes to `veneer-<run_id>.json` (or `.log` for the pretty format)
//! and the oldest run logs beyond `max-files` are removed at startup. Without
//! a directory, logs go to stderr.
//!
//! ```toml
//! [logging]
//! enabled = true
//! level = "info"
//! max-files = 3
//! directory = "logs"
//! format = "json"
//! ```
//!
//! `RUST_LOG` overrides the configured level:
//!
//! ```bash
//! RUST_LOG=veneer_core::view::navigation=trace,info ./veneer-demo
//! ```

use crate::settings::{LogFormat, LoggingSettings};
use anyhow::{Context, Error};
use std::fs;
use std::fs::DirEntry;
use std::path::Path;
use std::sync::mpsc;
use std::sync::{Mutex, OnceLock};
use std::thread;
use std::time::Duration;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const LOG_FILE_PREFIX: &str = "veneer-";
const LOG_FILE_SUFFIXES: [&str; 2] = [".json", ".log"];
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

static LOG_GUARD: OnceLock<Mutex<Option<WorkerGuard>>> = OnceLock::new();
static RUN_ID: OnceLock<String> = OnceLock::new();

/// Unique ID of this process, generated on first access.
///
/// ```
/// use veneer_core::logging::get_run_id;
///
/// let run_id = get_run_id();
/// assert_eq!(get_run_id(), run_id);
/// ```
pub fn get_run_id() -> &'static str {
    RUN_ID.get_or_init(|| Uuid::now_v7().to_string()).as_str()
}

/// Removes the oldest run logs so that at most `max_files` remain.
///
/// Run IDs are UUID v7, so sorting file names sorts runs chronologically.
/// `max_files == 0` keeps everything.
fn cleanup_run_logs(log_dir: &Path, max_files: usize) -> Result<(), Error> {
    if max_files == 0 {
        return Ok(());
    }

    let mut entries = collect_run_log_entries(log_dir)?;
    if entries.len() <= max_files {
        return Ok(());
    }

    entries.sort_by_key(|entry| entry.file_name());
    let remove_count = entries.len() - max_files;
    for entry in entries.into_iter().take(remove_count) {
        fs::remove_file(entry.path())
            .with_context(|| format!("can't remove old log file {}", entry.path().display()))?;
    }

    Ok(())
}

fn collect_run_log_entries(log_dir: &Path) -> Result<Vec<DirEntry>, Error> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(log_dir)
        .with_context(|| format!("can't read log directory {}", log_dir.display()))?
    {
        let entry = entry.context("can't read log directory entry")?;
        if is_run_log_entry(&entry) {
            entries.push(entry);
        }
    }

    Ok(entries)
}

fn is_run_log_entry(entry: &DirEntry) -> bool {
    let file_name = entry.file_name();
    let file_name = file_name.to_string_lossy();
    file_name.starts_with(LOG_FILE_PREFIX)
        && LOG_FILE_SUFFIXES
            .iter()
            .any(|suffix| file_name.ends_with(suffix))
}

/// Opens the writer for this run: a log file in `directory`, or stderr.
fn make_writer(settings: &LoggingSettings) -> Result<(NonBlocking, bool), Error> {
    let Some(directory) = &settings.directory else {
        let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stderr());
        let _ = LOG_GUARD.set(Mutex::new(Some(guard)));
        return Ok((non_blocking, true));
    };

    let current_working_dir =
        std::env::current_dir().context("can't get current working directory")?;
    let log_dir = current_working_dir.join(directory);
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("can't create log directory {}", log_dir.display()))?;

    cleanup_run_logs(&log_dir, settings.max_files)?;

    let mut builder = tracing_appender::rolling::Builder::new()
        .rotation(tracing_appender::rolling::Rotation::NEVER)
        .filename_prefix(format!("{}{}", LOG_FILE_PREFIX, get_run_id()))
        .filename_suffix(settings.format.extension());
    if settings.max_files > 0 {
        builder = builder.max_log_files(settings.max_files);
    }
    let appender = builder
        .build(&log_dir)
        .context("can't initialize log file appender")?;

    let (non_blocking, guard) = tracing_appender::non_blocking(appender);
    let _ = LOG_GUARD.set(Mutex::new(Some(guard)));
    Ok((non_blocking, false))
}

/// Installs the global subscriber described by `settings`.
///
/// Call once at startup and pair with [`shutdown_logging`]. Does nothing when
/// logging is disabled.
///
/// # Errors
///
/// Fails when the log directory can't be prepared, the level doesn't parse,
/// or a global subscriber is already installed.
pub fn init_logging(settings: &LoggingSettings) -> Result<(), Error> {
    if !settings.enabled {
        return Ok(());
    }

    let filter = build_filter(settings)?;
    let (writer, is_terminal) = make_writer(settings)?;

    let fmt_layer = match settings.format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_ansi(false)
            .with_writer(writer)
            .with_current_span(true)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .with_ansi(is_terminal)
            .with_writer(writer)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .context("can't initialize tracing subscriber")?;

    tracing::info!(run_id = get_run_id(), version = VERSION, "logging initialized");

    Ok(())
}

/// Flushes buffered log lines, waiting at most a few seconds.
pub fn shutdown_logging() {
    if let Some(mutex) = LOG_GUARD.get() {
        if let Ok(mut guard_opt) = mutex.lock() {
            if let Some(guard) = guard_opt.take() {
                let (tx, rx) = mpsc::channel();

                thread::spawn(move || {
                    drop(guard);
                    let _ = tx.send(());
                });

                let _ = rx.recv_timeout(SHUTDOWN_TIMEOUT);
            }
        }
    }
}

/// `RUST_LOG` if set, the configured level otherwise (`info` when empty).
fn build_filter(settings: &LoggingSettings) -> Result<EnvFilter, Error> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let level = settings.level.trim();
    let level = if level.is_empty() { "info" } else { level };

    EnvFilter::builder()
        .parse(level)
        .context("invalid logging level")
}
