//! Tracing subscriber setup for the CLI
//!
//! Console lines go to stderr so stdout stays free for results. An optional
//! file sink is written through a background thread whose [`WorkerGuard`]
//! the caller keeps until exit.

use crate::config::{LogRotation, LoggingOptions};
use crate::error::{Error, Result};
use std::io;
use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, NonBlockingBuilder, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::{self, time::UtcTime};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber described by `options`.
///
/// Returns the file writer's guard when a log file is configured; dropping it
/// flushes pending lines. Returns `Ok(None)` without touching anything if a
/// subscriber is already installed.
pub fn init(options: &LoggingOptions) -> Result<Option<WorkerGuard>> {
    if tracing::dispatcher::has_been_set() {
        return Ok(None);
    }

    let filter = EnvFilter::try_new(&options.level)
        .map_err(|e| Error::Config(format!("Invalid log level '{}': {e}", options.level)))?;

    let (writer, guard) = match file_writer(options)? {
        Some((writer, guard)) => (Some(writer), Some(guard)),
        None => (None, None),
    };

    let file = writer.map(|writer| {
        fmt::layer()
            .with_timer(UtcTime::rfc_3339())
            .with_ansi(false)
            .with_writer(writer)
    });
    let console = fmt::layer()
        .with_timer(UtcTime::rfc_3339())
        .with_ansi(options.color)
        .with_target(false)
        .with_writer(io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(file)
        .with(console)
        .try_init()
        .map_err(|e| Error::Config(format!("Failed to install tracing subscriber: {e}")))?;

    Ok(guard)
}

fn file_writer(options: &LoggingOptions) -> Result<Option<(NonBlocking, WorkerGuard)>> {
    let Some(path) = options.file.as_deref() else {
        return Ok(None);
    };

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            Error::Config(format!("Log file path '{}' has no file name", path.display()))
        })?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir).map_err(|e| {
        Error::Config(format!("Failed to create log directory {}: {e}", dir.display()))
    })?;

    let rotation = match options.rotation {
        Some(LogRotation::Hourly) => Rotation::HOURLY,
        Some(LogRotation::Daily) => Rotation::DAILY,
        None => Rotation::NEVER,
    };

    let appender = RollingFileAppender::builder()
        .rotation(rotation)
        .filename_prefix(file_name)
        .build(dir)
        .map_err(|e| Error::Config(format!("Failed to open log file {}: {e}", path.display())))?;

    Ok(Some(NonBlockingBuilder::default().lossy(false).finish(appender)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn repeated_init_is_a_no_op() {
        let options = LoggingOptions {
            color: false,
            ..LoggingOptions::default()
        };
        init(&options).unwrap();
        assert!(tracing::dispatcher::has_been_set());
        assert!(init(&options).unwrap().is_none());
    }

    #[test]
    fn no_file_means_no_writer() {
        assert!(file_writer(&LoggingOptions::default()).unwrap().is_none());
    }

    #[test]
    fn dropping_guard_flushes_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("logs").join("urlqr.log");
        let options = LoggingOptions {
            file: Some(path.clone()),
            ..LoggingOptions::default()
        };

        let (mut writer, guard) = file_writer(&options).unwrap().unwrap();
        writer.write_all(b"QR code saved\n").unwrap();
        drop(guard);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("QR code saved"));
    }
}
