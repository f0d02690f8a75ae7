//! Subscriber setup for the benchmark binary.

use std::env;
use std::fs::{File, OpenOptions};
use std::io;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

type BoxError = Box<dyn std::error::Error>;

fn open_log_file(path: &str) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

fn parse_filter(level: &str) -> Result<EnvFilter, BoxError> {
    if level.eq_ignore_ascii_case("off") {
        return Ok(EnvFilter::default().add_directive(LevelFilter::OFF.into()));
    }
    EnvFilter::try_new(level).map_err(|err| format!("Invalid log filter: {err}").into())
}

/// Install the global subscriber.
///
/// The filter comes from `level`, then `LPLINK_TRACE`, and defaults to `off`.
/// `LPLINK_LOG_FORMAT` selects `pretty` (default) or `json`; `LPLINK_LOG_FILE`
/// adds a second, uncoloured sink. Returns false if a subscriber was already
/// installed.
pub fn init(level: Option<&str>) -> Result<bool, BoxError> {
    if tracing::dispatcher::has_been_set() {
        return Ok(false);
    }

    let level_value = level
        .map(str::to_string)
        .or_else(|| env::var("LPLINK_TRACE").ok())
        .unwrap_or_else(|| "off".to_string());
    let filter = parse_filter(&level_value)?;

    let format = env::var("LPLINK_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());
    let use_json = format.eq_ignore_ascii_case("json");
    if !use_json && !format.eq_ignore_ascii_case("pretty") {
        return Err("Invalid LPLINK_LOG_FORMAT (expected 'json' or 'pretty')".into());
    }
    let log_file = env::var("LPLINK_LOG_FILE").ok();

    if use_json {
        let stderr_layer = tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .json();
        let base = tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer);
        if let Some(path) = log_file {
            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(open_log_file(&path)?)
                .with_ansi(false)
                .json();
            base.with(file_layer).try_init()?;
        } else {
            base.try_init()?;
        }
    } else {
        let stderr_layer = tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .pretty();
        let base = tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer);
        if let Some(path) = log_file {
            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(open_log_file(&path)?)
                .with_ansi(false)
                .pretty();
            base.with(file_layer).try_init()?;
        } else {
            base.try_init()?;
        }
    }

    Ok(true)
}
