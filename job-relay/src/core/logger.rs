//! Tracing setup for the relay process.
//!
//! Lines look like `2025-01-01 09:30:00  INFO job_relay::worker: Forwarded post key=-100_7`.
//! Written to stdout, and also appended to `LOG_FILE` unless it is empty.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::{
    fmt::format::{FmtSpan, Writer},
    fmt::time::FormatTime,
    fmt::writer::{BoxMakeWriter, MakeWriterExt},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Registry,
};

/// Used when `RUST_LOG` is unset. sqlx logs every statement at info.
const DEFAULT_FILTER: &str = "info,sqlx=warn";

struct LocalTimestamp;

impl FormatTime for LocalTimestamp {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        write!(w, "{} ", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"))
    }
}

/// Opens `path` for appending, creating missing parent directories.
fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

fn make_writer(log_file: &str) -> io::Result<BoxMakeWriter> {
    if log_file.trim().is_empty() {
        return Ok(BoxMakeWriter::new(io::stdout));
    }
    let file = Arc::new(open_log_file(Path::new(log_file))?);
    Ok(BoxMakeWriter::new(io::stdout.and(file)))
}

/// Installs the global subscriber. Call once per process, after `.env` is loaded so that
/// `RUST_LOG` is visible.
pub fn init_tracing(log_file: &str) -> anyhow::Result<()> {
    let writer = make_writer(log_file)?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_timer(LocalTimestamp)
        .with_target(true)
        .with_thread_ids(false)
        .with_span_events(FmtSpan::NONE)
        .with_ansi(false);

    Registry::default()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to set global subscriber: {}", e))?;

    Ok(())
}
