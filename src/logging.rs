use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{AppError, Result};

/// Install the file logger when `log_file` is given.
///
/// The terminal belongs to the UI, so nothing is ever written to stderr.
/// Without a log file no subscriber is installed and tracing macros are
/// no-ops. The returned guard must live until exit to flush the writer.
pub fn init(log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let Some(log_file) = log_file else {
        return Ok(None);
    };

    let dir = match log_file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = log_file
        .file_name()
        .ok_or_else(|| AppError::InvalidPath(format!("{} is not a file", log_file.display())))?;

    std::fs::create_dir_all(dir)?;
    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_filter(filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .try_init()
        .map_err(|e| AppError::Config(format!("logger: {e}")))?;

    Ok(Some(guard))
}
