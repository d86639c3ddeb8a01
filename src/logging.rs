//! Log setup: stderr plus a daily rolling file.

use std::path::PathBuf;

use directories::ProjectDirs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOG_FILE_PREFIX: &str = "employee-console.log";

/// Platform log directory, e.g. `~/.local/share/employee-console/logs`.
pub fn default_log_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", "Gianged", "employee-console").map(|dirs| dirs.data_dir().join("logs"))
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `info`. The returned guard flushes the file
/// writer and must live until the program exits.
pub fn init(log_dir: Option<PathBuf>) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let (file_layer, guard) = match log_dir.filter(|dir| std::fs::create_dir_all(dir).is_ok()) {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_target(true).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    guard
}
