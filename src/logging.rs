//! Logging setup
//!
//! A provider plugin cannot write diagnostics to stdout - the host protocol
//! owns it - so tracing output goes to a file under the user's config
//! directory. The returned guard must be held for the process lifetime or
//! buffered lines are lost.

use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

/// Install a file-backed tracing subscriber at `level`
///
/// Returns `None` (and installs nothing) when `level` is `None` or the log
/// file cannot be opened. `RUST_LOG` refines the level per module when set.
pub fn init(level: Option<Level>) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let level = level?;

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .ok()?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking.with_max_level(level))
        .with_ansi(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("appengine-provider logging to {:?}", log_path);

    Some(guard)
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("appengine-provider").join("provider.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".appengine-provider").join("provider.log");
    }
    PathBuf::from("appengine-provider.log")
}
