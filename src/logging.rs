//! Logging setup
//!
//! Everything goes through the `log` facade. The backend is `env_logger`
//! writing to `noksu-launcher.log` next to the executable, truncated on each
//! start. When the file can't be created we fall back to stderr.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use log::LevelFilter;

/// Log file name, placed in the executable's directory
pub const LOG_FILE_NAME: &str = "noksu-launcher.log";

static INITIALIZED: OnceLock<()> = OnceLock::new();

/// Get the log file path (same directory as executable)
pub fn log_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(LOG_FILE_NAME)
}

fn open_log_file(path: &Path) -> Option<File> {
    OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true) // Start fresh each run
        .open(path)
        .ok()
}

/// Initialize the global logger. Calling it again is a no-op.
pub fn init() {
    init_with_level(LevelFilter::Info);
}

/// Initialize the global logger with an explicit level
pub fn init_with_level(level: LevelFilter) {
    if INITIALIZED.set(()).is_err() {
        return;
    }

    let path = log_path();
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).format(|buf, record| {
        writeln!(
            buf,
            "[{}] [{:5}] [{}] {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    let file = open_log_file(&path);
    let to_file = file.is_some();
    if let Some(file) = file {
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    // Another logger may already be installed (e.g. by a test harness)
    if builder.try_init().is_err() {
        return;
    }

    if to_file {
        log::info!("Logging to: {}", path.display());
    } else {
        log::warn!("Could not open {}, logging to stderr", path.display());
    }
}
