use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

pub const LOG_ENV_VAR: &str = "PITCHSIDE_LOG";
pub const LOG_FILE_NAME: &str = "pitchside.log";

/// Route `tracing` output to `<data_dir>/pitchside.log`.
///
/// The terminal belongs to the TUI, so nothing is written to stdout/stderr.
/// `PITCHSIDE_LOG` overrides `default_level`. If the file cannot be opened
/// logging stays disabled.
pub fn init(data_dir: &Path, default_level: &str) -> bool {
    let path = data_dir.join(LOG_FILE_NAME);
    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => file,
        Err(_) => return false,
    };

    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .is_ok()
}
