use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use crate::config::data_file_path;

const LOG_FILE_NAME: &str = "toroid-snake.log";

/// Returns the platform-correct log file path.
#[must_use]
pub fn log_path() -> PathBuf {
    data_file_path(LOG_FILE_NAME)
}

/// Sends `log` records to `path`, truncating any previous run's log.
///
/// The terminal is owned by the game screen, so nothing is logged to
/// stdout or stderr.
pub fn init_file_logger(path: &Path, level: LevelFilter) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Off)
        .build();

    WriteLogger::init(level, config, File::create(path)?)
        .map_err(|error| io::Error::new(io::ErrorKind::AlreadyExists, error))
}
