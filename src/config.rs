use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Directory name used under the platform config and data dirs.
pub const APP_DIR_NAME: &str = "toroid-snake";

const SETTINGS_FILE_NAME: &str = "settings.json";

/// Default side length of the square board.
pub const DEFAULT_GRID_SIZE: u16 = 10;

/// Largest board that still fits a typical terminal with two-column cells.
pub const MAX_GRID_SIZE: u16 = 64;

/// Base tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 500;

/// Minimum tick interval in milliseconds.
pub const MIN_TICK_INTERVAL_MS: u64 = 50;

/// Tick interval reduction applied each time good food is eaten.
pub const TICK_DECREMENT_MS: u64 = 10;

/// Points awarded per good food.
pub const FOOD_REWARD: u32 = 10;

/// How often a paused session re-checks its flags.
pub const PAUSE_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Number of entries kept in the high-score list.
pub const HIGH_SCORE_CAPACITY: usize = 10;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Square `side × side` grid.
    #[must_use]
    pub fn square(side: u16) -> Self {
        Self {
            width: side,
            height: side,
        }
    }
}

/// User-tunable settings. Only board size and tick duration are exposed.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub grid_size: u16,
    pub tick_interval_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

impl Settings {
    /// Loads settings from `path`, falling back to defaults when the file
    /// does not exist.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies command-line overrides on top of file values.
    #[must_use]
    pub fn with_overrides(self, grid_size: Option<u16>, tick_interval_ms: Option<u64>) -> Self {
        Self {
            grid_size: grid_size.unwrap_or(self.grid_size),
            tick_interval_ms: tick_interval_ms.unwrap_or(self.tick_interval_ms),
        }
    }

    /// Checks the values against the supported ranges.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if !(1..=MAX_GRID_SIZE).contains(&self.grid_size) {
            return Err(ConfigError::GridSize {
                value: self.grid_size,
                min: 1,
                max: MAX_GRID_SIZE,
            });
        }

        if self.tick_interval_ms < MIN_TICK_INTERVAL_MS {
            return Err(ConfigError::TickInterval {
                value: self.tick_interval_ms,
                min: MIN_TICK_INTERVAL_MS,
            });
        }

        Ok(self)
    }

    #[must_use]
    pub fn grid(self) -> GridSize {
        GridSize::square(self.grid_size)
    }

    #[must_use]
    pub fn tick_interval(self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

/// Returns the platform-correct settings file path.
#[must_use]
pub fn settings_path() -> PathBuf {
    let mut base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SETTINGS_FILE_NAME);
    base
}

/// Returns `<data_local_dir>/toroid-snake/<file_name>`, or a path in the
/// working directory when the platform has no data dir.
#[must_use]
pub fn data_file_path(file_name: &str) -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(file_name);
    base
}
