use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to place a food item on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum SpawnError {
    /// Every cell is covered by the snake or the forbidden cell.
    #[error("no free cell left on a {width}x{height} grid")]
    GridFull { width: u16, height: u16 },
}

/// Failure to persist the high-score list.
#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("failed to create score directory {path}: {source}")]
    CreateDir { path: PathBuf, source: io::Error },
    #[error("failed to write score file {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// Invalid or unreadable settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("grid size must be between {min} and {max}, got {value}")]
    GridSize { value: u16, min: u16, max: u16 },
    #[error("tick interval must be at least {min} ms, got {value} ms")]
    TickInterval { value: u64, min: u64 },
}
