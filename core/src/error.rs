//! Error types for the panelkit-core library.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for panelkit operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the panel helper utilities.
#[derive(Error, Debug)]
pub enum Error {
    /// Caller-supplied port range is empty or inverted.
    #[error("Invalid port range: start {start} must be below end {end}")]
    InvalidRange { start: u16, end: u16 },

    /// No free port turned up within the configured sweep budget.
    #[error("No free port in {start}..{end} after {sweeps} sweeps")]
    Exhausted { start: u16, end: u16, sweeps: u32 },

    /// A path the caller pointed at does not exist.
    #[error("Not found: {}", .0.display())]
    NotFound(PathBuf),

    /// A path that must be a directory is something else.
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// A widget refresh spec could not be parsed.
    #[error("Invalid refresh spec: {0}")]
    InvalidRefreshSpec(String),

    /// Failed to spawn an external program.
    #[error("Failed to launch {command}: {reason}")]
    Launch { command: String, reason: String },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
