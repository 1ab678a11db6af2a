use std::io;

use thiserror::Error;

use crate::config::ConfigError;

/// Top-level failure surfaced by the binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("failed to set up logging: {0}")]
    Logger(String),
}
