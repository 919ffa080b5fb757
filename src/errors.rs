use std::path::PathBuf;
use thiserror::Error;

// Specific errors from the modules we wrap
use crate::config::ConfigError;
use crate::sink::SinkError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Output error: {0}")]
    Sink(#[from] SinkError),

    #[error("Failed to read input {path}: {source}")]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read standard input: {0}")]
    Stdin(#[source] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
