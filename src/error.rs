use std::{io, path::PathBuf};

use arrow::error::ArrowError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} has no header line", path.display())]
    Empty { path: PathBuf },

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("CSV chunk parse error: {0}")]
    Arrow(#[from] ArrowError),

    /// stdout or stdin failed while the handshake was running.
    #[error("protocol stream error: {0}")]
    Stream(#[from] io::Error),

    #[error("consumer closed its input before acknowledging")]
    ConsumerClosed,

    #[error("internal invariant failed: {0}")]
    Invariant(String),
}
