use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfError {
    #[error("Invalid argument: {0}")]
    Validation(String),

    #[error("Could not load existing config at {}: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("File at {} is not user-conf file", .0.display())]
    NotConfigFile(PathBuf),

    #[error("Cannot determine home directory (pass one explicitly)")]
    NoHomeDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfError {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        ConfError::Validation(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, ConfError>;
