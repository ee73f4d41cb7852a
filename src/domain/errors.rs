use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the directory's data sources, stores and exporters.
///
/// None of these are fatal to the browser: the coordinator degrades to an
/// empty list or reports them in the status bar.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Failed to fetch profiles from {location}: {message}")]
    Fetch { location: String, message: String },

    #[error("Invalid profile data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Export failed: {0}")]
    Export(String),

    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),
}

impl DomainError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DomainError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
