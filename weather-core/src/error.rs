use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, WeatherError>;

#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    NotFound(String),

    #[error("label '{0}' already exists. Use a different label or remove it first.")]
    DuplicateLabel(String),

    #[error("no default location set. Use 'uweather default <label>' to set one")]
    NoDefaultSet,

    #[error("request to {endpoint} failed: {cause}")]
    RequestFailed { endpoint: String, cause: String },

    #[error("malformed response from {endpoint}: {cause}")]
    MalformedResponse { endpoint: String, cause: String },

    #[error("file I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to (de)serialize locations file {}: {source}", .path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid settings file {}: {cause}", .path.display())]
    Config { path: PathBuf, cause: String },
}

impl WeatherError {
    pub(crate) fn label_not_found(label: &str) -> Self {
        WeatherError::NotFound(format!("label '{label}' not found"))
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        WeatherError::Io {
            path: path.into(),
            source,
        }
    }
}
