//! Error types

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop an invocation
#[derive(Debug, Error)]
pub enum UcliError {
    #[error("Missing value for --config")]
    MissingConfigValue,

    #[error("You need to provide an operation, e.g. get, create, update, delete")]
    MissingOperation,

    #[error("Error loading configuration: no configuration file found (looked for {})", .searched.join(", "))]
    ConfigNotFound { searched: Vec<String> },

    #[error("Error loading configuration from {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Error loading configuration from {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Configuration has no `url` to send requests to")]
    MissingUrl,

    #[error("Invalid request URL {url}: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("Error reading token file {path}: {source}")]
    TokenFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid header `{name}` in configuration: {reason}")]
    InvalidHeader { name: String, reason: String },

    #[error("Error building request: {0}")]
    Build(#[source] reqwest::Error),

    #[error("Request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Error reading response body: {0}")]
    Body(#[source] reqwest::Error),
}

impl UcliError {
    /// Errors caused by how the CLI was invoked rather than by I/O
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::MissingConfigValue | Self::MissingOperation)
    }
}

pub type Result<T> = std::result::Result<T, UcliError>;
