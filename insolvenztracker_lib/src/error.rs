//! Error types for the library layer.
//!
//! The matching core never fails; these errors come from the edges where
//! records and configuration are read from disk.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading inputs or configuration.
#[derive(Error, Debug)]
pub enum InsolvencyError {
    /// Reading a file from disk failed.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// JSON serialization or deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// The TOML configuration could not be parsed.
    #[error("TOML parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
    /// The configuration parsed but holds values the engine cannot use.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, InsolvencyError>;
