//! Error types for level loading, configuration and asset lookup.
//!
//! Collisions, level boundaries and player death are ordinary control flow
//! and never surface here.

use std::io;
use std::num::ParseIntError;
use std::path::PathBuf;

/// Errors raised while reading a level grid.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot read level data {}: {source}", path.display())]
    Resource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("row {row}, field {col}: {value:?} is not an integer")]
    BadField {
        row: usize,
        col: usize,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("level data has more than {limit} rows")]
    TooManyRows { limit: usize },

    #[error("row {row} has more than {limit} fields")]
    TooManyFields { row: usize, limit: usize },
}

impl LoadError {
    /// True for malformed content, false when the resource itself was unreadable
    pub fn is_format(&self) -> bool {
        !matches!(self, LoadError::Resource { .. })
    }
}

/// Errors raised while reading or writing a JSON configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("config file {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Raised by an asset source that has nothing for a key.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AssetError {
    #[error("no asset for key '{key}'")]
    Missing { key: String },
}
