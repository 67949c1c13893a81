//! Error type for this crate.
use std::io;

/// A result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// The mapping schema is not valid YAML or has an unexpected shape.
    #[error("invalid mapping: {0}")]
    InvalidMapping(#[from] serde_yaml::Error),
    /// A serialization error.
    #[error("serialization error: {0}")]
    Serializer(#[from] serde_json::Error),
}
