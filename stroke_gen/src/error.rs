//! Error types for stroke generation.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while configuring, assembling or persisting strokes.
#[derive(Debug, Error)]
pub enum StrokeError {
    /// A required configuration value is absent or has the wrong shape.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A point or stroke row does not carry the expected number of fields.
    #[error("expected {expected} fields per row, found {found}")]
    Dimensionality { expected: usize, found: usize },

    /// The group column of a stroke row is not a non-negative integer.
    #[error("invalid stroke group id {0}")]
    InvalidGroupId(f64),

    /// A stroke type code outside the known encoding.
    #[error("invalid stroke type code {0}")]
    InvalidStrokeType(i64),

    /// The operation requires at least one curve or point.
    #[error("strokes could not be blank")]
    EmptyStrokes,

    /// Freeform type tags do not line up with the stored points.
    #[error("stroke types length {types} does not match point count {points}")]
    TypeLength { types: usize, points: usize },

    /// No handler is registered under the requested name.
    #[error("geometry '{0}' is not found")]
    UnknownGeometry(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Result alias used across the crate.
pub type StrokeResult<T> = Result<T, StrokeError>;
