//! Error types used by the crate.

use gview_types::TypesError;
use thiserror::Error;

/// Gview error type.
#[derive(Debug, Error)]
pub enum GviewError {
    /// A layer could not be built from the given input (no features, no coordinates, invalid zoom
    /// range etc.).
    #[error("cannot construct layer: {0}")]
    Construction(String),
    /// A source could not be parsed. The source produces no layers.
    #[error("cannot read source: {0}")]
    Format(String),
    /// A style edit was rejected.
    #[error("invalid style: {0}")]
    InvalidStyle(String),
    /// Geometry conversion error.
    #[error("invalid geometry")]
    Types(#[from] TypesError),
    /// Configuration could not be parsed.
    #[error("invalid configuration")]
    Config(#[from] serde_json::Error),
    /// Error reading data from the FS.
    #[error("failed to read file")]
    FsIo(#[from] std::io::Error),
}
