//! Error types for the row reader.

use rowimport_arrow::ArrowConvertError;
use rowimport_core::{RowError, SchemaError};

/// Errors produced by [`RowReader`](crate::RowReader).
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    /// I/O error while opening or memory-mapping a file.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The collection schema cannot be used for decoding.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The input is not a well-formed JSON array.
    #[error("malformed row document: {0}")]
    Json(#[from] serde_json::Error),

    /// A record failed to decode. `index` is its zero-based position in the
    /// input array.
    #[error("row {index}: {source}")]
    Row {
        index: usize,
        #[source]
        source: RowError,
    },

    /// Decoded rows could not be converted to Arrow.
    #[error(transparent)]
    Arrow(#[from] ArrowConvertError),

    /// An error returned by the user-supplied callback.
    #[error(transparent)]
    Callback(Box<dyn std::error::Error + Send + Sync>),
}
