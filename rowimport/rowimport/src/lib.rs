//! Schema-driven import of JSON row documents.
//!
//! [`RowReader`] streams a top-level JSON array of row objects, decodes each
//! record against a collection schema and hands the results out in batches,
//! either as decoded [`Row`](rowimport_core::Row)s or as Arrow record batches.

mod error;
mod reader;

pub use error::ImportError;
pub use reader::{RowReader, RowReaderBuilder};
pub use rowimport_arrow as arrow;
pub use rowimport_core as core;
pub use rowimport_json as json;
