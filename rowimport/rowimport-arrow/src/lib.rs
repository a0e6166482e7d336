//! Arrow integration layer for `rowimport`.
//!
//! This crate has two responsibilities:
//! 1. Convert a `rowimport-core` [`CollectionSchema`](rowimport_core::CollectionSchema)
//!    to an Arrow `Schema` ([`collection_to_arrow_schema`]).
//! 2. Convert decoded [`Row`](rowimport_core::Row)s into an Arrow `RecordBatch`
//!    ([`rows_to_record_batch`]).
//!
//! Each Arrow field carries its collection field ID under the
//! [`FIELD_ID_KEY`] metadata key, which is how rows are matched to columns.
//! An auto-generated primary key has no column since decoded rows never
//! contain it.
//!
//! # Typical Flow
//! ```rust
//! use std::sync::Arc;
//!
//! use rowimport_arrow::{collection_to_arrow_schema, rows_to_record_batch};
//! use rowimport_core::{CollectionSchema, DataType, FieldSchema, FieldValue, Row};
//!
//! let schema = CollectionSchema::new(
//!     "docs",
//!     vec![
//!         FieldSchema::new(1, "id", DataType::Int64).with_primary_key(false),
//!         FieldSchema::new(2, "vector", DataType::FloatVector).with_dim(2),
//!     ],
//! );
//! let arrow_schema = Arc::new(collection_to_arrow_schema(&schema).unwrap());
//!
//! let row: Row = [
//!     (1, FieldValue::Int64(7)),
//!     (2, FieldValue::FloatVector(vec![0.5, 1.0])),
//! ]
//! .into_iter()
//! .collect();
//! let batch = rows_to_record_batch(&arrow_schema, &[row]).unwrap();
//! assert_eq!(batch.num_rows(), 1);
//! ```

pub mod error;
pub mod row_convert;
pub mod schema_convert;

/// Re-export of [`error::ArrowConvertError`].
pub use error::ArrowConvertError;
/// Re-exports from [`row_convert`].
pub use row_convert::{field_id_of, rows_to_record_batch};
/// Re-exports from [`schema_convert`].
pub use schema_convert::{FIELD_ID_KEY, collection_to_arrow_schema};
