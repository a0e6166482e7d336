//! JSON row decoder for `rowimport`.
//!
//! [`RowParser`] converts one untyped JSON record into a typed
//! [`Row`](rowimport_core::Row) conforming to a collection schema. The schema
//! is indexed once into an immutable [`SchemaIndex`] that can be shared by any
//! number of threads decoding records concurrently.
//!
//! Numbers must reach the parser as their original literal text, which is why
//! this crate enables serde_json's `arbitrary_precision` feature: the declared
//! field type alone decides width and precision.
//!
//! ```rust
//! use rowimport_core::{CollectionSchema, DataType, FieldSchema, FieldValue};
//! use rowimport_json::RowParser;
//! use serde_json::json;
//!
//! let schema = CollectionSchema::new(
//!     "docs",
//!     vec![
//!         FieldSchema::new(100, "id", DataType::Int64).with_primary_key(false),
//!         FieldSchema::new(101, "vector", DataType::FloatVector).with_dim(2),
//!     ],
//! );
//! let parser = RowParser::new(&schema).unwrap();
//! let row = parser.parse(&json!({"id": 1, "vector": [0.5, 1.0]})).unwrap();
//! assert!(matches!(row.get(100), Some(FieldValue::Int64(1))));
//! ```

mod array;
mod coerce;
mod number;
mod row_parser;
mod schema_index;

pub use row_parser::RowParser;
pub use schema_index::SchemaIndex;
