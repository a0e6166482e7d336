//! Format-agnostic core types for `rowimport`.
//!
//! This crate provides the collection schema descriptors ([`CollectionSchema`] /
//! [`FieldSchema`] / [`DataType`]), the strongly-typed output record ([`Row`])
//! and the error types shared by every decoder built on top of them.

mod error;
mod row;
mod schema;

pub use error::{RowError, RowErrorKind, SchemaError};
pub use row::{FieldValue, Row, ScalarArray};
pub use schema::{
    CollectionSchema, DIM_KEY, DataType, FieldId, FieldSchema, format_collection_schema,
};
