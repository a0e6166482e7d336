use arrow::error::ArrowError;
use rowimport_core::{DataType, SchemaError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArrowConvertError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("unsupported data type '{data_type}' for field '{field}'")]
    UnsupportedType { field: String, data_type: DataType },

    #[error("dim {dim} of field '{field}' exceeds the Arrow size limit")]
    DimOverflow { field: String, dim: usize },

    #[error("column '{column}' has no valid field id metadata")]
    MissingFieldId { column: String },

    #[error("row {row} has no value for column '{column}'")]
    MissingValue { column: String, row: usize },

    #[error("column '{column}' of type {expected} cannot hold a {actual} value")]
    ValueType {
        column: String,
        expected: String,
        actual: &'static str,
    },

    #[error("column '{column}' expects {expected} elements, got {actual}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("JSON value of column '{column}' is not valid UTF-8")]
    InvalidUtf8 {
        column: String,
        #[source]
        source: std::str::Utf8Error,
    },

    #[error("builder is not a {builder}")]
    BuilderMismatch { builder: &'static str },

    #[error("no builder for Arrow data type {0}")]
    UnsupportedArrowType(String),

    #[error(transparent)]
    Arrow(#[from] ArrowError),
}
