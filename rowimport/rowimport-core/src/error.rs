//! Error types for schema indexing and row decoding.

use crate::schema::{DataType, FieldId};

/// Error returned while indexing a [`CollectionSchema`](crate::CollectionSchema).
///
/// A schema that fails here cannot be used for import at all.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    #[error("schema has no vector field")]
    NoVectorField,

    #[error("schema has more than one vector field: '{first}' and '{second}'")]
    MultipleVectorFields { first: String, second: String },

    #[error("vector field '{field}' has no 'dim' type parameter")]
    MissingDim { field: String },

    #[error("vector field '{field}' has invalid dim '{value}'")]
    InvalidDim { field: String, value: String },

    #[error("vector field '{field}' of type {data_type} with dim {dim} is too large")]
    DimTooLarge {
        field: String,
        data_type: DataType,
        dim: usize,
    },

    #[error("schema has no primary key field")]
    NoPrimaryKey,

    #[error("schema has more than one primary key field: '{first}' and '{second}'")]
    MultiplePrimaryKeys { first: String, second: String },

    #[error("schema has more than one dynamic field: '{first}' and '{second}'")]
    MultipleDynamicFields { first: String, second: String },

    /// Dynamic values are stored as a JSON object, so the field must be JSON.
    #[error("dynamic field '{field}' must have type 'JSON', got '{data_type}'")]
    InvalidDynamicFieldType { field: String, data_type: DataType },

    #[error("dynamic field is enabled but no field is marked dynamic")]
    DynamicFieldNotDeclared,

    #[error("field '{field}' is marked dynamic but the dynamic field is not enabled")]
    DynamicFieldNotEnabled { field: String },

    #[error("duplicate field id {field_id} ('{field}')")]
    DuplicateFieldId { field_id: FieldId, field: String },

    #[error("duplicate field name '{field}'")]
    DuplicateFieldName { field: String },
}

/// Broad classification of a [`RowError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowErrorKind {
    /// The record is not a key/value map.
    Format,
    /// A structural rule of the schema is broken.
    SchemaViolation,
    /// A value's runtime shape does not match the declared type.
    TypeMismatch,
    /// A vector's length does not match the declared dimensionality.
    DimensionMismatch,
    /// A numeric literal does not fit the target width.
    Range,
    /// A numeric or JSON-text literal is malformed.
    Parse,
    /// The declared type has no coercion rule.
    UnsupportedType,
}

/// Error returned when a single record cannot be decoded.
///
/// Decoding is fail-fast: the first problem found is reported and no partial
/// row is produced.
#[derive(Debug, thiserror::Error)]
pub enum RowError {
    #[error("invalid JSON format, each row should be a key-value map, got {actual}")]
    NotAnObject { actual: &'static str },

    #[error("the primary key '{field}' is auto-generated, no need to provide")]
    AutoIdProvided { field: String },

    #[error("'{field}' is the dynamic field and cannot be set explicitly")]
    DynamicFieldProvided { field: String },

    #[error("the field '{field}' is not defined in schema")]
    UndefinedField { field: String },

    #[error("value of field '{field}' is missed")]
    MissingField { field: String },

    #[error("expected type '{expected}' for field '{field}', got type '{actual}' with value '{value}'")]
    TypeMismatch {
        field: String,
        expected: DataType,
        actual: &'static str,
        value: String,
    },

    /// An element of a vector or array field has the wrong shape.
    #[error(
        "expected element type '{expected}' in field '{field}', got type '{actual}' at index {index} of '{value}'"
    )]
    ElementTypeMismatch {
        field: String,
        expected: &'static str,
        index: usize,
        actual: &'static str,
        value: String,
    },

    #[error(
        "expected dim '{dim}' for field '{field}' with type '{data_type}', got {actual_len} elements (expected {expected_len})"
    )]
    DimensionMismatch {
        field: String,
        data_type: DataType,
        dim: usize,
        expected_len: usize,
        actual_len: usize,
    },

    #[error("value '{literal}' is out of range for type '{target}' in field '{field}'")]
    OutOfRange {
        field: String,
        target: &'static str,
        literal: String,
    },

    #[error("invalid {target} literal '{literal}' for field '{field}'")]
    InvalidNumber {
        field: String,
        target: &'static str,
        literal: String,
    },

    #[error("invalid JSON text for field '{field}': {source}")]
    InvalidJson {
        field: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("unsupported data type '{data_type}' for field '{field}'")]
    UnsupportedType { field: String, data_type: DataType },

    #[error("unsupported element type '{element_type}' for array field '{field}'")]
    UnsupportedElementType {
        field: String,
        element_type: DataType,
    },
}

impl RowError {
    pub fn kind(&self) -> RowErrorKind {
        match self {
            RowError::NotAnObject { .. } => RowErrorKind::Format,
            RowError::AutoIdProvided { .. }
            | RowError::DynamicFieldProvided { .. }
            | RowError::UndefinedField { .. }
            | RowError::MissingField { .. } => RowErrorKind::SchemaViolation,
            RowError::TypeMismatch { .. } | RowError::ElementTypeMismatch { .. } => {
                RowErrorKind::TypeMismatch
            }
            RowError::DimensionMismatch { .. } => RowErrorKind::DimensionMismatch,
            RowError::OutOfRange { .. } => RowErrorKind::Range,
            RowError::InvalidNumber { .. } | RowError::InvalidJson { .. } => RowErrorKind::Parse,
            RowError::UnsupportedType { .. } | RowError::UnsupportedElementType { .. } => {
                RowErrorKind::UnsupportedType
            }
        }
    }

    /// Name of the offending field, when the error concerns one.
    pub fn field(&self) -> Option<&str> {
        match self {
            RowError::NotAnObject { .. } => None,
            RowError::AutoIdProvided { field }
            | RowError::DynamicFieldProvided { field }
            | RowError::UndefinedField { field }
            | RowError::MissingField { field }
            | RowError::TypeMismatch { field, .. }
            | RowError::ElementTypeMismatch { field, .. }
            | RowError::DimensionMismatch { field, .. }
            | RowError::OutOfRange { field, .. }
            | RowError::InvalidNumber { field, .. }
            | RowError::InvalidJson { field, .. }
            | RowError::UnsupportedType { field, .. }
            | RowError::UnsupportedElementType { field, .. } => Some(field.as_str()),
        }
    }
}
