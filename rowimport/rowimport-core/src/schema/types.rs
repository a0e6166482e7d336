use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter, Result},
};

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// Numeric identity of a field within a collection.
pub type FieldId = i64;

/// Type parameter key holding the dimensionality of a vector field.
pub const DIM_KEY: &str = "dim";

/// Declared data type of a field (or of the elements of an array field).
///
/// The set is closed: every consumer matches exhaustively, so adding a type
/// forces a decision in each coercion and conversion path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DataType {
    #[default]
    None,
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    Float,
    Double,
    String,
    VarChar,
    Array,
    #[serde(rename = "JSON")]
    Json,
    BinaryVector,
    FloatVector,
    Float16Vector,
    BFloat16Vector,
    SparseFloatVector,
}

impl DataType {
    /// Dense vector types, i.e. those carrying a `dim` type parameter.
    pub fn is_vector(&self) -> bool {
        matches!(
            self,
            DataType::BinaryVector
                | DataType::FloatVector
                | DataType::Float16Vector
                | DataType::BFloat16Vector
        )
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            DataType::None => "None",
            DataType::Bool => "Bool",
            DataType::Int8 => "Int8",
            DataType::Int16 => "Int16",
            DataType::Int32 => "Int32",
            DataType::Int64 => "Int64",
            DataType::Float => "Float",
            DataType::Double => "Double",
            DataType::String => "String",
            DataType::VarChar => "VarChar",
            DataType::Array => "Array",
            DataType::Json => "JSON",
            DataType::BinaryVector => "BinaryVector",
            DataType::FloatVector => "FloatVector",
            DataType::Float16Vector => "Float16Vector",
            DataType::BFloat16Vector => "BFloat16Vector",
            DataType::SparseFloatVector => "SparseFloatVector",
        }
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(self.type_name())
    }
}

/// Static metadata for one column of a collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    pub field_id: FieldId,
    pub name: String,
    pub data_type: DataType,
    /// Element type of an `Array` field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_type: Option<DataType>,
    #[serde(default)]
    pub is_primary_key: bool,
    /// The primary key value is assigned by the system.
    #[serde(default)]
    pub auto_id: bool,
    /// The field absorbs every input key that matches no declared field.
    #[serde(default)]
    pub is_dynamic: bool,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub type_params: BTreeMap<String, String>,
}

impl FieldSchema {
    pub fn new(field_id: FieldId, name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            field_id,
            name: name.into(),
            data_type,
            element_type: None,
            is_primary_key: false,
            auto_id: false,
            is_dynamic: false,
            type_params: BTreeMap::new(),
        }
    }

    pub fn with_element_type(mut self, element_type: DataType) -> Self {
        self.element_type = Some(element_type);
        self
    }

    pub fn with_type_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.type_params.insert(key.into(), value.into());
        self
    }

    pub fn with_dim(self, dim: usize) -> Self {
        self.with_type_param(DIM_KEY, dim.to_string())
    }

    pub fn with_primary_key(mut self, auto_id: bool) -> Self {
        self.is_primary_key = true;
        self.auto_id = auto_id;
        self
    }

    pub fn with_dynamic(mut self) -> Self {
        self.is_dynamic = true;
        self
    }

    pub fn is_auto_id(&self) -> bool {
        self.is_primary_key && self.auto_id
    }

    /// Dimensionality declared through the `dim` type parameter.
    pub fn dim(&self) -> std::result::Result<usize, SchemaError> {
        let raw = self
            .type_params
            .get(DIM_KEY)
            .ok_or_else(|| SchemaError::MissingDim {
                field: self.name.clone(),
            })?;
        match raw.trim().parse::<usize>() {
            Ok(dim) if dim > 0 => Ok(dim),
            _ => Err(SchemaError::InvalidDim {
                field: self.name.clone(),
                value: raw.clone(),
            }),
        }
    }
}

/// A collection: ordered field descriptors sharing one primary key.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CollectionSchema {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub fields: Vec<FieldSchema>,
    /// Undeclared record keys are kept in the field marked `is_dynamic`.
    #[serde(default)]
    pub enable_dynamic_field: bool,
}

impl CollectionSchema {
    pub fn new(name: impl Into<String>, fields: Vec<FieldSchema>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            fields,
            enable_dynamic_field: false,
        }
    }

    /// Mark the collection as carrying a dynamic field.
    pub fn with_dynamic_field(mut self) -> Self {
        self.enable_dynamic_field = true;
        self
    }

    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    /// Fields that appear in decoded rows: every declared field except an
    /// auto-generated primary key, in declaration order.
    pub fn output_fields(&self) -> impl Iterator<Item = &FieldSchema> {
        self.fields.iter().filter(|f| !f.is_auto_id())
    }
}

impl Display for CollectionSchema {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = super::format_collection_schema(self)?;
        f.write_str(&text)
    }
}
