use std::{collections::HashMap, sync::Arc};

use arrow::datatypes::{DataType, Field, Schema};
use rowimport_core::{CollectionSchema, DataType as FieldType, FieldSchema, SchemaError};

use crate::error::ArrowConvertError;

/// Arrow field metadata key holding the collection field ID.
///
/// The Parquet writer maps this key onto the Parquet `field_id`.
pub const FIELD_ID_KEY: &str = "PARQUET:field_id";

// ---------------------------------------------------------------------------
// Convert a collection schema to an Arrow schema
// ---------------------------------------------------------------------------

/// Converts a collection schema into an Arrow `Schema`.
///
/// One non-nullable field is produced per output field (every declared field
/// except an auto-generated primary key), in declaration order.
pub fn collection_to_arrow_schema(schema: &CollectionSchema) -> Result<Schema, ArrowConvertError> {
    let fields = schema
        .output_fields()
        .map(field_schema_to_arrow_field)
        .collect::<Result<Vec<Field>, _>>()?;
    Ok(Schema::new(fields))
}

fn field_schema_to_arrow_field(f: &FieldSchema) -> Result<Field, ArrowConvertError> {
    let metadata = HashMap::from([(FIELD_ID_KEY.to_string(), f.field_id.to_string())]);
    Ok(Field::new(&f.name, field_schema_to_datatype(f)?, false).with_metadata(metadata))
}

fn field_schema_to_datatype(f: &FieldSchema) -> Result<DataType, ArrowConvertError> {
    Ok(match f.data_type {
        FieldType::Bool => DataType::Boolean,
        FieldType::Int8 => DataType::Int8,
        FieldType::Int16 => DataType::Int16,
        FieldType::Int32 => DataType::Int32,
        FieldType::Int64 => DataType::Int64,
        FieldType::Float => DataType::Float32,
        FieldType::Double => DataType::Float64,
        FieldType::String | FieldType::VarChar | FieldType::Json => DataType::Utf8,
        FieldType::BinaryVector => {
            let dim = f.dim()?;
            if dim % 8 != 0 {
                return Err(SchemaError::InvalidDim {
                    field: f.name.clone(),
                    value: dim.to_string(),
                }
                .into());
            }
            DataType::FixedSizeBinary(arrow_size(f, dim / 8)?)
        }
        FieldType::FloatVector => {
            let dim = f.dim()?;
            DataType::FixedSizeList(
                Arc::new(Field::new("item", DataType::Float32, false)),
                arrow_size(f, dim)?,
            )
        }
        FieldType::Float16Vector => {
            let dim = f.dim()?;
            DataType::FixedSizeBinary(arrow_size(f, dim.saturating_mul(2))?)
        }
        FieldType::Array => DataType::List(Arc::new(Field::new(
            "item",
            element_to_datatype(f)?,
            false,
        ))),
        FieldType::None | FieldType::BFloat16Vector | FieldType::SparseFloatVector => {
            return Err(ArrowConvertError::UnsupportedType {
                field: f.name.clone(),
                data_type: f.data_type,
            });
        }
    })
}

/// Arrow item type of an `Array` field. Narrow integers share `Int32`.
fn element_to_datatype(f: &FieldSchema) -> Result<DataType, ArrowConvertError> {
    let element_type = f.element_type.unwrap_or_default();
    Ok(match element_type {
        FieldType::Bool => DataType::Boolean,
        FieldType::Int8 | FieldType::Int16 | FieldType::Int32 => DataType::Int32,
        FieldType::Int64 => DataType::Int64,
        FieldType::Float => DataType::Float32,
        FieldType::Double => DataType::Float64,
        FieldType::String | FieldType::VarChar => DataType::Utf8,
        _ => {
            return Err(ArrowConvertError::UnsupportedType {
                field: f.name.clone(),
                data_type: element_type,
            });
        }
    })
}

fn arrow_size(f: &FieldSchema, size: usize) -> Result<i32, ArrowConvertError> {
    i32::try_from(size).map_err(|_| ArrowConvertError::DimOverflow {
        field: f.name.clone(),
        dim: size,
    })
}
