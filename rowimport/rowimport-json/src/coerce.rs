//! Coercion of untyped JSON values into the representation of a field's
//! declared type.

use std::collections::BTreeMap;

use rowimport_core::{DataType, FieldSchema, FieldValue, RowError};
use serde::de::IgnoredAny;
use serde_json::{Number, Value};

use crate::{
    array::coerce_array,
    number::{self, NumberError},
};

/// Canonical content of a dynamic field when a record carries no extra keys.
pub(crate) const EMPTY_OBJECT: &[u8] = b"{}";

/// Runtime shape of an untyped value, as reported in type errors.
pub(crate) fn shape_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn type_error(field: &FieldSchema, value: &Value) -> RowError {
    RowError::TypeMismatch {
        field: field.name.clone(),
        expected: field.data_type,
        actual: shape_name(value),
        value: value.to_string(),
    }
}

pub(crate) fn element_error(
    field: &FieldSchema,
    expected: &'static str,
    index: usize,
    element: &Value,
    whole: &Value,
) -> RowError {
    RowError::ElementTypeMismatch {
        field: field.name.clone(),
        expected,
        index,
        actual: shape_name(element),
        value: whole.to_string(),
    }
}

fn number_error(field: &FieldSchema, target: &'static str, literal: String, err: NumberError) -> RowError {
    match err {
        NumberError::Range => RowError::OutOfRange {
            field: field.name.clone(),
            target,
            literal,
        },
        NumberError::Syntax => RowError::InvalidNumber {
            field: field.name.clone(),
            target,
            literal,
        },
    }
}

pub(crate) fn int_bits(data_type: DataType) -> u32 {
    match data_type {
        DataType::Int8 => 8,
        DataType::Int16 => 16,
        DataType::Int32 => 32,
        _ => 64,
    }
}

pub(crate) fn int_from_number(
    field: &FieldSchema,
    target: DataType,
    n: &Number,
) -> Result<i64, RowError> {
    let literal = n.to_string();
    number::parse_int(&literal, int_bits(target))
        .map_err(|e| number_error(field, target.type_name(), literal, e))
}

pub(crate) fn f32_from_number(field: &FieldSchema, n: &Number) -> Result<f32, RowError> {
    let literal = n.to_string();
    number::parse_f32(&literal).map_err(|e| number_error(field, "Float", literal, e))
}

pub(crate) fn f64_from_number(field: &FieldSchema, n: &Number) -> Result<f64, RowError> {
    let literal = n.to_string();
    number::parse_f64(&literal).map_err(|e| number_error(field, "Double", literal, e))
}

fn u8_from_number(field: &FieldSchema, n: &Number) -> Result<u8, RowError> {
    let literal = n.to_string();
    match number::parse_uint(&literal, 8) {
        Ok(v) => Ok(v as u8),
        Err(e) => Err(number_error(field, "UInt8", literal, e)),
    }
}

fn expect_number<'a>(field: &FieldSchema, value: &'a Value) -> Result<&'a Number, RowError> {
    match value {
        Value::Number(n) => Ok(n),
        other => Err(type_error(field, other)),
    }
}

/// Coerce one value according to `field`'s declared type. `dim` is the
/// collection's vector dimensionality.
pub(crate) fn coerce(field: &FieldSchema, dim: usize, value: &Value) -> Result<FieldValue, RowError> {
    match field.data_type {
        DataType::Bool => match value {
            Value::Bool(b) => Ok(FieldValue::Bool(*b)),
            other => Err(type_error(field, other)),
        },
        DataType::Int8 => {
            let n = expect_number(field, value)?;
            Ok(FieldValue::Int8(int_from_number(field, DataType::Int8, n)? as i8))
        }
        DataType::Int16 => {
            let n = expect_number(field, value)?;
            Ok(FieldValue::Int16(int_from_number(field, DataType::Int16, n)? as i16))
        }
        DataType::Int32 => {
            let n = expect_number(field, value)?;
            Ok(FieldValue::Int32(int_from_number(field, DataType::Int32, n)? as i32))
        }
        DataType::Int64 => {
            let n = expect_number(field, value)?;
            Ok(FieldValue::Int64(int_from_number(field, DataType::Int64, n)?))
        }
        DataType::Float => Ok(FieldValue::Float(f32_from_number(
            field,
            expect_number(field, value)?,
        )?)),
        DataType::Double => Ok(FieldValue::Double(f64_from_number(
            field,
            expect_number(field, value)?,
        )?)),
        DataType::BinaryVector => {
            let items = vector_items(field, value, dim, dim / 8)?;
            let bytes = vector_elements(field, "UInt8", items, value, u8_from_number)?;
            Ok(FieldValue::BinaryVector(bytes))
        }
        DataType::FloatVector => {
            let items = vector_items(field, value, dim, dim)?;
            let floats = vector_elements(field, "Float", items, value, f32_from_number)?;
            Ok(FieldValue::FloatVector(floats))
        }
        DataType::Float16Vector => {
            let items = vector_items(field, value, dim, dim * 2)?;
            let bytes = vector_elements(field, "UInt8", items, value, u8_from_number)?;
            Ok(FieldValue::Float16Vector(bytes))
        }
        DataType::String | DataType::VarChar => match value {
            Value::String(s) => Ok(FieldValue::String(s.clone())),
            other => Err(type_error(field, other)),
        },
        DataType::Json => match value {
            Value::String(text) => {
                serde_json::from_str::<IgnoredAny>(text).map_err(|e| RowError::InvalidJson {
                    field: field.name.clone(),
                    source: Box::new(e),
                })?;
                Ok(FieldValue::Json(text.as_bytes().to_vec()))
            }
            Value::Object(map) => Ok(FieldValue::Json(to_json_bytes(field, map)?)),
            other => Err(type_error(field, other)),
        },
        DataType::Array => match value {
            Value::Array(items) => Ok(FieldValue::Array(coerce_array(field, items, value)?)),
            other => Err(type_error(field, other)),
        },
        DataType::None | DataType::BFloat16Vector | DataType::SparseFloatVector => {
            Err(RowError::UnsupportedType {
                field: field.name.clone(),
                data_type: field.data_type,
            })
        }
    }
}

/// Serialize the unmatched keys of a record into the dynamic field.
pub(crate) fn coerce_dynamic(
    field: &FieldSchema,
    values: &BTreeMap<&str, &Value>,
) -> Result<FieldValue, RowError> {
    if values.is_empty() {
        return Ok(FieldValue::Json(EMPTY_OBJECT.to_vec()));
    }
    Ok(FieldValue::Json(to_json_bytes(field, values)?))
}

fn to_json_bytes<T: serde::Serialize + ?Sized>(
    field: &FieldSchema,
    value: &T,
) -> Result<Vec<u8>, RowError> {
    serde_json::to_vec(value).map_err(|e| RowError::InvalidJson {
        field: field.name.clone(),
        source: Box::new(e),
    })
}

fn vector_items<'a>(
    field: &FieldSchema,
    value: &'a Value,
    dim: usize,
    expected_len: usize,
) -> Result<&'a [Value], RowError> {
    let Value::Array(items) = value else {
        return Err(type_error(field, value));
    };
    if items.len() != expected_len {
        return Err(RowError::DimensionMismatch {
            field: field.name.clone(),
            data_type: field.data_type,
            dim,
            expected_len,
            actual_len: items.len(),
        });
    }
    Ok(items)
}

fn vector_elements<T>(
    field: &FieldSchema,
    expected: &'static str,
    items: &[Value],
    whole: &Value,
    parse: impl Fn(&FieldSchema, &Number) -> Result<T, RowError>,
) -> Result<Vec<T>, RowError> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Number(n) => parse(field, n),
            other => Err(element_error(field, expected, index, other, whole)),
        })
        .collect()
}
