//! Element coercion for `Array` fields.

use rowimport_core::{DataType, FieldSchema, RowError, ScalarArray};
use serde_json::{Number, Value};

use crate::coerce::{element_error, f32_from_number, f64_from_number, int_from_number};

/// Coerce every element of `items` to the field's declared element type.
///
/// `Int8`/`Int16`/`Int32` elements are range-checked against their declared
/// width but stored uniformly as `i32`. The first non-conforming element
/// aborts the whole array.
pub(crate) fn coerce_array(
    field: &FieldSchema,
    items: &[Value],
    whole: &Value,
) -> Result<ScalarArray, RowError> {
    let element_type = field.element_type.unwrap_or_default();
    let expected = element_type.type_name();

    match element_type {
        DataType::Bool => collect(items, |index, item| match item {
            Value::Bool(b) => Ok(*b),
            other => Err(element_error(field, expected, index, other, whole)),
        })
        .map(ScalarArray::Bool),
        DataType::Int8 | DataType::Int16 | DataType::Int32 => {
            collect_numbers(field, expected, items, whole, |n| {
                int_from_number(field, element_type, n).map(|v| v as i32)
            })
            .map(ScalarArray::Int)
        }
        DataType::Int64 => collect_numbers(field, expected, items, whole, |n| {
            int_from_number(field, DataType::Int64, n)
        })
        .map(ScalarArray::Long),
        DataType::Float => collect_numbers(field, expected, items, whole, |n| {
            f32_from_number(field, n)
        })
        .map(ScalarArray::Float),
        DataType::Double => collect_numbers(field, expected, items, whole, |n| {
            f64_from_number(field, n)
        })
        .map(ScalarArray::Double),
        DataType::String | DataType::VarChar => collect(items, |index, item| match item {
            Value::String(s) => Ok(s.clone()),
            other => Err(element_error(field, expected, index, other, whole)),
        })
        .map(ScalarArray::String),
        DataType::None
        | DataType::Array
        | DataType::Json
        | DataType::BinaryVector
        | DataType::FloatVector
        | DataType::Float16Vector
        | DataType::BFloat16Vector
        | DataType::SparseFloatVector => Err(RowError::UnsupportedElementType {
            field: field.name.clone(),
            element_type,
        }),
    }
}

fn collect<T>(
    items: &[Value],
    convert: impl Fn(usize, &Value) -> Result<T, RowError>,
) -> Result<Vec<T>, RowError> {
    items
        .iter()
        .enumerate()
        .map(|(index, item)| convert(index, item))
        .collect()
}

fn collect_numbers<T>(
    field: &FieldSchema,
    expected: &'static str,
    items: &[Value],
    whole: &Value,
    convert: impl Fn(&Number) -> Result<T, RowError>,
) -> Result<Vec<T>, RowError> {
    collect(items, |index, item| match item {
        Value::Number(n) => convert(n),
        other => Err(element_error(field, expected, index, other, whole)),
    })
}
