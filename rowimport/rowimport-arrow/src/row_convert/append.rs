use arrow::{
    array::{
        ArrayBuilder, BooleanBuilder, FixedSizeBinaryBuilder, FixedSizeListBuilder,
        Float32Builder, Float64Builder, Int8Builder, Int16Builder, Int32Builder, Int64Builder,
        ListBuilder, StringBuilder,
    },
    datatypes::{DataType, Field},
};
use rowimport_core::{FieldValue, ScalarArray};

use crate::error::ArrowConvertError;

macro_rules! cast_builder {
    ($b:expr, $T:ty) => {
        $b.as_any_mut()
            .downcast_mut::<$T>()
            .ok_or(ArrowConvertError::BuilderMismatch {
                builder: stringify!($T),
            })?
    };
}

/// Append one decoded value to the builder of `column`.
pub(super) fn append_value(
    builder: &mut Box<dyn ArrayBuilder>,
    column: &Field,
    value: &FieldValue,
) -> Result<(), ArrowConvertError> {
    match (column.data_type(), value) {
        (DataType::Boolean, FieldValue::Bool(v)) => {
            cast_builder!(builder, BooleanBuilder).append_value(*v)
        }
        (DataType::Int8, FieldValue::Int8(v)) => {
            cast_builder!(builder, Int8Builder).append_value(*v)
        }
        (DataType::Int16, FieldValue::Int16(v)) => {
            cast_builder!(builder, Int16Builder).append_value(*v)
        }
        (DataType::Int32, FieldValue::Int32(v)) => {
            cast_builder!(builder, Int32Builder).append_value(*v)
        }
        (DataType::Int64, FieldValue::Int64(v)) => {
            cast_builder!(builder, Int64Builder).append_value(*v)
        }
        (DataType::Float32, FieldValue::Float(v)) => {
            cast_builder!(builder, Float32Builder).append_value(*v)
        }
        (DataType::Float64, FieldValue::Double(v)) => {
            cast_builder!(builder, Float64Builder).append_value(*v)
        }
        (DataType::Utf8, FieldValue::String(v)) => {
            cast_builder!(builder, StringBuilder).append_value(v)
        }
        (DataType::Utf8, FieldValue::Json(bytes)) => {
            let text =
                std::str::from_utf8(bytes).map_err(|source| ArrowConvertError::InvalidUtf8 {
                    column: column.name().clone(),
                    source,
                })?;
            cast_builder!(builder, StringBuilder).append_value(text)
        }
        (
            DataType::FixedSizeBinary(width),
            FieldValue::BinaryVector(bytes) | FieldValue::Float16Vector(bytes),
        ) => {
            check_len(column, *width, bytes.len())?;
            cast_builder!(builder, FixedSizeBinaryBuilder).append_value(bytes)?
        }
        (DataType::FixedSizeList(_, size), FieldValue::FloatVector(values)) => {
            check_len(column, *size, values.len())?;
            let list = cast_builder!(builder, FixedSizeListBuilder<Box<dyn ArrayBuilder>>);
            cast_builder!(list.values(), Float32Builder).append_slice(values);
            list.append(true);
        }
        (DataType::List(_), FieldValue::Array(array)) => {
            let list = cast_builder!(builder, ListBuilder<Box<dyn ArrayBuilder>>);
            append_elements(list.values(), array)?;
            list.append(true);
        }
        (dt, value) => {
            return Err(ArrowConvertError::ValueType {
                column: column.name().clone(),
                expected: dt.to_string(),
                actual: value.type_name(),
            });
        }
    }
    Ok(())
}

fn append_elements(
    child_builder: &mut Box<dyn ArrayBuilder>,
    array: &ScalarArray,
) -> Result<(), ArrowConvertError> {
    match array {
        ScalarArray::Bool(v) => cast_builder!(child_builder, BooleanBuilder).append_slice(v),
        ScalarArray::Int(v) => cast_builder!(child_builder, Int32Builder).append_slice(v),
        ScalarArray::Long(v) => cast_builder!(child_builder, Int64Builder).append_slice(v),
        ScalarArray::Float(v) => cast_builder!(child_builder, Float32Builder).append_slice(v),
        ScalarArray::Double(v) => cast_builder!(child_builder, Float64Builder).append_slice(v),
        ScalarArray::String(v) => {
            let strings = cast_builder!(child_builder, StringBuilder);
            for s in v {
                strings.append_value(s);
            }
        }
    }
    Ok(())
}

fn check_len(column: &Field, expected: i32, actual: usize) -> Result<(), ArrowConvertError> {
    let expected = usize::try_from(expected).unwrap_or(0);
    if expected != actual {
        return Err(ArrowConvertError::LengthMismatch {
            column: column.name().clone(),
            expected,
            actual,
        });
    }
    Ok(())
}
