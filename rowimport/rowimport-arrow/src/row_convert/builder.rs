use arrow::{
    array::{
        ArrayBuilder, BooleanBuilder, FixedSizeBinaryBuilder, FixedSizeListBuilder,
        Float32Builder, Float64Builder, Int8Builder, Int16Builder, Int32Builder, Int64Builder,
        ListBuilder, StringBuilder,
    },
    datatypes::DataType,
};

use crate::error::ArrowConvertError;

/// Average element count reserved per `List` value.
const LIST_CAPACITY_HINT: usize = 4;

pub(super) fn make_builder(
    dt: &DataType,
    capacity: usize,
) -> Result<Box<dyn ArrayBuilder>, ArrowConvertError> {
    Ok(match dt {
        DataType::Boolean => Box::new(BooleanBuilder::with_capacity(capacity)),
        DataType::Int8 => Box::new(Int8Builder::with_capacity(capacity)),
        DataType::Int16 => Box::new(Int16Builder::with_capacity(capacity)),
        DataType::Int32 => Box::new(Int32Builder::with_capacity(capacity)),
        DataType::Int64 => Box::new(Int64Builder::with_capacity(capacity)),
        DataType::Float32 => Box::new(Float32Builder::with_capacity(capacity)),
        DataType::Float64 => Box::new(Float64Builder::with_capacity(capacity)),
        DataType::Utf8 => Box::new(StringBuilder::with_capacity(capacity, 64)),
        DataType::FixedSizeBinary(width) => {
            Box::new(FixedSizeBinaryBuilder::with_capacity(capacity, *width))
        }
        DataType::FixedSizeList(field, size) => {
            let child_capacity = capacity.saturating_mul(usize::try_from(*size).unwrap_or(0));
            let child = make_builder(field.data_type(), child_capacity)?;
            Box::new(
                FixedSizeListBuilder::with_capacity(child, *size, capacity)
                    .with_field(field.clone()),
            )
        }
        DataType::List(field) => {
            let child = make_builder(
                field.data_type(),
                capacity.saturating_mul(LIST_CAPACITY_HINT),
            )?;
            Box::new(ListBuilder::with_capacity(child, capacity).with_field(field.clone()))
        }
        other => return Err(ArrowConvertError::UnsupportedArrowType(other.to_string())),
    })
}
