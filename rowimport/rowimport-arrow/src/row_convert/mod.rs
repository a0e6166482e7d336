//! Conversion from decoded [`Row`]s to Arrow `RecordBatch`.
//!
//! Columns are matched to row entries through the [`FIELD_ID_KEY`] metadata
//! of each Arrow field, so the schema is normally the output of
//! [`collection_to_arrow_schema`](crate::collection_to_arrow_schema).

mod append;
mod builder;

use arrow::{
    array::ArrayRef,
    datatypes::{Field, SchemaRef},
    record_batch::{RecordBatch, RecordBatchOptions},
};
use rowimport_core::{FieldId, Row};

use crate::{error::ArrowConvertError, schema_convert::FIELD_ID_KEY};

/// Convert decoded rows to a RecordBatch.
///
/// Every row must hold a value for every column; values are appended in row
/// order. An empty `rows` slice yields an empty batch.
///
/// # Errors
/// Returns an error if:
/// - a column has no parseable [`FIELD_ID_KEY`] metadata.
/// - a row lacks the value of a column.
/// - a value does not fit its column's Arrow data type or width.
pub fn rows_to_record_batch(
    schema: &SchemaRef,
    rows: &[Row],
) -> Result<RecordBatch, ArrowConvertError> {
    let columns = schema
        .fields()
        .iter()
        .map(|field| build_column(field, rows))
        .collect::<Result<Vec<ArrayRef>, _>>()?;

    let options = RecordBatchOptions::new().with_row_count(Some(rows.len()));
    Ok(RecordBatch::try_new_with_options(
        schema.clone(),
        columns,
        &options,
    )?)
}

/// Field ID stored in the metadata of an Arrow field.
pub fn field_id_of(field: &Field) -> Result<FieldId, ArrowConvertError> {
    field
        .metadata()
        .get(FIELD_ID_KEY)
        .and_then(|id| id.parse().ok())
        .ok_or_else(|| ArrowConvertError::MissingFieldId {
            column: field.name().clone(),
        })
}

fn build_column(field: &Field, rows: &[Row]) -> Result<ArrayRef, ArrowConvertError> {
    let field_id = field_id_of(field)?;
    let mut builder = builder::make_builder(field.data_type(), rows.len())?;
    for (row_index, row) in rows.iter().enumerate() {
        let value = row
            .get(field_id)
            .ok_or_else(|| ArrowConvertError::MissingValue {
                column: field.name().clone(),
                row: row_index,
            })?;
        append::append_value(&mut builder, field, value)?;
    }
    Ok(builder.finish())
}
