use std::{collections::HashMap, sync::Arc};

use arrow::{
    array::{
        Array, BooleanArray, FixedSizeBinaryArray, FixedSizeListArray, Float32Array, Int8Array,
        Int32Array, Int64Array, ListArray, StringArray,
    },
    datatypes::{DataType as ArrowType, Field, Schema, SchemaRef},
};
use rowimport_arrow::{
    ArrowConvertError, FIELD_ID_KEY, collection_to_arrow_schema, field_id_of,
    rows_to_record_batch,
};
use rowimport_core::{CollectionSchema, DataType, FieldSchema, FieldValue, Row, ScalarArray};

const ID: i64 = 100;
const VECTOR: i64 = 101;
const FLAG: i64 = 102;
const TINY: i64 = 103;
const TAGS: i64 = 104;
const META: i64 = 199;

fn test_schema() -> SchemaRef {
    let schema = CollectionSchema::new(
        "docs",
        vec![
            FieldSchema::new(ID, "id", DataType::Int64).with_primary_key(false),
            FieldSchema::new(VECTOR, "vector", DataType::FloatVector).with_dim(2),
            FieldSchema::new(FLAG, "flag", DataType::Bool),
            FieldSchema::new(TINY, "tiny", DataType::Int8),
            FieldSchema::new(TAGS, "tags", DataType::Array).with_element_type(DataType::Int16),
            FieldSchema::new(META, "$meta", DataType::Json).with_dynamic(),
        ],
    )
    .with_dynamic_field();
    Arc::new(collection_to_arrow_schema(&schema).unwrap())
}

fn make_row(id: i64, vector: [f32; 2], tags: Vec<i32>, meta: &str) -> Row {
    [
        (ID, FieldValue::Int64(id)),
        (VECTOR, FieldValue::FloatVector(vector.to_vec())),
        (FLAG, FieldValue::Bool(id % 2 == 0)),
        (TINY, FieldValue::Int8(id as i8)),
        (TAGS, FieldValue::Array(ScalarArray::Int(tags))),
        (META, FieldValue::Json(meta.as_bytes().to_vec())),
    ]
    .into_iter()
    .collect()
}

#[test]
fn rows_to_record_batch_builds_columns_in_schema_order() {
    let schema = test_schema();
    let rows = vec![
        make_row(1, [0.5, 1.5], vec![1, 2, 3], r#"{"a":1}"#),
        make_row(2, [2.5, 3.5], vec![], "{}"),
    ];

    let batch = rows_to_record_batch(&schema, &rows).unwrap();
    assert_eq!(batch.num_rows(), 2);
    assert_eq!(batch.num_columns(), 6);

    let ids = batch.column(0).as_any().downcast_ref::<Int64Array>().unwrap();
    assert_eq!(ids.values().to_vec(), vec![1, 2]);

    let vectors = batch
        .column(1)
        .as_any()
        .downcast_ref::<FixedSizeListArray>()
        .unwrap();
    assert_eq!(vectors.value_length(), 2);
    let second = vectors.value(1);
    let second = second.as_any().downcast_ref::<Float32Array>().unwrap();
    assert_eq!(second.values().to_vec(), vec![2.5, 3.5]);

    let flags = batch.column(2).as_any().downcast_ref::<BooleanArray>().unwrap();
    assert!(!flags.value(0));
    assert!(flags.value(1));

    let tiny = batch.column(3).as_any().downcast_ref::<Int8Array>().unwrap();
    assert_eq!(tiny.values().to_vec(), vec![1, 2]);

    let tags = batch.column(4).as_any().downcast_ref::<ListArray>().unwrap();
    assert_eq!(tags.value_length(0), 3);
    assert_eq!(tags.value_length(1), 0);
    let first = tags.value(0);
    let first = first.as_any().downcast_ref::<Int32Array>().unwrap();
    assert_eq!(first.values().to_vec(), vec![1, 2, 3]);

    let meta = batch.column(5).as_any().downcast_ref::<StringArray>().unwrap();
    assert_eq!(meta.value(0), r#"{"a":1}"#);
    assert_eq!(meta.value(1), "{}");
    assert_eq!(meta.null_count(), 0);
}

#[test]
fn rows_to_record_batch_accepts_no_rows() {
    let batch = rows_to_record_batch(&test_schema(), &[]).unwrap();
    assert_eq!(batch.num_rows(), 0);
    assert_eq!(batch.num_columns(), 6);
}

#[test]
fn byte_vectors_are_written_as_fixed_size_binary() {
    let schema = CollectionSchema::new(
        "bits",
        vec![
            FieldSchema::new(ID, "id", DataType::Int64).with_primary_key(true),
            FieldSchema::new(VECTOR, "vector", DataType::BinaryVector).with_dim(16),
        ],
    );
    let schema = Arc::new(collection_to_arrow_schema(&schema).unwrap());
    let row: Row = [(VECTOR, FieldValue::BinaryVector(vec![0xff, 0x01]))]
        .into_iter()
        .collect();

    let batch = rows_to_record_batch(&schema, &[row]).unwrap();
    let vectors = batch
        .column(0)
        .as_any()
        .downcast_ref::<FixedSizeBinaryArray>()
        .unwrap();
    assert_eq!(vectors.value(0), &[0xff, 0x01]);
}

#[test]
fn missing_value_reports_row_and_column() {
    let schema = test_schema();
    let mut incomplete = make_row(2, [0.0, 0.0], vec![], "{}").into_inner();
    incomplete.remove(&FLAG);
    let rows = vec![
        make_row(1, [0.0, 0.0], vec![], "{}"),
        incomplete.into_iter().collect(),
    ];

    let err = rows_to_record_batch(&schema, &rows).unwrap_err();
    assert!(matches!(
        err,
        ArrowConvertError::MissingValue { ref column, row: 1 } if column == "flag"
    ));
}

#[test]
fn value_of_wrong_type_is_rejected() {
    let schema = test_schema();
    let mut row = make_row(1, [0.0, 0.0], vec![], "{}");
    row.insert(ID, FieldValue::String("one".to_string()));

    let err = rows_to_record_batch(&schema, &[row]).unwrap_err();
    assert!(matches!(
        err,
        ArrowConvertError::ValueType { ref column, actual: "String", .. } if column == "id"
    ));
}

#[test]
fn vector_of_wrong_length_is_rejected() {
    let schema = test_schema();
    let mut row = make_row(1, [0.0, 0.0], vec![], "{}");
    row.insert(VECTOR, FieldValue::FloatVector(vec![1.0, 2.0, 3.0]));

    let err = rows_to_record_batch(&schema, &[row]).unwrap_err();
    assert!(matches!(
        err,
        ArrowConvertError::LengthMismatch {
            expected: 2,
            actual: 3,
            ..
        }
    ));
}

#[test]
fn column_without_field_id_is_rejected() {
    let schema = Arc::new(Schema::new(vec![Field::new("x", ArrowType::Int64, false)]));
    let err = rows_to_record_batch(&schema, &[Row::new()]).unwrap_err();
    assert!(matches!(err, ArrowConvertError::MissingFieldId { ref column } if column == "x"));
}

#[test]
fn field_id_of_parses_metadata() {
    let field = Field::new("x", ArrowType::Int64, false).with_metadata(HashMap::from([(
        FIELD_ID_KEY.to_string(),
        "42".to_string(),
    )]));
    assert_eq!(field_id_of(&field).unwrap(), 42);

    let bad = Field::new("y", ArrowType::Int64, false).with_metadata(HashMap::from([(
        FIELD_ID_KEY.to_string(),
        "forty-two".to_string(),
    )]));
    assert!(field_id_of(&bad).is_err());
}
