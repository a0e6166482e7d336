use std::path::PathBuf;

use arrow::array::{Array, StringArray};
use rowimport::{
    ImportError, RowReader,
    core::{CollectionSchema, DataType, FieldSchema, FieldValue, RowError},
};
use serde_json::json;

const ID: i64 = 100;
const VECTOR: i64 = 101;
const META: i64 = 199;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn test_schema() -> CollectionSchema {
    CollectionSchema::new(
        "docs",
        vec![
            FieldSchema::new(ID, "id", DataType::Int64).with_primary_key(false),
            FieldSchema::new(VECTOR, "vector", DataType::FloatVector).with_dim(2),
            FieldSchema::new(META, "$meta", DataType::Json).with_dynamic(),
        ],
    )
    .with_dynamic_field()
}

/// `count` valid rows with ids `0..count`.
fn rows_document(count: i64) -> Vec<u8> {
    let rows: Vec<_> = (0..count)
        .map(|id| json!({"id": id, "vector": [id, id], "n": id}))
        .collect();
    serde_json::to_vec(&rows).unwrap()
}

#[test]
fn for_each_row_batch_emits_batches_by_batch_size() {
    let reader = RowReader::builder(&test_schema())
        .with_batch_size(2)
        .build()
        .unwrap();

    let mut batch_rows = Vec::new();
    let count = reader
        .for_each_row_batch(&rows_document(5), |rows| {
            batch_rows.push(rows.len());
            Ok(())
        })
        .unwrap();

    assert_eq!(count, 5);
    assert_eq!(batch_rows, vec![2, 2, 1]);
}

#[test]
fn rows_keep_input_order_across_parallel_batches() {
    let reader = RowReader::builder(&test_schema())
        .with_batch_size(16)
        .build()
        .unwrap();

    let rows = reader.read_rows(&rows_document(100)).unwrap();
    let ids: Vec<i64> = rows
        .iter()
        .map(|row| match row.get(ID) {
            Some(FieldValue::Int64(id)) => *id,
            other => panic!("unexpected id {other:?}"),
        })
        .collect();
    assert_eq!(ids, (0..100).collect::<Vec<_>>());
}

#[test]
fn parallel_and_sequential_decoding_agree() {
    let data = rows_document(40);
    let parallel = RowReader::builder(&test_schema())
        .with_batch_size(7)
        .build()
        .unwrap();
    let sequential = RowReader::builder(&test_schema())
        .with_batch_size(7)
        .with_parallel(false)
        .build()
        .unwrap();

    assert_eq!(
        parallel.read_rows(&data).unwrap(),
        sequential.read_rows(&data).unwrap()
    );
}

#[test]
fn zero_batch_size_is_clamped_to_one() {
    let reader = RowReader::builder(&test_schema())
        .with_batch_size(0)
        .build()
        .unwrap();
    assert_eq!(reader.batch_size(), 1);

    let mut batches = 0;
    reader
        .for_each_row_batch(&rows_document(3), |_rows| {
            batches += 1;
            Ok(())
        })
        .unwrap();
    assert_eq!(batches, 3);
}

#[test]
fn empty_array_yields_no_batches() {
    let reader = RowReader::builder(&test_schema()).build().unwrap();
    let count = reader
        .for_each_row_batch(b"[]", |_rows| panic!("no batch expected"))
        .unwrap();
    assert_eq!(count, 0);
}

#[test]
fn first_failing_row_is_reported_with_its_index() {
    let reader = RowReader::builder(&test_schema())
        .with_batch_size(4)
        .build()
        .unwrap();
    let data = serde_json::to_vec(&json!([
        {"id": 0, "vector": [0, 0]},
        {"id": 1, "vector": [0, 0]},
        {"id": 2, "vector": [0, 0]},
        {"id": 3, "vector": [0, 0]},
        {"id": 4, "vector": [0, 0]},
        {"id": "five", "vector": [0, 0]},
        {"id": 6, "vector": [0, 0]},
        {"id": 7, "vector": [0]},
    ]))
    .unwrap();

    let mut delivered = 0;
    let err = reader
        .for_each_row_batch(&data, |rows| {
            delivered += rows.len();
            Ok(())
        })
        .unwrap_err();

    assert!(matches!(
        err,
        ImportError::Row {
            index: 5,
            source: RowError::TypeMismatch { .. }
        }
    ));
    assert_eq!(delivered, 4);
}

#[test]
fn for_each_row_batch_propagates_callback_error() {
    let reader = RowReader::builder(&test_schema())
        .with_batch_size(1)
        .build()
        .unwrap();

    let err = reader
        .for_each_row_batch(&rows_document(3), |_rows| Err("callback failed".into()))
        .unwrap_err();

    assert!(matches!(err, ImportError::Callback(_)));
    assert_eq!(err.to_string(), "callback failed");
}

#[test]
fn non_array_document_is_rejected() {
    let reader = RowReader::builder(&test_schema()).build().unwrap();
    let documents: [&[u8]; 4] = [b"{\"id\": 1}", b"", b"[{\"id\": 1,", b"[] []"];
    for data in documents {
        let err = reader.read_rows(data).unwrap_err();
        assert!(matches!(err, ImportError::Json(_)), "{err}");
    }
}

#[test]
fn non_object_element_is_a_row_error() {
    let reader = RowReader::builder(&test_schema()).build().unwrap();
    let err = reader.read_rows(b"[1]").unwrap_err();
    assert!(matches!(
        err,
        ImportError::Row {
            index: 0,
            source: RowError::NotAnObject { actual: "number" }
        }
    ));
}

#[test]
fn invalid_schema_fails_to_build() {
    let schema = CollectionSchema::new(
        "novector",
        vec![FieldSchema::new(ID, "id", DataType::Int64).with_primary_key(false)],
    );
    let err = RowReader::builder(&schema).build().unwrap_err();
    assert!(matches!(err, ImportError::Schema(_)));
}

#[test]
fn for_each_record_batch_converts_rows_to_arrow() {
    let reader = RowReader::builder(&test_schema())
        .with_batch_size(2)
        .build()
        .unwrap();
    let data = serde_json::to_vec(&json!([
        {"id": 1, "vector": [1, 2], "b": 2, "a": 1},
        {"id": 2, "vector": [3, 4]},
    ]))
    .unwrap();

    let mut batches = Vec::new();
    reader
        .for_each_record_batch(&data, |batch| {
            batches.push(batch);
            Ok(())
        })
        .unwrap();

    assert_eq!(batches.len(), 1);
    let batch = &batches[0];
    assert_eq!(batch.schema(), *reader.arrow_schema());
    assert_eq!(batch.num_rows(), 2);
    let meta = batch
        .column(2)
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap();
    assert_eq!(meta.value(0), r#"{"a":1,"b":2}"#);
    assert_eq!(meta.value(1), "{}");
}

#[test]
fn for_each_record_batch_in_file_reads_fixture() {
    let schema: CollectionSchema =
        serde_json::from_slice(&std::fs::read(fixture_path("schema.json")).unwrap()).unwrap();
    let reader = RowReader::builder(&schema)
        .with_batch_size(2)
        .build()
        .unwrap();

    let mut batch_rows = Vec::new();
    let count = reader
        .for_each_record_batch_in_file(&fixture_path("rows.json"), |batch| {
            assert_eq!(batch.num_columns(), 4);
            batch_rows.push(batch.num_rows());
            Ok(())
        })
        .unwrap();

    assert_eq!(count, 3);
    assert_eq!(batch_rows, vec![2, 1]);
}

#[test]
fn missing_file_is_an_io_error() {
    let reader = RowReader::builder(&test_schema()).build().unwrap();
    let err = reader
        .for_each_record_batch_in_file(&fixture_path("missing.json"), |_batch| Ok(()))
        .unwrap_err();
    assert!(matches!(err, ImportError::Io(_)));
}
