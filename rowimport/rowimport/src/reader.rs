//! Batched reader over JSON row documents.

use std::{fmt, fs, path::Path};

use arrow::{datatypes::SchemaRef, record_batch::RecordBatch};
use memmap2::Mmap;
use rayon::prelude::*;
use rowimport_arrow::{collection_to_arrow_schema, rows_to_record_batch};
use rowimport_core::{CollectionSchema, Row};
use rowimport_json::RowParser;
use serde::de::{self, Deserializer as _, SeqAccess, Visitor};
use serde_json::Value;
use tracing::debug;

use crate::error::ImportError;

const DEFAULT_BATCH_SIZE: usize = 1024;

type CallbackError = Box<dyn std::error::Error + Send + Sync>;

/// Decodes JSON row documents against a collection schema.
///
/// The input document is a top-level JSON array of row objects. Records are
/// read incrementally and decoded in batches of `batch_size`.
#[derive(Debug, Clone)]
pub struct RowReader {
    parser: RowParser,
    arrow_schema: SchemaRef,
    batch_size: usize,
    parallel: bool,
}

/// Builder for configuring [`RowReader`].
#[derive(Debug, Clone)]
pub struct RowReaderBuilder {
    schema: CollectionSchema,
    batch_size: usize,
    parallel: bool,
}

impl RowReader {
    /// Create a builder for a reader of `schema`.
    pub fn builder(schema: &CollectionSchema) -> RowReaderBuilder {
        RowReaderBuilder {
            schema: schema.clone(),
            batch_size: DEFAULT_BATCH_SIZE,
            parallel: true,
        }
    }

    /// Arrow schema of the batches produced by
    /// [`for_each_record_batch`](Self::for_each_record_batch).
    pub fn arrow_schema(&self) -> &SchemaRef {
        &self.arrow_schema
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Decode `data` and emit decoded rows to `callback`, one batch at a time.
    ///
    /// Returns the total number of rows decoded. The first failing record
    /// aborts the read with [`ImportError::Row`]; batches already handed to
    /// `callback` stay delivered.
    pub fn for_each_row_batch(
        &self,
        data: &[u8],
        mut callback: impl FnMut(Vec<Row>) -> Result<(), CallbackError>,
    ) -> Result<usize, ImportError> {
        self.for_each_batch(data, |rows| callback(rows).map_err(ImportError::Callback))
    }

    /// Decode `data` and emit Arrow RecordBatches to `callback`.
    pub fn for_each_record_batch(
        &self,
        data: &[u8],
        mut callback: impl FnMut(RecordBatch) -> Result<(), CallbackError>,
    ) -> Result<usize, ImportError> {
        self.for_each_batch(data, |rows| {
            let batch = rows_to_record_batch(&self.arrow_schema, &rows)?;
            callback(batch).map_err(ImportError::Callback)
        })
    }

    /// Memory-map the file at `path` and decode it like
    /// [`for_each_record_batch`](Self::for_each_record_batch).
    pub fn for_each_record_batch_in_file(
        &self,
        path: &Path,
        callback: impl FnMut(RecordBatch) -> Result<(), CallbackError>,
    ) -> Result<usize, ImportError> {
        let mmap = mmap_file(path)?;
        self.for_each_record_batch(&mmap, callback)
    }

    /// Decode every record of `data` into memory.
    pub fn read_rows(&self, data: &[u8]) -> Result<Vec<Row>, ImportError> {
        let mut all_rows = Vec::new();
        self.for_each_batch(data, |rows| {
            all_rows.extend(rows);
            Ok(())
        })?;
        Ok(all_rows)
    }

    fn for_each_batch<F>(&self, data: &[u8], sink: F) -> Result<usize, ImportError>
    where
        F: FnMut(Vec<Row>) -> Result<(), ImportError>,
    {
        let mut failure = None;
        let visitor = BatchVisitor {
            reader: self,
            sink,
            failure: &mut failure,
        };

        let mut deserializer = serde_json::Deserializer::from_slice(data);
        let count = match (&mut deserializer).deserialize_seq(visitor) {
            Ok(count) => count,
            Err(e) => return Err(failure.take().unwrap_or(ImportError::Json(e))),
        };
        deserializer.end()?;
        Ok(count)
    }

    /// Decode one batch of raw records; `offset` is the input index of the
    /// first record. Reports the lowest failing index.
    fn decode_batch(&self, offset: usize, records: &[Value]) -> Result<Vec<Row>, ImportError> {
        let decode = |(i, record): (usize, &Value)| {
            self.parser
                .parse(record)
                .map_err(|source| ImportError::Row {
                    index: offset + i,
                    source,
                })
        };

        if self.parallel {
            let results: Vec<Result<Row, ImportError>> =
                records.par_iter().enumerate().map(decode).collect();
            results.into_iter().collect()
        } else {
            records.iter().enumerate().map(decode).collect()
        }
    }
}

impl RowReaderBuilder {
    /// Set the number of rows per batch (default: 1024). Zero is treated as 1.
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size.max(1);
        self
    }

    /// Decode the records of a batch on the rayon thread pool (default: true).
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Build the reader, validating the schema.
    pub fn build(self) -> Result<RowReader, ImportError> {
        let parser = RowParser::new(&self.schema)?;
        let arrow_schema = collection_to_arrow_schema(&self.schema)?;
        debug!(
            collection = %self.schema.name,
            fields = self.schema.fields().len(),
            dim = parser.index().dim(),
            batch_size = self.batch_size,
            parallel = self.parallel,
            "row reader ready"
        );
        Ok(RowReader {
            parser,
            arrow_schema: arrow_schema.into(),
            batch_size: self.batch_size,
            parallel: self.parallel,
        })
    }
}

fn mmap_file(path: &Path) -> Result<Mmap, ImportError> {
    let file = fs::File::open(path)?;
    Ok(unsafe { Mmap::map(&file) }?)
}

/// Walks the top-level array, flushing a decoded batch to `sink` every
/// `batch_size` records.
///
/// Decode and sink errors cannot travel through serde's error type intact,
/// so they are parked in `failure` and the walk is aborted with a
/// placeholder error.
struct BatchVisitor<'a, F> {
    reader: &'a RowReader,
    sink: F,
    failure: &'a mut Option<ImportError>,
}

impl<F> BatchVisitor<'_, F>
where
    F: FnMut(Vec<Row>) -> Result<(), ImportError>,
{
    fn flush(&mut self, offset: usize, records: &mut Vec<Value>) -> Result<(), ImportError> {
        if records.is_empty() {
            return Ok(());
        }
        let rows = self.reader.decode_batch(offset, records)?;
        debug!(offset, rows = rows.len(), "decoded row batch");
        records.clear();
        (self.sink)(rows)
    }

    fn abort<E: de::Error>(&mut self, err: ImportError) -> E {
        *self.failure = Some(err);
        E::custom("row import aborted")
    }
}

impl<'de, F> Visitor<'de> for BatchVisitor<'_, F>
where
    F: FnMut(Vec<Row>) -> Result<(), ImportError>,
{
    type Value = usize;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a JSON array of row objects")
    }

    fn visit_seq<A>(mut self, mut seq: A) -> Result<usize, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let batch_size = self.reader.batch_size;
        let mut records = Vec::with_capacity(batch_size);
        let mut offset = 0;

        while let Some(record) = seq.next_element::<Value>()? {
            records.push(record);
            if records.len() >= batch_size {
                if let Err(e) = self.flush(offset, &mut records) {
                    return Err(self.abort(e));
                }
                offset += batch_size;
            }
        }

        let remaining = records.len();
        if let Err(e) = self.flush(offset, &mut records) {
            return Err(self.abort(e));
        }
        Ok(offset + remaining)
    }
}
