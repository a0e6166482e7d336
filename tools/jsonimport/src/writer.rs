use std::{
    fs,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Result;
use arrow::{datatypes::SchemaRef, record_batch::RecordBatch};
use parquet::{arrow::ArrowWriter, file::properties::WriterProperties};

pub trait RecordBatchWriter {
    fn write_batch(&mut self, batch: RecordBatch) -> Result<()>;
    fn finish(self: Box<Self>) -> Result<()>;
}

// --- JSON Lines ---

pub struct JsonlWriter {
    dest: Box<dyn Write>,
    flush_each_batch: bool,
}

impl JsonlWriter {
    pub fn new(output: Option<&Path>) -> Result<Self> {
        let flush_each_batch = output.is_none();
        let dest: Box<dyn Write> = match output {
            Some(path) => Box::new(BufWriter::new(fs::File::create(path)?)),
            None => Box::new(BufWriter::new(io::stdout().lock())),
        };
        Ok(Self {
            dest,
            flush_each_batch,
        })
    }
}

impl RecordBatchWriter for JsonlWriter {
    fn write_batch(&mut self, batch: RecordBatch) -> Result<()> {
        let mut json_writer = arrow::json::LineDelimitedWriter::new(&mut self.dest);
        json_writer.write(&batch)?;
        json_writer.finish()?;
        drop(json_writer);
        if self.flush_each_batch {
            self.dest.flush()?;
        }
        Ok(())
    }

    fn finish(mut self: Box<Self>) -> Result<()> {
        self.dest.flush()?;
        Ok(())
    }
}

// --- Parquet ---

/// Writes one Parquet file; the Arrow field IDs become Parquet field IDs.
pub struct ParquetWriter {
    output_path: PathBuf,
    inner: ArrowWriter<fs::File>,
}

impl ParquetWriter {
    pub fn new(output: &Path, schema: SchemaRef) -> Result<Self> {
        let file = fs::File::create(output)?;
        let props = WriterProperties::builder().build();
        Ok(Self {
            output_path: output.to_path_buf(),
            inner: ArrowWriter::try_new(file, schema, Some(props))?,
        })
    }
}

impl RecordBatchWriter for ParquetWriter {
    fn write_batch(&mut self, batch: RecordBatch) -> Result<()> {
        self.inner.write(&batch)?;
        Ok(())
    }

    fn finish(self: Box<Self>) -> Result<()> {
        let output_path = self.output_path;
        self.inner.close()?;
        tracing::info!(path = %output_path.display(), "parquet file written");
        Ok(())
    }
}
