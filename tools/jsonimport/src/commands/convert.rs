use std::{path::PathBuf, time::Duration};

use anyhow::Result;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use rowimport::RowReader;
use tracing::info;

use super::load_schema;
use crate::{
    format::OutputFormat,
    writer::{JsonlWriter, ParquetWriter, RecordBatchWriter},
};

#[derive(Args)]
pub struct ConvertArgs {
    /// Path to the collection schema (JSON)
    schema: PathBuf,

    /// Path to the row file (a JSON array of objects)
    input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Jsonl)]
    format: OutputFormat,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Number of rows decoded per batch
    #[arg(long, default_value_t = 1024)]
    batch_size: usize,
}

impl ConvertArgs {
    pub fn run(self) -> Result<()> {
        let schema = load_schema(&self.schema)?;
        let reader = RowReader::builder(&schema)
            .with_batch_size(self.batch_size)
            .build()?;

        let mut writer: Box<dyn RecordBatchWriter> = match self.format {
            OutputFormat::Jsonl => Box::new(JsonlWriter::new(self.output.as_deref())?),
            OutputFormat::Parquet => {
                let path = self
                    .output
                    .as_deref()
                    .ok_or_else(|| anyhow::anyhow!("Parquet output requires -o <file>"))?;
                Box::new(ParquetWriter::new(path, reader.arrow_schema().clone())?)
            }
        };

        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] {pos} rows ({per_sec}) {msg}",
        )?);
        pb.enable_steady_tick(Duration::from_millis(100));

        let result = reader.for_each_record_batch_in_file(&self.input, |batch| {
            let n = batch.num_rows() as u64;
            writer.write_batch(batch)?;
            pb.inc(n);
            Ok(())
        });
        let count = match result {
            Ok(count) => count,
            Err(e) => {
                pb.abandon_with_message("failed");
                return Err(e.into());
            }
        };

        writer.finish()?;
        pb.finish_with_message("done");
        info!(rows = count, input = %self.input.display(), "conversion finished");
        Ok(())
    }
}
