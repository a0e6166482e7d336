use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use rowimport::{ImportError, RowReader};
use tracing::info;

use super::load_schema;

#[derive(Args)]
pub struct CheckArgs {
    /// Path to the collection schema (JSON)
    schema: PathBuf,

    /// Path to the row file (a JSON array of objects)
    input: PathBuf,
}

impl CheckArgs {
    pub fn run(self) -> Result<()> {
        let schema = load_schema(&self.schema)?;
        let reader = RowReader::builder(&schema).build()?;
        let data = fs::read(&self.input)
            .with_context(|| format!("failed to read {}", self.input.display()))?;

        match reader.for_each_row_batch(&data, |_rows| Ok(())) {
            Ok(count) => {
                info!(rows = count, "all rows decoded");
                println!("{count} rows OK");
                Ok(())
            }
            Err(ImportError::Row { index, source }) => {
                anyhow::bail!(
                    "{}: row {index} ({:?}): {source}",
                    self.input.display(),
                    source.kind()
                )
            }
            Err(e) => Err(e.into()),
        }
    }
}
