use std::{fmt::Write as _, fs, path::PathBuf};

use anyhow::Result;
use clap::Args;
use rowimport::arrow::{FIELD_ID_KEY, collection_to_arrow_schema};

use super::load_schema;

#[derive(Args)]
pub struct SchemaArgs {
    /// Path to the collection schema (JSON)
    schema: PathBuf,

    /// Output file path (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl SchemaArgs {
    pub fn run(self) -> Result<()> {
        let schema = load_schema(&self.schema)?;
        let arrow_schema = collection_to_arrow_schema(&schema)?;

        let mut text = schema.to_string();
        writeln!(text, "arrow:")?;
        for field in arrow_schema.fields() {
            let field_id = field
                .metadata()
                .get(FIELD_ID_KEY)
                .map(String::as_str)
                .unwrap_or("?");
            writeln!(
                text,
                "    {}: {} (field_id: {field_id})",
                field.name(),
                field.data_type()
            )?;
        }

        match self.output {
            Some(path) => fs::write(path, text)?,
            None => print!("{text}"),
        }
        Ok(())
    }
}
