pub mod check;
pub mod convert;
pub mod schema;

use std::{fs, path::Path};

use anyhow::{Context, Result};
use rowimport::core::CollectionSchema;

/// Load a collection schema from a JSON file.
pub fn load_schema(path: &Path) -> Result<CollectionSchema> {
    let data =
        fs::read(path).with_context(|| format!("failed to read schema {}", path.display()))?;
    serde_json::from_slice(&data)
        .with_context(|| format!("failed to parse schema {}", path.display()))
}
