//! Collection schema descriptors.

mod format;
mod types;

pub use format::format_collection_schema;
pub use types::{CollectionSchema, DIM_KEY, DataType, FieldId, FieldSchema};
