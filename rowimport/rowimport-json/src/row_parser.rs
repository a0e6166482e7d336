//! Per-record decoding against a [`SchemaIndex`].

use std::{collections::BTreeMap, sync::Arc};

use rowimport_core::{CollectionSchema, FieldSchema, Row, RowError, SchemaError};
use serde_json::{Map, Value};

use crate::{
    coerce::{coerce, coerce_dynamic, shape_name},
    schema_index::SchemaIndex,
};

/// Decodes untyped JSON records into [`Row`]s.
///
/// The parser holds no per-call state; cloning it only bumps the reference
/// count of the shared index.
#[derive(Debug, Clone)]
pub struct RowParser {
    index: Arc<SchemaIndex>,
}

/// Input keys split by destination.
struct Partition<'s, 'r> {
    matched: Vec<(&'s FieldSchema, &'r Value)>,
    dynamic_values: BTreeMap<&'r str, &'r Value>,
}

impl RowParser {
    pub fn new(schema: &CollectionSchema) -> Result<Self, SchemaError> {
        Ok(Self::from_index(Arc::new(SchemaIndex::new(schema)?)))
    }

    pub fn from_index(index: Arc<SchemaIndex>) -> Self {
        Self { index }
    }

    pub fn index(&self) -> &SchemaIndex {
        &self.index
    }

    /// Decode one record.
    ///
    /// The record must be a JSON object supplying every explicit field; with a
    /// dynamic field declared, keys matching no field are collected into it
    /// as a JSON object.
    pub fn parse(&self, raw: &Value) -> Result<Row, RowError> {
        let Value::Object(record) = raw else {
            return Err(RowError::NotAnObject {
                actual: shape_name(raw),
            });
        };

        let primary_key = self.index.primary_key();
        if primary_key.auto_id && record.contains_key(&primary_key.name) {
            return Err(RowError::AutoIdProvided {
                field: primary_key.name.clone(),
            });
        }

        let Partition {
            matched,
            dynamic_values,
        } = self.partition(record)?;

        let mut row = Row::new();
        for (field, value) in matched {
            row.insert(field.field_id, coerce(field, self.index.dim(), value)?);
        }

        if let Some(missing) = self
            .index
            .explicit_fields()
            .find(|f| !row.contains(f.field_id))
        {
            return Err(RowError::MissingField {
                field: missing.name.clone(),
            });
        }

        if let Some(dynamic_field) = self.index.dynamic_field() {
            row.insert(
                dynamic_field.field_id,
                coerce_dynamic(dynamic_field, &dynamic_values)?,
            );
        }
        Ok(row)
    }

    fn partition<'r>(&self, record: &'r Map<String, Value>) -> Result<Partition<'_, 'r>, RowError> {
        let mut matched = Vec::with_capacity(self.index.num_explicit_fields());
        let mut dynamic_values = BTreeMap::new();

        for (key, value) in record {
            if let Some(field) = self.index.explicit_field(key) {
                matched.push((field, value));
                continue;
            }
            match self.index.dynamic_field() {
                Some(dynamic_field) if dynamic_field.name == *key => {
                    return Err(RowError::DynamicFieldProvided { field: key.clone() });
                }
                Some(_) => {
                    dynamic_values.insert(key.as_str(), value);
                }
                None => return Err(RowError::UndefinedField { field: key.clone() }),
            }
        }

        Ok(Partition {
            matched,
            dynamic_values,
        })
    }
}
