//! Lookup tables derived once from a collection schema.

use std::collections::HashMap;

use rowimport_core::{CollectionSchema, DataType, FieldId, FieldSchema, SchemaError};

/// Immutable index over a [`CollectionSchema`].
///
/// "Explicit" fields are the declared fields a record must supply by name:
/// every field except an auto-generated primary key and the dynamic field.
#[derive(Debug, Clone)]
pub struct SchemaIndex {
    dim: usize,
    fields_by_id: HashMap<FieldId, FieldSchema>,
    field_id_by_name: HashMap<String, FieldId>,
    /// Explicit field IDs in declaration order.
    explicit_field_ids: Vec<FieldId>,
    primary_key: FieldSchema,
    dynamic_field: Option<FieldSchema>,
}

impl SchemaIndex {
    /// Index `schema`, validating the invariants decoding relies on.
    pub fn new(schema: &CollectionSchema) -> Result<Self, SchemaError> {
        let fields = schema.fields();
        let mut fields_by_id = HashMap::with_capacity(fields.len());
        let mut field_id_by_name = HashMap::with_capacity(fields.len());
        for field in fields {
            if fields_by_id.insert(field.field_id, field.clone()).is_some() {
                return Err(SchemaError::DuplicateFieldId {
                    field_id: field.field_id,
                    field: field.name.clone(),
                });
            }
            if field_id_by_name
                .insert(field.name.clone(), field.field_id)
                .is_some()
            {
                return Err(SchemaError::DuplicateFieldName {
                    field: field.name.clone(),
                });
            }
        }

        let vector_field = find_unique(fields, |f| f.data_type.is_vector())
            .map_err(|(first, second)| SchemaError::MultipleVectorFields { first, second })?
            .ok_or(SchemaError::NoVectorField)?;
        let dim = vector_field.dim()?;
        match vector_field.data_type {
            DataType::BinaryVector if dim % 8 != 0 => {
                return Err(SchemaError::InvalidDim {
                    field: vector_field.name.clone(),
                    value: dim.to_string(),
                });
            }
            // Two bytes per dimension must stay addressable.
            DataType::Float16Vector if dim.checked_mul(2).is_none() => {
                return Err(SchemaError::DimTooLarge {
                    field: vector_field.name.clone(),
                    data_type: vector_field.data_type,
                    dim,
                });
            }
            _ => {}
        }

        let primary_key = find_unique(fields, |f| f.is_primary_key)
            .map_err(|(first, second)| SchemaError::MultiplePrimaryKeys { first, second })?
            .ok_or(SchemaError::NoPrimaryKey)?
            .clone();

        let dynamic_field = find_unique(fields, |f| f.is_dynamic)
            .map_err(|(first, second)| SchemaError::MultipleDynamicFields { first, second })?
            .cloned();
        if let Some(field) = &dynamic_field {
            if field.data_type != DataType::Json {
                return Err(SchemaError::InvalidDynamicFieldType {
                    field: field.name.clone(),
                    data_type: field.data_type,
                });
            }
        }
        match (&dynamic_field, schema.enable_dynamic_field) {
            (None, true) => return Err(SchemaError::DynamicFieldNotDeclared),
            (Some(field), false) => {
                return Err(SchemaError::DynamicFieldNotEnabled {
                    field: field.name.clone(),
                });
            }
            _ => {}
        }

        if primary_key.auto_id {
            field_id_by_name.remove(&primary_key.name);
        }
        if let Some(field) = &dynamic_field {
            field_id_by_name.remove(&field.name);
        }

        let explicit_field_ids = fields
            .iter()
            .filter(|f| field_id_by_name.contains_key(&f.name))
            .map(|f| f.field_id)
            .collect();

        Ok(Self {
            dim,
            fields_by_id,
            field_id_by_name,
            explicit_field_ids,
            primary_key,
            dynamic_field,
        })
    }

    /// Dimensionality of the collection's vector field.
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn field(&self, field_id: FieldId) -> Option<&FieldSchema> {
        self.fields_by_id.get(&field_id)
    }

    /// Look up an explicit field by name (exact, case-sensitive match).
    pub fn explicit_field(&self, name: &str) -> Option<&FieldSchema> {
        self.field_id_by_name
            .get(name)
            .and_then(|id| self.fields_by_id.get(id))
    }

    pub fn explicit_fields(&self) -> impl Iterator<Item = &FieldSchema> {
        self.explicit_field_ids
            .iter()
            .filter_map(|id| self.fields_by_id.get(id))
    }

    pub fn num_explicit_fields(&self) -> usize {
        self.explicit_field_ids.len()
    }

    pub fn primary_key(&self) -> &FieldSchema {
        &self.primary_key
    }

    pub fn dynamic_field(&self) -> Option<&FieldSchema> {
        self.dynamic_field.as_ref()
    }
}

/// The single field matching `pred`, or the names of the first two matches.
fn find_unique(
    fields: &[FieldSchema],
    pred: impl Fn(&FieldSchema) -> bool,
) -> Result<Option<&FieldSchema>, (String, String)> {
    let mut matches = fields.iter().filter(|f| pred(f));
    let Some(first) = matches.next() else {
        return Ok(None);
    };
    match matches.next() {
        Some(second) => Err((first.name.clone(), second.name.clone())),
        None => Ok(Some(first)),
    }
}
