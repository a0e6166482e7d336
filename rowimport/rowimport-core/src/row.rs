//! Strongly-typed output records produced by row decoders.

use std::collections::{BTreeMap, btree_map};

use crate::schema::FieldId;

/// Homogeneous element sequence stored in an `Array` field.
///
/// `Int8`, `Int16` and `Int32` elements all share the `Int` representation.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarArray {
    Bool(Vec<bool>),
    Int(Vec<i32>),
    Long(Vec<i64>),
    Float(Vec<f32>),
    Double(Vec<f64>),
    String(Vec<String>),
}

impl ScalarArray {
    pub fn type_name(&self) -> &'static str {
        match self {
            ScalarArray::Bool(_) => "Array<Bool>",
            ScalarArray::Int(_) => "Array<Int>",
            ScalarArray::Long(_) => "Array<Long>",
            ScalarArray::Float(_) => "Array<Float>",
            ScalarArray::Double(_) => "Array<Double>",
            ScalarArray::String(_) => "Array<String>",
        }
    }
}

/// Decoded value of one field. The variant is fixed by the field's declared
/// [`DataType`](crate::DataType).
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Bool(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float(f32),
    Double(f64),
    String(String),
    /// Raw bytes of a well-formed JSON document.
    Json(Vec<u8>),
    /// Packed bits, one byte per eight dimensions.
    BinaryVector(Vec<u8>),
    FloatVector(Vec<f32>),
    /// Raw little-endian byte pairs, two bytes per dimension.
    Float16Vector(Vec<u8>),
    Array(ScalarArray),
}

impl FieldValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Bool(_) => "Bool",
            FieldValue::Int8(_) => "Int8",
            FieldValue::Int16(_) => "Int16",
            FieldValue::Int32(_) => "Int32",
            FieldValue::Int64(_) => "Int64",
            FieldValue::Float(_) => "Float",
            FieldValue::Double(_) => "Double",
            FieldValue::String(_) => "String",
            FieldValue::Json(_) => "JSON",
            FieldValue::BinaryVector(_) => "BinaryVector",
            FieldValue::FloatVector(_) => "FloatVector",
            FieldValue::Float16Vector(_) => "Float16Vector",
            FieldValue::Array(array) => array.type_name(),
        }
    }

    pub fn as_json_str(&self) -> Option<&str> {
        match self {
            FieldValue::Json(bytes) => std::str::from_utf8(bytes).ok(),
            _ => None,
        }
    }
}

/// A decoded record keyed by field ID.
///
/// Entries are ordered by field ID, so two rows decoded from the same input
/// compare equal and iterate identically.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row(BTreeMap<FieldId, FieldValue>);

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field_id: FieldId, value: FieldValue) -> Option<FieldValue> {
        self.0.insert(field_id, value)
    }

    pub fn get(&self, field_id: FieldId) -> Option<&FieldValue> {
        self.0.get(&field_id)
    }

    pub fn contains(&self, field_id: FieldId) -> bool {
        self.0.contains_key(&field_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn field_ids(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, FieldId, FieldValue> {
        self.0.iter()
    }

    pub fn into_inner(self) -> BTreeMap<FieldId, FieldValue> {
        self.0
    }
}

impl FromIterator<(FieldId, FieldValue)> for Row {
    fn from_iter<I: IntoIterator<Item = (FieldId, FieldValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Row {
    type Item = (FieldId, FieldValue);
    type IntoIter = btree_map::IntoIter<FieldId, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Row {
    type Item = (&'a FieldId, &'a FieldValue);
    type IntoIter = btree_map::Iter<'a, FieldId, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
