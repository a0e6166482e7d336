use std::fmt::{Error, Result, Write as _};

use super::{CollectionSchema, DIM_KEY, DataType, FieldSchema};

/// Format a collection schema in a readable style:
/// scalar fields are rendered in one line, vector and array fields are
/// pretty-printed with their type parameters.
pub fn format_collection_schema(schema: &CollectionSchema) -> std::result::Result<String, Error> {
    let mut out = String::new();

    writeln!(out, "collection: {}", schema.name)?;
    if !schema.description.is_empty() {
        writeln!(out, "description: {}", schema.description)?;
    }
    writeln!(out, "fields:")?;
    for field in schema.fields() {
        format_field(field, 4, &mut out)?;
    }

    Ok(out)
}

fn format_field(field: &FieldSchema, indent: usize, out: &mut String) -> Result {
    let pad = " ".repeat(indent);
    let flags = format_flags(field);

    match field.data_type {
        DataType::Array => {
            writeln!(out, "{pad}{}:", field.name)?;
            writeln!(out, "{pad}    type: {}", field.data_type)?;
            let element = field.element_type.unwrap_or_default();
            writeln!(out, "{pad}    element: {element}")?;
            write_flags(&flags, indent + 4, out)?;
        }
        dt if dt.is_vector() => {
            writeln!(out, "{pad}{}:", field.name)?;
            writeln!(out, "{pad}    type: {dt}")?;
            let dim = field.type_params.get(DIM_KEY).map_or("?", String::as_str);
            writeln!(out, "{pad}    dim: {dim}")?;
            write_flags(&flags, indent + 4, out)?;
        }
        dt => {
            let mut line = format!("type: {dt}");
            for flag in &flags {
                line.push_str(", ");
                line.push_str(flag);
            }
            writeln!(out, "{pad}{}: {{ {line} }}", field.name)?;
        }
    }

    Ok(())
}

fn format_flags(field: &FieldSchema) -> Vec<&'static str> {
    let mut flags = Vec::new();
    if field.is_primary_key {
        flags.push("primary_key: true");
    }
    if field.auto_id {
        flags.push("auto_id: true");
    }
    if field.is_dynamic {
        flags.push("dynamic: true");
    }
    flags
}

fn write_flags(flags: &[&str], indent: usize, out: &mut String) -> Result {
    let pad = " ".repeat(indent);
    for flag in flags {
        writeln!(out, "{pad}{flag}")?;
    }
    Ok(())
}
