//! Schema validation utilities.
//!
//! This module provides validation functions for record schemas to ensure
//! they can be rendered as source code.

use crate::error::SchemaError;
use crate::records::RecordSchema;
use crate::store::{SchemaId, SchemaStore};
use crate::types::{Field, FieldKind};
use std::collections::{HashMap, HashSet};

/// Python keywords that cannot be used as record or field names.
const RESERVED_WORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if",
    "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try",
    "while", "with", "yield",
];

/// Validates every record in the store.
///
/// # Errors
/// Returns the first `SchemaError` found.
pub fn validate_store(store: &SchemaStore) -> Result<(), SchemaError> {
    let mut marks = HashMap::new();
    let mut visited = Vec::new();
    let mut names = HashSet::new();
    for (id, schema) in store.iter() {
        validate_record(store, schema)?;
        check_unique_name(schema, &mut names)?;
        check_cycles(store, id, &mut marks, &mut Vec::new(), &mut visited)?;
    }
    Ok(())
}

/// Validates one record and everything it references.
///
/// # Arguments
/// * `store` - Store owning the record
/// * `id` - Record to validate
///
/// # Returns
/// Ok(()) if valid, or SchemaError describing the issue.
///
/// # Errors
/// Returns `SchemaError` if validation fails.
pub fn validate_schema(store: &SchemaStore, id: SchemaId) -> Result<(), SchemaError> {
    let mut marks = HashMap::new();
    let mut visited = Vec::new();
    check_cycles(store, id, &mut marks, &mut Vec::new(), &mut visited)?;

    let mut names = HashSet::new();
    for visited_id in visited {
        let schema = store.schema(visited_id)?;
        validate_record(store, schema)?;
        check_unique_name(schema, &mut names)?;
    }
    Ok(())
}

/// Fails if another record already claimed the class name of `schema`.
///
/// Generated classes are named by bare record name, so two records that
/// differ only by namespace would shadow each other.
fn check_unique_name<'s>(
    schema: &'s RecordSchema,
    names: &mut HashSet<&'s str>,
) -> Result<(), SchemaError> {
    if names.insert(schema.name.as_str()) {
        Ok(())
    } else {
        Err(SchemaError::DuplicateRecordName {
            name: schema.name.clone(),
        })
    }
}

/// Validates names and references of a single record.
fn validate_record(store: &SchemaStore, schema: &RecordSchema) -> Result<(), SchemaError> {
    if !is_identifier(&schema.name) {
        return Err(SchemaError::invalid_identifier("record", &schema.name));
    }

    let mut seen = HashSet::new();
    for def in &schema.fields {
        if !is_identifier(&def.name) {
            return Err(SchemaError::invalid_identifier("field", &def.name));
        }
        if !seen.insert(def.name.as_str()) {
            return Err(SchemaError::DuplicateField {
                schema: schema.name.clone(),
                field: def.name.clone(),
            });
        }

        let mut targets = Vec::new();
        references(&def.field, &mut targets);
        if let Some(&target) = targets.iter().find(|t| !store.contains(**t)) {
            return Err(SchemaError::DanglingReference {
                schema: schema.name.clone(),
                field: def.name.clone(),
                target,
            });
        }
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

/// Depth-first walk failing on the first back edge.
///
/// Records are appended to `visited` in the order they are first reached.
fn check_cycles(
    store: &SchemaStore,
    id: SchemaId,
    marks: &mut HashMap<SchemaId, Mark>,
    path: &mut Vec<SchemaId>,
    visited: &mut Vec<SchemaId>,
) -> Result<(), SchemaError> {
    match marks.get(&id) {
        Some(Mark::Done) => return Ok(()),
        Some(Mark::Visiting) => {
            let start = path.iter().position(|p| *p == id).unwrap_or(0);
            let mut names: Vec<&str> = path[start..]
                .iter()
                .filter_map(|p| store.get(*p).map(|s| s.name.as_str()))
                .collect();
            names.extend(store.get(id).map(|s| s.name.as_str()));
            return Err(SchemaError::CircularReference {
                path: names.join(" -> "),
            });
        }
        None => {}
    }

    let schema = store.schema(id)?;
    marks.insert(id, Mark::Visiting);
    visited.push(id);
    path.push(id);

    let mut targets = Vec::new();
    for def in &schema.fields {
        references(&def.field, &mut targets);
    }
    for target in targets {
        if store.contains(target) {
            check_cycles(store, target, marks, path, visited)?;
        }
    }

    path.pop();
    marks.insert(id, Mark::Done);
    Ok(())
}

/// Collects the records a field references directly.
fn references(field: &Field, out: &mut Vec<SchemaId>) {
    match &field.kind {
        FieldKind::SubRecord(id) => out.push(*id),
        FieldKind::List(inner) | FieldKind::Map(inner) => references(inner, out),
        FieldKind::Primitive(_) | FieldKind::Enum { .. } | FieldKind::Fixed { .. } => {}
    }
}

/// Returns true if `name` is usable as a Python identifier.
#[must_use]
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first == '_' || first.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
        && !RESERVED_WORDS.contains(&name)
}
