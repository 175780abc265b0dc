//! Canonical constructor notation for fields.
//!
//! Every field renders as the `pyschema` constructor call that rebuilds
//! it, e.g. `List(SubRecord(Address), nullable=False)`. Keyword arguments
//! are only emitted when they differ from the runtime defaults
//! (`nullable=True`, no default, no description, 8-byte numbers).

use crate::error::SchemaError;
use crate::store::SchemaStore;
use crate::types::{DefaultValue, Field, FieldKind, PrimitiveType};
use std::fmt::Write;

/// Renders the constructor notation of `field`.
///
/// Sub-record references are rendered with the target record's name, so
/// `store` must contain every record the field reaches.
///
/// # Errors
/// Returns `SchemaError::UnknownSchema` for a reference to a record not in
/// `store`, and `SchemaError::Unrepresentable` for constructs the runtime
/// has no constructor for.
pub fn field_repr(store: &SchemaStore, field: &Field) -> Result<String, SchemaError> {
    let mut args = Vec::new();

    let constructor = match &field.kind {
        FieldKind::Primitive(primitive) => {
            if let Some(size) = primitive.size().filter(|s| *s != PrimitiveType::DEFAULT_SIZE) {
                args.push(format!("size={}", size));
            }
            primitive.constructor()
        }
        FieldKind::Enum { symbols } => {
            let symbols: Vec<String> = symbols.iter().map(|s| py_str(s)).collect();
            args.push(format!("[{}]", symbols.join(", ")));
            "Enum"
        }
        FieldKind::List(element) => {
            args.push(field_repr(store, element)?);
            "List"
        }
        FieldKind::Map(value) => {
            args.push(field_repr(store, value)?);
            "Map"
        }
        FieldKind::SubRecord(id) => {
            args.push(store.schema(*id)?.name.clone());
            "SubRecord"
        }
        FieldKind::Fixed { name, size } => {
            return Err(SchemaError::Unrepresentable {
                construct: format!("fixed '{}' ({} bytes)", name, size),
            });
        }
    };

    if !field.nullable {
        args.push("nullable=False".to_string());
    }
    if let Some(default) = &field.default {
        args.push(format!("default={}", default_repr(default)));
    }
    if let Some(description) = &field.description {
        args.push(format!("description={}", py_str(description)));
    }

    Ok(format!("{}({})", constructor, args.join(", ")))
}

/// Renders a default value as a Python literal.
#[must_use]
pub fn default_repr(value: &DefaultValue) -> String {
    match value {
        DefaultValue::Null => "None".to_string(),
        DefaultValue::Boolean(true) => "True".to_string(),
        DefaultValue::Boolean(false) => "False".to_string(),
        DefaultValue::Integer(v) => v.to_string(),
        DefaultValue::Float(v) => float_repr(*v),
        DefaultValue::Text(s) => py_str(s),
        DefaultValue::Bytes(b) => py_bytes(b),
        DefaultValue::List(items) => {
            let items: Vec<String> = items.iter().map(default_repr).collect();
            format!("[{}]", items.join(", "))
        }
        DefaultValue::Map(entries) => {
            let entries: Vec<String> = entries
                .iter()
                .map(|(k, v)| format!("{}: {}", py_str(k), default_repr(v)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
    }
}

/// Renders a Python string literal.
///
/// Quote selection follows Python's own `repr`: single quotes unless the
/// text contains a single quote and no double quote.
#[must_use]
pub fn py_str(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };

    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => {
                // Control characters all lie below U+0100.
                let _ = write!(out, "\\x{:02x}", u32::from(c));
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Renders a Python bytes literal.
#[must_use]
pub fn py_bytes(bytes: &[u8]) -> String {
    let quote = if bytes.contains(&b'\'') && !bytes.contains(&b'"') {
        b'"'
    } else {
        b'\''
    };

    let mut out = String::with_capacity(bytes.len() + 3);
    out.push('b');
    out.push(quote as char);
    for &b in bytes {
        match b {
            b'\\' => out.push_str("\\\\"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            b if b == quote => {
                out.push('\\');
                out.push(b as char);
            }
            0x20..=0x7e => out.push(b as char),
            b => {
                let _ = write!(out, "\\x{:02x}", b);
            }
        }
    }
    out.push(quote as char);
    out
}

fn float_repr(v: f64) -> String {
    if v.is_nan() {
        "float('nan')".to_string()
    } else if v.is_infinite() {
        if v > 0.0 {
            "float('inf')".to_string()
        } else {
            "-float('inf')".to_string()
        }
    } else {
        format!("{:?}", v)
    }
}
