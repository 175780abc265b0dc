//! Avro schema parser.
//!
//! This module parses Avro `.avsc` JSON record declarations into records
//! of a [`SchemaStore`]. Nested record declarations are registered in the
//! store as they are encountered, so later declarations can refer to them
//! by name.

use crate::error::ParseError;
use crate::records::RecordSchema;
use crate::store::{SchemaId, SchemaStore};
use crate::types::{DefaultValue, Field, FieldKind, PrimitiveType};
use serde_json::{Map, Value};
use std::path::Path;

/// Parses a record declaration from an Avro schema string.
///
/// # Arguments
/// * `json` - Avro schema content
/// * `store` - Store receiving the parsed record and every nested record
///
/// # Returns
/// Handle of the top-level record.
///
/// # Errors
/// Returns `ParseError` if the JSON is malformed or uses unsupported
/// constructs.
pub fn parse_schema_str(json: &str, store: &mut SchemaStore) -> Result<SchemaId, ParseError> {
    AvroSchemaParser::new(store).parse_str(json)
}

/// Parses a record declaration from an Avro schema file.
///
/// # Errors
/// Returns `ParseError` if reading or parsing fails.
pub fn parse_schema_file(path: &Path, store: &mut SchemaStore) -> Result<SchemaId, ParseError> {
    let json = std::fs::read_to_string(path)?;
    parse_schema_str(&json, store)
}

/// Parser turning Avro declarations into store records.
pub struct AvroSchemaParser<'a> {
    store: &'a mut SchemaStore,
}

impl<'a> AvroSchemaParser<'a> {
    /// Creates a parser registering records in `store`.
    pub fn new(store: &'a mut SchemaStore) -> Self {
        Self { store }
    }

    /// Parses a top-level record declaration from a JSON string.
    ///
    /// # Errors
    /// Returns `ParseError` if the JSON is malformed or not a record.
    pub fn parse_str(&mut self, json: &str) -> Result<SchemaId, ParseError> {
        let value: Value = serde_json::from_str(json)?;
        self.parse_value(&value)
    }

    /// Parses a top-level record declaration from a JSON value.
    ///
    /// # Errors
    /// Returns `ParseError` if the value is not a valid record declaration.
    pub fn parse_value(&mut self, value: &Value) -> Result<SchemaId, ParseError> {
        let obj = value.as_object().ok_or_else(|| ParseError::InvalidStructure {
            message: "top-level schema must be a record object".to_string(),
        })?;

        match obj.get("type").and_then(Value::as_str) {
            None | Some("record") => self.parse_record(obj),
            Some(other) => Err(ParseError::InvalidStructure {
                message: format!("top-level schema must be a record, got '{}'", other),
            }),
        }
    }

    /// Parses a record object and registers it in the store.
    fn parse_record(&mut self, obj: &Map<String, Value>) -> Result<SchemaId, ParseError> {
        let raw_name = obj
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| ParseError::missing_key("record", "name"))?;
        let context = format!("record '{}'", raw_name);

        let mut record = match obj.get("namespace").and_then(Value::as_str) {
            Some(ns) => RecordSchema::new(raw_name).with_namespace(ns),
            None => match raw_name.rsplit_once('.') {
                Some((ns, name)) => RecordSchema::new(name).with_namespace(ns),
                None => RecordSchema::new(raw_name),
            },
        };
        if let Some(doc) = obj.get("doc").and_then(Value::as_str) {
            record.doc = Some(doc.to_string());
        }

        let full_name = record.full_name();
        if self.is_declared(&full_name) {
            return Err(ParseError::duplicate("record", full_name));
        }

        let fields = obj
            .get("fields")
            .ok_or_else(|| ParseError::missing_key(context.as_str(), "fields"))?
            .as_array()
            .ok_or_else(|| ParseError::invalid_value(context.as_str(), "fields", "an array"))?;

        for field_def in fields {
            let field_obj = field_def.as_object().ok_or_else(|| {
                ParseError::invalid_value(context.as_str(), "fields", "an array of objects")
            })?;
            let field_name = field_obj
                .get("name")
                .and_then(Value::as_str)
                .ok_or_else(|| ParseError::missing_key(format!("field of {}", context), "name"))?;
            if record.field(field_name).is_some() {
                return Err(ParseError::duplicate("field", format!("{}.{}", full_name, field_name)));
            }
            let type_def = field_obj.get("type").ok_or_else(|| {
                ParseError::missing_key(format!("field '{}' of {}", field_name, context), "type")
            })?;

            let mut field = self.field_type(type_def)?;
            if let Some(doc) = field_obj.get("doc").and_then(Value::as_str) {
                field.description = Some(doc.to_string());
            }
            if let Some(default) = field_obj.get("default") {
                field.default = default_value(&field.kind, default);
                if field.default.is_none() {
                    tracing::warn!(
                        "Ignoring default of field '{}' in {}: no literal form for {}",
                        field_name,
                        context,
                        default
                    );
                }
            }
            record.add_field(field_name, field);
        }

        // A nested declaration may have claimed the name while fields were parsed.
        if self.is_declared(&full_name) {
            return Err(ParseError::duplicate("record", full_name));
        }

        let field_count = record.fields.len();
        let id = self.store.add(record);
        tracing::debug!(
            "Parsed record '{}' with {} fields as {}",
            full_name,
            field_count,
            id
        );
        Ok(id)
    }

    /// Returns true if a record with exactly this full name exists.
    fn is_declared(&self, full_name: &str) -> bool {
        self.store
            .lookup(full_name)
            .and_then(|id| self.store.get(id))
            .is_some_and(|schema| schema.full_name() == full_name)
    }

    /// Parses a type declaration into a non-nullable field.
    fn field_type(&mut self, type_def: &Value) -> Result<Field, ParseError> {
        match type_def {
            Value::Array(members) => self.parse_union(members),
            Value::Object(obj) => self.parse_complex(obj),
            Value::String(name) => match PrimitiveType::from_avro_name(name) {
                Some(primitive) => Ok(Field::primitive(primitive).with_nullable(false)),
                None => self.parse_reference(name),
            },
            other => Err(ParseError::InvalidStructure {
                message: format!("unexpected type declaration: {}", other),
            }),
        }
    }

    fn parse_union(&mut self, members: &[Value]) -> Result<Field, ParseError> {
        let non_null: Vec<&Value> = members
            .iter()
            .filter(|member| member.as_str() != Some("null"))
            .collect();

        let actual = match non_null.as_slice() {
            [actual] => *actual,
            [] => {
                return Err(ParseError::InvalidStructure {
                    message: "union must contain a non-null type".to_string(),
                });
            }
            _ => {
                return Err(ParseError::UnsupportedUnion {
                    members: Value::Array(members.to_vec()).to_string(),
                });
            }
        };

        let nullable = non_null.len() < members.len();
        Ok(self.field_type(actual)?.with_nullable(nullable))
    }

    fn parse_complex(&mut self, obj: &Map<String, Value>) -> Result<Field, ParseError> {
        let type_name = obj
            .get("type")
            .ok_or_else(|| ParseError::missing_key("complex type", "type"))?;

        let kind = match type_name.as_str() {
            Some("record") => FieldKind::SubRecord(self.parse_record(obj)?),
            Some("array") => {
                let items = obj
                    .get("items")
                    .ok_or_else(|| ParseError::missing_key("array", "items"))?;
                FieldKind::List(Box::new(self.field_type(items)?))
            }
            Some("map") => {
                let values = obj
                    .get("values")
                    .ok_or_else(|| ParseError::missing_key("map", "values"))?;
                FieldKind::Map(Box::new(self.field_type(values)?))
            }
            Some("enum") => {
                let symbols = obj
                    .get("symbols")
                    .and_then(Value::as_array)
                    .ok_or_else(|| ParseError::missing_key("enum", "symbols"))?;
                let symbols = symbols
                    .iter()
                    .map(|s| {
                        s.as_str().map(str::to_string).ok_or_else(|| {
                            ParseError::invalid_value("enum", "symbols", "an array of strings")
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                FieldKind::Enum { symbols }
            }
            Some("fixed") => {
                let name = obj
                    .get("name")
                    .and_then(Value::as_str)
                    .ok_or_else(|| ParseError::missing_key("fixed", "name"))?;
                let size = obj
                    .get("size")
                    .and_then(Value::as_u64)
                    .ok_or_else(|| ParseError::missing_key("fixed", "size"))?;
                FieldKind::Fixed {
                    name: name.to_string(),
                    size: usize::try_from(size).map_err(|_| {
                        ParseError::invalid_value("fixed", "size", "a platform-sized integer")
                    })?,
                }
            }
            Some(other) => match PrimitiveType::from_avro_name(other) {
                Some(primitive) => FieldKind::Primitive(primitive),
                None => {
                    return Err(ParseError::UnknownType {
                        type_name: other.to_string(),
                    });
                }
            },
            None => {
                return Err(ParseError::UnknownType {
                    type_name: type_name.to_string(),
                });
            }
        };

        Ok(Field::new(kind).with_nullable(false))
    }

    fn parse_reference(&self, name: &str) -> Result<Field, ParseError> {
        let id = self
            .store
            .lookup(name)
            .ok_or_else(|| ParseError::UndeclaredReference {
                name: name.to_string(),
            })?;
        Ok(Field::sub_record(id).with_nullable(false))
    }
}

/// Converts an Avro JSON default into a literal for a field of `kind`.
///
/// Returns `None` when the literal has no representation, e.g. record
/// defaults.
fn default_value(kind: &FieldKind, value: &Value) -> Option<DefaultValue> {
    match (kind, value) {
        (_, Value::Null) => Some(DefaultValue::Null),
        (FieldKind::SubRecord(_) | FieldKind::Fixed { .. }, _) => None,
        (FieldKind::Primitive(PrimitiveType::Bytes), Value::String(s)) => {
            // Avro encodes bytes defaults as code points 0-255.
            s.chars()
                .map(|c| u8::try_from(u32::from(c)).ok())
                .collect::<Option<Vec<u8>>>()
                .map(DefaultValue::Bytes)
        }
        (FieldKind::Primitive(PrimitiveType::Float { .. }), Value::Number(n)) => {
            n.as_f64().map(DefaultValue::Float)
        }
        (_, Value::Bool(b)) => Some(DefaultValue::Boolean(*b)),
        (_, Value::Number(n)) => n
            .as_i64()
            .map(DefaultValue::Integer)
            .or_else(|| n.as_f64().map(DefaultValue::Float)),
        (_, Value::String(s)) => Some(DefaultValue::Text(s.clone())),
        (FieldKind::List(element), Value::Array(items)) => items
            .iter()
            .map(|item| default_value(&element.kind, item))
            .collect::<Option<Vec<_>>>()
            .map(DefaultValue::List),
        (FieldKind::Map(value_field), Value::Object(entries)) => entries
            .iter()
            .map(|(k, v)| default_value(&value_field.kind, v).map(|v| (k.clone(), v)))
            .collect::<Option<Vec<_>>>()
            .map(DefaultValue::Map),
        _ => None,
    }
}
