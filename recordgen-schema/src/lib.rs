//! # recordgen Schema
//!
//! Record schema metamodel and Avro schema parser.
//!
//! This crate provides:
//! - Record schema and field type definitions
//! - An arena store that gives every record a stable [`SchemaId`]
//! - Canonical `pyschema` constructor notation for fields
//! - Avro (`.avsc`) schema parsing
//! - Schema validation

pub mod error;
pub mod parser;
pub mod records;
pub mod repr;
pub mod store;
pub mod types;
pub mod validation;

pub use error::{ParseError, SchemaError};
pub use parser::{AvroSchemaParser, parse_schema_file, parse_schema_str};
pub use records::{FieldDef, RecordSchema};
pub use repr::field_repr;
pub use store::{SchemaId, SchemaStore};
pub use types::{DefaultValue, Field, FieldKind, FieldVariant, PrimitiveType};
pub use validation::{validate_schema, validate_store};
