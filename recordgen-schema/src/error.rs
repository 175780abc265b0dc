//! Error types for schema parsing and validation.

use crate::store::SchemaId;
use thiserror::Error;

/// Error type for Avro schema parsing operations.
#[derive(Debug, Error)]
pub enum ParseError {
    /// JSON parsing error.
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Missing required key.
    #[error("missing required key '{key}' in {context}")]
    MissingKey {
        /// Declaration being parsed.
        context: String,
        /// Key name.
        key: String,
    },

    /// Key present with a value of the wrong shape.
    #[error("invalid value for key '{key}' in {context}: expected {expected}")]
    InvalidValue {
        /// Declaration being parsed.
        context: String,
        /// Key name.
        key: String,
        /// Description of the expected value.
        expected: String,
    },

    /// Unknown complex type.
    #[error("unknown complex type '{type_name}'")]
    UnknownType {
        /// Type name.
        type_name: String,
    },

    /// Union with more than one non-null member.
    #[error("unions with multiple non-null types are unsupported: {members}")]
    UnsupportedUnion {
        /// Rendered union members.
        members: String,
    },

    /// Named type referenced before being declared.
    #[error("schema type '{name}' was referenced without prior declaration")]
    UndeclaredReference {
        /// Referenced name.
        name: String,
    },

    /// Duplicate definition.
    #[error("duplicate {kind} definition: '{name}'")]
    DuplicateDefinition {
        /// Kind of definition (record, field, etc.).
        kind: String,
        /// Name of the duplicate.
        name: String,
    },

    /// Invalid schema structure.
    #[error("invalid schema structure: {message}")]
    InvalidStructure {
        /// Error message.
        message: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error type for schema lookup, representation and validation.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Parsing error.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Schema id not present in the store.
    #[error("schema {id} not found")]
    UnknownSchema {
        /// Missing schema id.
        id: SchemaId,
    },

    /// Sub-record field pointing at a schema that does not exist.
    #[error("field '{field}' of record '{schema}' references unknown schema {target}")]
    DanglingReference {
        /// Record name.
        schema: String,
        /// Field name.
        field: String,
        /// Missing target id.
        target: SchemaId,
    },

    /// Field declared twice in the same record.
    #[error("duplicate field '{field}' in record '{schema}'")]
    DuplicateField {
        /// Record name.
        schema: String,
        /// Field name.
        field: String,
    },

    /// Two records that would generate the same class name.
    #[error("duplicate record name '{name}': generated classes would shadow each other")]
    DuplicateRecordName {
        /// Bare record name.
        name: String,
    },

    /// Name that cannot be used as an identifier in generated source.
    #[error("invalid {kind} name '{name}'")]
    InvalidIdentifier {
        /// What is being named (record, field).
        kind: String,
        /// Offending name.
        name: String,
    },

    /// Circular record reference.
    #[error("circular record reference detected: {path}")]
    CircularReference {
        /// Path of the circular reference.
        path: String,
    },

    /// Field construct with no constructor notation.
    #[error("field construct '{construct}' has no pyschema representation")]
    Unrepresentable {
        /// Construct description.
        construct: String,
    },
}

impl ParseError {
    /// Creates a missing key error.
    pub fn missing_key(context: impl Into<String>, key: impl Into<String>) -> Self {
        Self::MissingKey {
            context: context.into(),
            key: key.into(),
        }
    }

    /// Creates an invalid value error.
    pub fn invalid_value(
        context: impl Into<String>,
        key: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            context: context.into(),
            key: key.into(),
            expected: expected.into(),
        }
    }

    /// Creates a duplicate definition error.
    pub fn duplicate(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::DuplicateDefinition {
            kind: kind.into(),
            name: name.into(),
        }
    }
}

impl SchemaError {
    /// Creates an invalid identifier error.
    pub fn invalid_identifier(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            kind: kind.into(),
            name: name.into(),
        }
    }
}
