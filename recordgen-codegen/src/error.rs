//! Error types for code generation.

use recordgen_schema::SchemaId;
use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Schema parsing error.
    #[error("schema parse error: {0}")]
    Parse(#[from] recordgen_schema::ParseError),

    /// Schema lookup or validation error.
    #[error("schema error: {0}")]
    Schema(#[from] recordgen_schema::SchemaError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Root or query node that is not a known record.
    #[error("invalid input: {id} is not a record schema in this graph")]
    InvalidInput {
        /// Offending id.
        id: SchemaId,
    },

    /// Field construct the backend cannot express.
    #[error("unsupported construct in field '{field}' of record '{schema}': {construct}")]
    UnsupportedConstruct {
        /// Record name.
        schema: String,
        /// Field name.
        field: String,
        /// Construct description.
        construct: String,
    },

    /// Record graph containing a cycle.
    #[error("cyclic record reference: {path}")]
    CyclicReference {
        /// Records along the cycle.
        path: String,
    },

    /// Invalid generator configuration.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// Error message.
        message: String,
    },
}

impl CodegenError {
    /// Creates an unsupported construct error.
    pub fn unsupported(
        schema: impl Into<String>,
        field: impl Into<String>,
        construct: impl Into<String>,
    ) -> Self {
        Self::UnsupportedConstruct {
            schema: schema.into(),
            field: field.into(),
            construct: construct.into(),
        }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}
