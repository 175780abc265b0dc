//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and functions.
//!
//! ```
//! use recordgen::prelude::*;
//! ```

// Schema types
pub use recordgen_schema::{
    DefaultValue, Field, FieldKind, FieldVariant, PrimitiveType, RecordSchema, SchemaId,
    SchemaStore,
};
pub use recordgen_schema::{ParseError, SchemaError};
pub use recordgen_schema::{parse_schema_file, parse_schema_str, validate_store};

// Generation types
pub use recordgen_codegen::{
    CodegenError, Generator, GeneratorConfig, Node, ReferenceGraph, generate_from_avsc,
    generate_from_file,
};
