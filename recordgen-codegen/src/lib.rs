//! # recordgen Codegen
//!
//! Source generation from record schemas.
//!
//! This crate provides:
//! - A memoized reference graph between records
//! - Dependency ordering of records (referenced records first)
//! - Python `pyschema` class generation
//! - Avro schema to source convenience functions

pub mod config;
pub mod error;
pub mod generator;
pub mod graph;
pub mod ordering;
pub mod python;

pub use config::GeneratorConfig;
pub use error::CodegenError;
pub use generator::Generator;
pub use graph::{Node, ReferenceGraph};
pub use ordering::{collect_all_schemas, topological_sort};

use recordgen_schema::{SchemaStore, parse_schema_str};

/// Generates Python source from an Avro schema string.
///
/// # Arguments
/// * `json` - Avro record declaration
///
/// # Returns
/// Generated Python source as a string.
///
/// # Errors
/// Returns `CodegenError` if parsing or generation fails.
pub fn generate_from_avsc(json: &str) -> Result<String, CodegenError> {
    generate_from_avsc_with(json, GeneratorConfig::default())
}

/// Generates Python source from an Avro schema string with `config`.
///
/// # Errors
/// Returns `CodegenError` if parsing or generation fails.
pub fn generate_from_avsc_with(
    json: &str,
    config: GeneratorConfig,
) -> Result<String, CodegenError> {
    let mut store = SchemaStore::new();
    let root = parse_schema_str(json, &mut store)?;
    Generator::with_config(&store, config).render(&[root])
}

/// Generates Python source from an Avro schema file.
///
/// # Arguments
/// * `path` - Path to the `.avsc` file
///
/// # Returns
/// Generated Python source as a string.
///
/// # Errors
/// Returns `CodegenError` if reading, parsing, or generation fails.
pub fn generate_from_file(path: &std::path::Path) -> Result<String, CodegenError> {
    let json = std::fs::read_to_string(path)?;
    generate_from_avsc(&json)
}
