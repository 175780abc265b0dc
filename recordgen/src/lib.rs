//! # recordgen
//!
//! Generate hand-editable `pyschema` source code from record schemas.
//!
//! Records built programmatically or parsed from Avro `.avsc` declarations
//! are rendered as Python classes, each one emitted after every record it
//! references.
//!
//! ## Quick Start
//!
//! ```
//! use recordgen::prelude::*;
//!
//! let mut store = SchemaStore::new();
//! let address = store.add(RecordSchema::new("Address").with_field("city", Field::text()));
//! let person = store.add(
//!     RecordSchema::new("Person")
//!         .with_field("name", Field::text())
//!         .with_field("home", Field::sub_record(address)),
//! );
//!
//! let source = Generator::new(&store).render(&[person])?;
//! assert!(source.find("class Address").unwrap() < source.find("class Person").unwrap());
//! # Ok::<(), CodegenError>(())
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - Record metamodel, Avro parsing and validation
//! - [`codegen`] - Reference graph, ordering and source generation

pub mod cli;
pub mod prelude;

/// Record metamodel, Avro parsing and validation.
pub mod schema {
    pub use recordgen_schema::*;
}

/// Reference graph, ordering and source generation.
pub mod codegen {
    pub use recordgen_codegen::*;
}

// Re-export commonly used items at the crate root
pub use recordgen_codegen::{CodegenError, Generator, GeneratorConfig};
pub use recordgen_schema::{Field, RecordSchema, SchemaId, SchemaStore};
