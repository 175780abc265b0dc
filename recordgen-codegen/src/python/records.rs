//! Record class code generation.

use super::{EMPTY_BODY, WARNING_LINES};
use crate::error::CodegenError;
use recordgen_schema::repr::py_str;
use recordgen_schema::{RecordSchema, SchemaError, SchemaId, SchemaStore, field_repr};

/// Generator for `pyschema.Record` class definitions.
///
/// Renders one record at a time and does not look at the records it
/// references; ordering is the caller's concern.
pub struct RecordGenerator<'a> {
    store: &'a SchemaStore,
    indent: &'a str,
}

impl<'a> RecordGenerator<'a> {
    /// Creates a new record generator.
    #[must_use]
    pub fn new(store: &'a SchemaStore, indent: &'a str) -> Self {
        Self { store, indent }
    }

    /// Generates the class definition of the record `id`.
    ///
    /// # Errors
    /// Returns `CodegenError::InvalidInput` if `id` is not in the store and
    /// `CodegenError::UnsupportedConstruct` if a field has no constructor
    /// notation.
    pub fn generate(&self, id: SchemaId) -> Result<String, CodegenError> {
        let schema = self
            .store
            .get(id)
            .ok_or(CodegenError::InvalidInput { id })?;
        self.generate_record(schema)
    }

    /// Generates the class definition of `schema`.
    ///
    /// # Errors
    /// Returns `CodegenError::UnsupportedConstruct` if a field has no
    /// constructor notation.
    pub fn generate_record(&self, schema: &RecordSchema) -> Result<String, CodegenError> {
        let indent = self.indent;
        let mut output = String::new();

        output.push_str(&format!("class {}(pyschema.Record):\n", schema.name));
        for line in WARNING_LINES {
            output.push_str(&format!("{}{}\n", indent, line));
        }

        if let Some(namespace) = &schema.namespace {
            output.push_str(&format!("{}_namespace = {}\n", indent, py_str(namespace)));
        }

        for def in &schema.fields {
            let repr = field_repr(self.store, &def.field).map_err(|e| match e {
                SchemaError::Unrepresentable { construct } => {
                    CodegenError::unsupported(&schema.name, &def.name, construct)
                }
                other => CodegenError::Schema(other),
            })?;
            output.push_str(&format!("{}{} = {}\n", indent, def.name, repr));
        }

        if schema.fields.is_empty() {
            output.push_str(&format!("{}{}\n", indent, EMPTY_BODY));
        }

        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recordgen_schema::{Field, PrimitiveType};

    fn person_store() -> (SchemaStore, SchemaId, SchemaId) {
        let mut store = SchemaStore::new();
        let address = store.add(
            RecordSchema::new("Address")
                .with_namespace("com.example")
                .with_field("city", Field::text()),
        );
        let person = store.add(
            RecordSchema::new("Person")
                .with_field("name", Field::text().with_nullable(false))
                .with_field("age", Field::primitive(PrimitiveType::Integer { size: 4 }))
                .with_field("home", Field::sub_record(address)),
        );
        (store, address, person)
    }

    #[test]
    fn test_generate_record() {
        let (store, _, person) = person_store();
        let generator = RecordGenerator::new(&store, "    ");
        let output = generator.generate(person).expect("Failed to generate");

        assert_eq!(
            output,
            "class Person(pyschema.Record):\n\
             \x20   # WARNING: This class was generated by recordgen\n\
             \x20   # there is a risk that any modification made to this class will be overwritten\n\
             \x20   name = Text(nullable=False)\n\
             \x20   age = Integer(size=4)\n\
             \x20   home = SubRecord(Address)\n"
        );
    }

    #[test]
    fn test_namespace_line() {
        let (store, address, _) = person_store();
        let generator = RecordGenerator::new(&store, "  ");
        let output = generator.generate(address).expect("Failed to generate");

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines[3], "  _namespace = 'com.example'");
        assert_eq!(lines[4], "  city = Text()");
    }

    #[test]
    fn test_empty_record_gets_pass() {
        let mut store = SchemaStore::new();
        let empty = store.add(RecordSchema::new("Empty"));
        let generator = RecordGenerator::new(&store, "\t");
        let output = generator.generate(empty).expect("Failed to generate");

        assert!(output.ends_with("\tpass\n"));
        assert_eq!(output.matches("pass").count(), 1);
        assert_eq!(output.lines().count(), 4);
    }

    #[test]
    fn test_unknown_record() {
        let store = SchemaStore::new();
        let generator = RecordGenerator::new(&store, "    ");
        assert!(matches!(
            generator.generate(SchemaId::from_index(0)),
            Err(CodegenError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_fixed_field_unsupported() {
        let mut store = SchemaStore::new();
        let blob =
            store.add(RecordSchema::new("Blob").with_field("digest", Field::fixed("MD5", 16)));
        let generator = RecordGenerator::new(&store, "    ");

        match generator.generate(blob) {
            Err(CodegenError::UnsupportedConstruct { schema, field, .. }) => {
                assert_eq!(schema, "Blob");
                assert_eq!(field, "digest");
            }
            other => panic!("expected unsupported construct, got {:?}", other),
        }
    }
}
