//! Record schema definitions.

use crate::types::Field;

/// Record schema definition.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSchema {
    /// Record name.
    pub name: String,
    /// Namespace, if declared.
    pub namespace: Option<String>,
    /// Documentation.
    pub doc: Option<String>,
    /// Fields in declaration order.
    pub fields: Vec<FieldDef>,
}

impl RecordSchema {
    /// Creates a new record schema without fields.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: None,
            doc: None,
            fields: Vec::new(),
        }
    }

    /// Sets the namespace.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Sets the documentation.
    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Appends a field.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, field: Field) -> Self {
        self.add_field(name, field);
        self
    }

    /// Appends a field.
    pub fn add_field(&mut self, name: impl Into<String>, field: Field) {
        self.fields.push(FieldDef::new(name, field));
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name).map(|f| &f.field)
    }

    /// Returns the namespace-qualified name.
    #[must_use]
    pub fn full_name(&self) -> String {
        match &self.namespace {
            Some(ns) if !ns.is_empty() => format!("{}.{}", ns, self.name),
            _ => self.name.clone(),
        }
    }
}

/// Named field within a record.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    /// Field name.
    pub name: String,
    /// Field type and attributes.
    pub field: Field,
}

impl FieldDef {
    /// Creates a new field definition.
    #[must_use]
    pub fn new(name: impl Into<String>, field: Field) -> Self {
        Self {
            name: name.into(),
            field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_order_preserved() {
        let schema = RecordSchema::new("Person")
            .with_field("name", Field::text())
            .with_field("age", Field::integer())
            .with_field("alias", Field::text());

        let names: Vec<_> = schema.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["name", "age", "alias"]);
    }

    #[test]
    fn test_field_lookup() {
        let schema = RecordSchema::new("Person").with_field("age", Field::integer());
        assert_eq!(schema.field("age"), Some(&Field::integer()));
        assert!(schema.field("missing").is_none());
    }

    #[test]
    fn test_full_name() {
        assert_eq!(RecordSchema::new("Person").full_name(), "Person");
        assert_eq!(
            RecordSchema::new("Person")
                .with_namespace("com.example")
                .full_name(),
            "com.example.Person"
        );
        assert_eq!(
            RecordSchema::new("Person").with_namespace("").full_name(),
            "Person"
        );
    }
}
