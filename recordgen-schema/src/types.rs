//! Field type definitions.
//!
//! This module contains the data structures describing the type of a record
//! field: primitives, enums, containers and sub-record references.

use crate::store::SchemaId;

/// Primitive field types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    /// Unicode text.
    Text,
    /// Raw bytes.
    Bytes,
    /// Signed integer of the given byte size.
    Integer {
        /// Size in bytes (4 or 8).
        size: u8,
    },
    /// Floating point number of the given byte size.
    Float {
        /// Size in bytes (4 or 8).
        size: u8,
    },
    /// Boolean.
    Boolean,
    /// Calendar date.
    Date,
    /// Date and time.
    DateTime,
}

impl PrimitiveType {
    /// Default byte size for sized numeric types.
    pub const DEFAULT_SIZE: u8 = 8;

    /// Returns the `pyschema` constructor name for this primitive.
    #[must_use]
    pub const fn constructor(&self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Bytes => "Bytes",
            Self::Integer { .. } => "Integer",
            Self::Float { .. } => "Float",
            Self::Boolean => "Boolean",
            Self::Date => "Date",
            Self::DateTime => "DateTime",
        }
    }

    /// Returns the byte size of sized numeric types.
    #[must_use]
    pub const fn size(&self) -> Option<u8> {
        match self {
            Self::Integer { size } | Self::Float { size } => Some(*size),
            _ => None,
        }
    }

    /// Parses a primitive type from its Avro name.
    #[must_use]
    pub fn from_avro_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(Self::Text),
            "bytes" => Some(Self::Bytes),
            "int" => Some(Self::Integer { size: 4 }),
            "long" => Some(Self::Integer {
                size: Self::DEFAULT_SIZE,
            }),
            "float" => Some(Self::Float { size: 4 }),
            "double" => Some(Self::Float {
                size: Self::DEFAULT_SIZE,
            }),
            "boolean" => Some(Self::Boolean),
            _ => None,
        }
    }
}

/// Literal default value of a field.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    /// Explicit null default.
    Null,
    /// Boolean literal.
    Boolean(bool),
    /// Integer literal.
    Integer(i64),
    /// Floating point literal.
    Float(f64),
    /// Text literal.
    Text(String),
    /// Bytes literal.
    Bytes(Vec<u8>),
    /// List literal.
    List(Vec<DefaultValue>),
    /// Map literal with entries in declaration order.
    Map(Vec<(String, DefaultValue)>),
}

/// The type of a field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Primitive value.
    Primitive(PrimitiveType),
    /// Enumeration over a fixed set of symbols.
    Enum {
        /// Symbols in declaration order.
        symbols: Vec<String>,
    },
    /// List of elements.
    List(Box<Field>),
    /// Text-keyed map of values.
    Map(Box<Field>),
    /// Reference to another record schema.
    SubRecord(SchemaId),
    /// Fixed-size byte blob.
    Fixed {
        /// Declared type name.
        name: String,
        /// Size in bytes.
        size: usize,
    },
}

/// Variant classification of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldVariant {
    /// Carries no schema reference (primitives and enums).
    Primitive,
    /// Reaches schemas through its element.
    List,
    /// Reaches schemas through its value.
    Map,
    /// References exactly one schema.
    SubRecord,
    /// Fixed-size blob.
    Fixed,
}

/// A typed record attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Field type.
    pub kind: FieldKind,
    /// Whether the field accepts null.
    pub nullable: bool,
    /// Default value, if any.
    pub default: Option<DefaultValue>,
    /// Description.
    pub description: Option<String>,
}

impl Field {
    /// Creates a nullable field of the given kind without default.
    #[must_use]
    pub fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            nullable: true,
            default: None,
            description: None,
        }
    }

    /// Creates a primitive field.
    #[must_use]
    pub fn primitive(primitive: PrimitiveType) -> Self {
        Self::new(FieldKind::Primitive(primitive))
    }

    /// Creates a text field.
    #[must_use]
    pub fn text() -> Self {
        Self::primitive(PrimitiveType::Text)
    }

    /// Creates a bytes field.
    #[must_use]
    pub fn bytes() -> Self {
        Self::primitive(PrimitiveType::Bytes)
    }

    /// Creates an 8-byte integer field.
    #[must_use]
    pub fn integer() -> Self {
        Self::primitive(PrimitiveType::Integer {
            size: PrimitiveType::DEFAULT_SIZE,
        })
    }

    /// Creates an 8-byte float field.
    #[must_use]
    pub fn float() -> Self {
        Self::primitive(PrimitiveType::Float {
            size: PrimitiveType::DEFAULT_SIZE,
        })
    }

    /// Creates a boolean field.
    #[must_use]
    pub fn boolean() -> Self {
        Self::primitive(PrimitiveType::Boolean)
    }

    /// Creates an enum field.
    #[must_use]
    pub fn enumeration<I, S>(symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(FieldKind::Enum {
            symbols: symbols.into_iter().map(Into::into).collect(),
        })
    }

    /// Creates a list field.
    #[must_use]
    pub fn list(element: Field) -> Self {
        Self::new(FieldKind::List(Box::new(element)))
    }

    /// Creates a map field.
    #[must_use]
    pub fn map(value: Field) -> Self {
        Self::new(FieldKind::Map(Box::new(value)))
    }

    /// Creates a sub-record field.
    #[must_use]
    pub fn sub_record(target: SchemaId) -> Self {
        Self::new(FieldKind::SubRecord(target))
    }

    /// Creates a fixed-size blob field.
    #[must_use]
    pub fn fixed(name: impl Into<String>, size: usize) -> Self {
        Self::new(FieldKind::Fixed {
            name: name.into(),
            size,
        })
    }

    /// Sets nullability.
    #[must_use]
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn with_default(mut self, default: DefaultValue) -> Self {
        self.default = Some(default);
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns the variant classification of this field.
    #[must_use]
    pub const fn variant(&self) -> FieldVariant {
        match self.kind {
            FieldKind::Primitive(_) | FieldKind::Enum { .. } => FieldVariant::Primitive,
            FieldKind::List(_) => FieldVariant::List,
            FieldKind::Map(_) => FieldVariant::Map,
            FieldKind::SubRecord(_) => FieldVariant::SubRecord,
            FieldKind::Fixed { .. } => FieldVariant::Fixed,
        }
    }

    /// Returns the element field of a list.
    #[must_use]
    pub fn element_type(&self) -> Option<&Field> {
        match &self.kind {
            FieldKind::List(element) => Some(element.as_ref()),
            _ => None,
        }
    }

    /// Returns the value field of a map.
    #[must_use]
    pub fn value_type(&self) -> Option<&Field> {
        match &self.kind {
            FieldKind::Map(value) => Some(value.as_ref()),
            _ => None,
        }
    }

    /// Returns the schema referenced by a sub-record.
    #[must_use]
    pub fn target_schema(&self) -> Option<SchemaId> {
        match self.kind {
            FieldKind::SubRecord(id) => Some(id),
            _ => None,
        }
    }

    /// Returns the field nested directly inside a container, if any.
    #[must_use]
    pub fn nested(&self) -> Option<&Field> {
        self.element_type().or_else(|| self.value_type())
    }
}
