//! Arena store for record schemas.
//!
//! Records are addressed by [`SchemaId`] handles rather than by name or
//! structure: two records with identical contents are still distinct
//! entities if they were added separately.

use crate::error::SchemaError;
use crate::records::RecordSchema;
use std::collections::HashMap;
use std::fmt;

/// Opaque handle of a record inside a [`SchemaStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SchemaId(usize);

impl SchemaId {
    /// Creates a handle from a raw arena index.
    ///
    /// Handles are only meaningful for the store that produced them.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for SchemaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Registry owning every record schema.
#[derive(Debug, Clone, Default)]
pub struct SchemaStore {
    schemas: Vec<RecordSchema>,
    /// Name lookup map. First registration of a name wins.
    name_map: HashMap<String, SchemaId>,
}

impl SchemaStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a record and returns its handle.
    pub fn add(&mut self, schema: RecordSchema) -> SchemaId {
        let id = SchemaId(self.schemas.len());
        let full_name = schema.full_name();
        if full_name != schema.name {
            self.name_map.entry(schema.name.clone()).or_insert(id);
        }
        self.name_map.entry(full_name).or_insert(id);
        self.schemas.push(schema);
        id
    }

    /// Returns the record for `id`, if present.
    #[must_use]
    pub fn get(&self, id: SchemaId) -> Option<&RecordSchema> {
        self.schemas.get(id.0)
    }

    /// Returns a mutable reference to the record for `id`, if present.
    ///
    /// Renaming a record through this reference does not update name
    /// lookups.
    #[must_use]
    pub fn get_mut(&mut self, id: SchemaId) -> Option<&mut RecordSchema> {
        self.schemas.get_mut(id.0)
    }

    /// Returns the record for `id`.
    ///
    /// # Errors
    /// Returns `SchemaError::UnknownSchema` if `id` is not in this store.
    pub fn schema(&self, id: SchemaId) -> Result<&RecordSchema, SchemaError> {
        self.get(id).ok_or(SchemaError::UnknownSchema { id })
    }

    /// Returns true if `id` refers to a record in this store.
    #[must_use]
    pub fn contains(&self, id: SchemaId) -> bool {
        id.0 < self.schemas.len()
    }

    /// Looks up a record by full or bare name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<SchemaId> {
        self.name_map.get(name).copied()
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Returns true if the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Iterates over all records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (SchemaId, &RecordSchema)> + '_ {
        self.schemas
            .iter()
            .enumerate()
            .map(|(idx, schema)| (SchemaId(idx), schema))
    }

    /// Returns all handles in insertion order.
    #[must_use]
    pub fn ids(&self) -> Vec<SchemaId> {
        (0..self.schemas.len()).map(SchemaId).collect()
    }
}
