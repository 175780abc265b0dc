//! # recordgen Bench
//!
//! Record graph fixtures for benchmarking ordering and generation.

use recordgen_schema::{Field, RecordSchema, SchemaId, SchemaStore};

/// Builds `len` records where each one references the previous.
///
/// Returns the store and the last record as the only root.
#[must_use]
pub fn chain(len: usize) -> (SchemaStore, Vec<SchemaId>) {
    let mut store = SchemaStore::new();
    let mut previous: Option<SchemaId> = None;

    for i in 0..len {
        let mut schema = RecordSchema::new(format!("Link{}", i))
            .with_field("value", Field::integer())
            .with_field("label", Field::text().with_nullable(false));
        if let Some(prev) = previous {
            schema.add_field("prev", Field::sub_record(prev));
        }
        previous = Some(store.add(schema));
    }

    (store, previous.into_iter().collect())
}

/// Builds one root referencing `width` independent leaf records.
#[must_use]
pub fn fan_out(width: usize) -> (SchemaStore, Vec<SchemaId>) {
    let mut store = SchemaStore::new();
    let mut root = RecordSchema::new("Hub");

    for i in 0..width {
        let leaf = store.add(
            RecordSchema::new(format!("Leaf{}", i))
                .with_field("id", Field::integer().with_nullable(false))
                .with_field("tags", Field::list(Field::text())),
        );
        root.add_field(format!("leaf{}", i), Field::sub_record(leaf));
    }

    let root = store.add(root);
    (store, vec![root])
}

/// Builds `depth` layers of `width` records, each referencing every record
/// in the layer below. All records of the top layer are roots.
#[must_use]
pub fn lattice(width: usize, depth: usize) -> (SchemaStore, Vec<SchemaId>) {
    let mut store = SchemaStore::new();
    let mut below: Vec<SchemaId> = Vec::new();

    for layer in 0..depth {
        let mut current = Vec::with_capacity(width);
        for i in 0..width {
            let mut schema = RecordSchema::new(format!("Node{}x{}", layer, i))
                .with_field("weight", Field::float());
            for (j, target) in below.iter().enumerate() {
                schema.add_field(format!("edge{}", j), Field::map(Field::sub_record(*target)));
            }
            current.push(store.add(schema));
        }
        below = current;
    }

    (store, below)
}
