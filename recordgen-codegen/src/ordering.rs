//! Definition ordering.
//!
//! Records must be defined before any record that references them. The
//! order is produced with Kahn's algorithm over direct references; among
//! records that are ready at the same time the one with the smallest
//! `(name, namespace, id)` key goes first, so unrelated records come out
//! sorted by name and the result never depends on hash or insertion order.

use crate::error::CodegenError;
use crate::graph::{Node, ReferenceGraph};
use recordgen_schema::{SchemaId, SchemaStore};
use std::cmp::Reverse;
use std::collections::{BTreeSet, BinaryHeap, HashMap, HashSet};

/// Collects the roots together with every record they reach.
///
/// # Errors
/// Returns `CodegenError::InvalidInput` if a root is not part of `graph`.
pub fn collect_all_schemas(
    graph: &ReferenceGraph<'_>,
    roots: &[SchemaId],
) -> Result<BTreeSet<SchemaId>, CodegenError> {
    let mut all = BTreeSet::new();
    let mut seen_roots = HashSet::new();

    for &root in roots {
        if !seen_roots.insert(root) {
            tracing::warn!("Root {} listed more than once", root);
            continue;
        }
        all.insert(root);
        all.extend(graph.compute_reachable(Node::Schema(root), false)?);
    }

    Ok(all)
}

type SortKey<'s> = (&'s str, Option<&'s str>, SchemaId);

fn sort_key(store: &SchemaStore, id: SchemaId) -> Result<SortKey<'_>, CodegenError> {
    let schema = store.get(id).ok_or(CodegenError::InvalidInput { id })?;
    Ok((schema.name.as_str(), schema.namespace.as_deref(), id))
}

/// Orders `schemas` so every record follows the records it references.
///
/// References to records outside `schemas` are ignored.
///
/// # Errors
/// Returns `CodegenError::InvalidInput` if a record is not part of `graph`,
/// and `CodegenError::CyclicReference` if the records cannot be ordered.
pub fn topological_sort(
    graph: &ReferenceGraph<'_>,
    schemas: &BTreeSet<SchemaId>,
) -> Result<Vec<SchemaId>, CodegenError> {
    let store = graph.store();
    let mut pending: HashMap<SchemaId, usize> = HashMap::with_capacity(schemas.len());
    let mut dependents: HashMap<SchemaId, Vec<SchemaId>> = HashMap::new();

    for &id in schemas {
        let deps = graph
            .direct_dependencies(id)
            .ok_or(CodegenError::InvalidInput { id })?;
        let mut count = 0;
        for dep in deps.iter().filter(|dep| schemas.contains(*dep)) {
            dependents.entry(*dep).or_default().push(id);
            count += 1;
        }
        pending.insert(id, count);
    }

    let mut ready = BinaryHeap::new();
    for (&id, &count) in &pending {
        if count == 0 {
            ready.push(Reverse(sort_key(store, id)?));
        }
    }

    let mut order = Vec::with_capacity(schemas.len());
    while let Some(Reverse((_, _, id))) = ready.pop() {
        order.push(id);
        for &dependent in dependents.get(&id).map(Vec::as_slice).unwrap_or_default() {
            if let Some(count) = pending.get_mut(&dependent) {
                *count -= 1;
                if *count == 0 {
                    ready.push(Reverse(sort_key(store, dependent)?));
                }
            }
        }
    }

    if order.len() != schemas.len() {
        let placed: HashSet<SchemaId> = order.iter().copied().collect();
        let stuck: Vec<String> = schemas
            .iter()
            .filter(|id| !placed.contains(*id))
            .map(|id| store.get(*id).map_or_else(|| id.to_string(), |s| s.name.clone()))
            .collect();
        return Err(CodegenError::CyclicReference {
            path: stuck.join(", "),
        });
    }

    tracing::debug!("Ordered {} records", order.len());
    Ok(order)
}
