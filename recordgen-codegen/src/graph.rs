//! Record reference graph.
//!
//! Nodes are records; a record has an edge to every record reachable from
//! one of its fields, looking through list elements and map values. The
//! graph is built once per generation run and memoizes, for every record
//! it visits, both its direct references and its full reachable set, so
//! reachability queries are lookups rather than re-traversals.

use crate::error::CodegenError;
use recordgen_schema::{Field, FieldKind, SchemaError, SchemaId, SchemaStore};
use std::collections::{BTreeSet, HashMap};

/// Starting point of a reachability query.
#[derive(Debug, Clone, Copy)]
pub enum Node<'f> {
    /// A record.
    Schema(SchemaId),
    /// A field, possibly nested inside a container.
    Field(&'f Field),
}

/// Memoized reference graph over the records reachable from a set of roots.
#[derive(Debug, Clone)]
pub struct ReferenceGraph<'a> {
    store: &'a SchemaStore,
    /// Records referenced directly by each record's fields.
    direct: HashMap<SchemaId, BTreeSet<SchemaId>>,
    /// Every record transitively reachable from each record.
    reachable: HashMap<SchemaId, BTreeSet<SchemaId>>,
}

impl<'a> ReferenceGraph<'a> {
    /// Builds the graph of everything reachable from `roots`.
    ///
    /// # Errors
    /// Returns `CodegenError::InvalidInput` if a root is not in `store`,
    /// `CodegenError::Schema` for a reference to a missing record, and
    /// `CodegenError::CyclicReference` if the records form a cycle.
    pub fn build(store: &'a SchemaStore, roots: &[SchemaId]) -> Result<Self, CodegenError> {
        let mut graph = Self {
            store,
            direct: HashMap::new(),
            reachable: HashMap::new(),
        };

        for &root in roots {
            if !store.contains(root) {
                return Err(CodegenError::InvalidInput { id: root });
            }
            graph.visit(root, &mut Vec::new())?;
        }

        tracing::debug!(
            "Built reference graph: {} roots, {} records",
            roots.len(),
            graph.reachable.len()
        );
        Ok(graph)
    }

    /// Builds the graph over every record in `store`.
    ///
    /// # Errors
    /// Same as [`ReferenceGraph::build`].
    pub fn build_all(store: &'a SchemaStore) -> Result<Self, CodegenError> {
        Self::build(store, &store.ids())
    }

    fn visit(&mut self, id: SchemaId, path: &mut Vec<SchemaId>) -> Result<(), CodegenError> {
        if self.reachable.contains_key(&id) {
            return Ok(());
        }
        if let Some(start) = path.iter().position(|p| *p == id) {
            let mut cycle = path[start..].to_vec();
            cycle.push(id);
            return Err(CodegenError::CyclicReference {
                path: self.describe_path(&cycle),
            });
        }

        let store = self.store;
        let schema = store.get(id).ok_or(CodegenError::InvalidInput { id })?;

        let mut direct = BTreeSet::new();
        for def in &schema.fields {
            let mut targets = BTreeSet::new();
            collect_targets(&def.field, &mut targets);
            if let Some(&target) = targets.iter().find(|t| !store.contains(**t)) {
                return Err(SchemaError::DanglingReference {
                    schema: schema.name.clone(),
                    field: def.name.clone(),
                    target,
                }
                .into());
            }
            direct.append(&mut targets);
        }

        path.push(id);
        let mut reachable = BTreeSet::new();
        for &target in &direct {
            self.visit(target, path)?;
            reachable.insert(target);
            if let Some(further) = self.reachable.get(&target) {
                reachable.extend(further.iter().copied());
            }
        }
        path.pop();

        tracing::trace!(
            "Record '{}' ({}) reaches {} records",
            schema.name,
            id,
            reachable.len()
        );
        self.direct.insert(id, direct);
        self.reachable.insert(id, reachable);
        Ok(())
    }

    fn describe_path(&self, path: &[SchemaId]) -> String {
        path.iter()
            .map(|id| {
                self.store
                    .get(*id)
                    .map_or_else(|| id.to_string(), |s| s.name.clone())
            })
            .collect::<Vec<_>>()
            .join(" -> ")
    }

    /// Returns the store the graph was built from.
    #[must_use]
    pub fn store(&self) -> &'a SchemaStore {
        self.store
    }

    /// Returns true if `id` was visited while building the graph.
    #[must_use]
    pub fn contains(&self, id: SchemaId) -> bool {
        self.reachable.contains_key(&id)
    }

    /// Returns the number of records in the graph.
    #[must_use]
    pub fn len(&self) -> usize {
        self.reachable.len()
    }

    /// Returns true if the graph holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reachable.is_empty()
    }

    /// Returns the records referenced directly by the fields of `id`.
    #[must_use]
    pub fn direct_dependencies(&self, id: SchemaId) -> Option<&BTreeSet<SchemaId>> {
        self.direct.get(&id)
    }

    /// Computes the set of records reachable from `start`.
    ///
    /// A sub-record target is always part of the result; `include_start`
    /// only decides whether a starting record is included itself.
    ///
    /// # Errors
    /// Returns `CodegenError::InvalidInput` if `start` is, or references, a
    /// record outside this graph.
    pub fn compute_reachable(
        &self,
        start: Node<'_>,
        include_start: bool,
    ) -> Result<BTreeSet<SchemaId>, CodegenError> {
        match start {
            Node::Schema(id) => {
                let mut result = self
                    .reachable
                    .get(&id)
                    .cloned()
                    .ok_or(CodegenError::InvalidInput { id })?;
                if include_start {
                    result.insert(id);
                }
                Ok(result)
            }
            Node::Field(field) => {
                let mut targets = BTreeSet::new();
                collect_targets(field, &mut targets);

                let mut result = BTreeSet::new();
                for target in targets {
                    let further = self
                        .reachable
                        .get(&target)
                        .ok_or(CodegenError::InvalidInput { id: target })?;
                    result.insert(target);
                    result.extend(further.iter().copied());
                }
                Ok(result)
            }
        }
    }

    /// Returns true if `to` is reachable from `from`.
    ///
    /// A record links to itself. Agrees with
    /// `compute_reachable(from, true).contains(&to)`.
    ///
    /// # Errors
    /// Returns `CodegenError::InvalidInput` if `from` is, or references, a
    /// record outside this graph.
    pub fn has_directed_link(&self, from: Node<'_>, to: SchemaId) -> Result<bool, CodegenError> {
        match from {
            Node::Schema(id) if id == to => {
                if self.contains(id) {
                    Ok(true)
                } else {
                    Err(CodegenError::InvalidInput { id })
                }
            }
            Node::Schema(id) => self
                .reachable
                .get(&id)
                .map(|reachable| reachable.contains(&to))
                .ok_or(CodegenError::InvalidInput { id }),
            Node::Field(_) => Ok(self.compute_reachable(from, true)?.contains(&to)),
        }
    }
}

/// Collects the records a field references without crossing into them.
fn collect_targets(field: &Field, out: &mut BTreeSet<SchemaId>) {
    match &field.kind {
        FieldKind::SubRecord(id) => {
            out.insert(*id);
        }
        FieldKind::List(inner) | FieldKind::Map(inner) => collect_targets(inner, out),
        FieldKind::Primitive(_) | FieldKind::Enum { .. } | FieldKind::Fixed { .. } => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recordgen_schema::RecordSchema;

    /// Address <- Person <- Team (through list and map), plus unrelated Tag.
    fn sample_store() -> (SchemaStore, [SchemaId; 4]) {
        let mut store = SchemaStore::new();
        let address = store.add(RecordSchema::new("Address").with_field("city", Field::text()));
        let person = store.add(
            RecordSchema::new("Person")
                .with_field("name", Field::text())
                .with_field("home", Field::sub_record(address)),
        );
        let team = store.add(
            RecordSchema::new("Team")
                .with_field("members", Field::list(Field::sub_record(person)))
                .with_field(
                    "by_role",
                    Field::map(Field::list(Field::sub_record(person))),
                ),
        );
        let tag = store.add(RecordSchema::new("Tag"));
        (store, [address, person, team, tag])
    }

    #[test]
    fn test_reachable_from_schema() {
        let (store, [address, person, team, _]) = sample_store();
        let graph = ReferenceGraph::build(&store, &[team]).expect("Failed to build");

        let reachable = graph
            .compute_reachable(Node::Schema(team), false)
            .expect("Failed to compute");
        assert_eq!(reachable, BTreeSet::from([address, person]));

        let with_start = graph
            .compute_reachable(Node::Schema(team), true)
            .expect("Failed to compute");
        assert_eq!(with_start, BTreeSet::from([address, person, team]));
    }

    #[test]
    fn test_reachable_from_field_always_includes_target() {
        let (store, [address, person, _, _]) = sample_store();
        let graph = ReferenceGraph::build(&store, &[person]).expect("Failed to build");

        let field = Field::map(Field::sub_record(person));
        let reachable = graph
            .compute_reachable(Node::Field(&field), false)
            .expect("Failed to compute");
        assert_eq!(reachable, BTreeSet::from([address, person]));

        let primitive = Field::list(Field::text());
        assert!(
            graph
                .compute_reachable(Node::Field(&primitive), true)
                .expect("Failed to compute")
                .is_empty()
        );
    }

    #[test]
    fn test_direct_dependencies_deduplicated() {
        let (store, [_, person, team, _]) = sample_store();
        let graph = ReferenceGraph::build(&store, &[team]).expect("Failed to build");
        assert_eq!(
            graph.direct_dependencies(team),
            Some(&BTreeSet::from([person]))
        );
    }

    #[test]
    fn test_has_directed_link() {
        let (store, [address, person, team, tag]) = sample_store();
        let graph = ReferenceGraph::build(&store, &[team, tag]).expect("Failed to build");

        assert!(graph.has_directed_link(Node::Schema(team), address).expect("query"));
        assert!(graph.has_directed_link(Node::Schema(person), address).expect("query"));
        assert!(!graph.has_directed_link(Node::Schema(address), person).expect("query"));
        assert!(!graph.has_directed_link(Node::Schema(tag), address).expect("query"));
        assert!(graph.has_directed_link(Node::Schema(tag), tag).expect("query"));
    }

    #[test]
    fn test_link_consistent_with_reachability() {
        let (store, ids) = sample_store();
        let graph = ReferenceGraph::build_all(&store).expect("Failed to build");

        for &a in &ids {
            let reachable = graph
                .compute_reachable(Node::Schema(a), true)
                .expect("Failed to compute");
            for &b in &ids {
                assert_eq!(
                    graph.has_directed_link(Node::Schema(a), b).expect("query"),
                    reachable.contains(&b)
                );
            }
        }
    }

    #[test]
    fn test_unknown_root() {
        let (store, _) = sample_store();
        let result = ReferenceGraph::build(&store, &[SchemaId::from_index(42)]);
        assert!(matches!(result, Err(CodegenError::InvalidInput { .. })));
    }

    #[test]
    fn test_query_outside_graph() {
        let (store, [address, _, _, tag]) = sample_store();
        let graph = ReferenceGraph::build(&store, &[address]).expect("Failed to build");
        assert!(!graph.contains(tag));
        assert!(matches!(
            graph.compute_reachable(Node::Schema(tag), false),
            Err(CodegenError::InvalidInput { .. })
        ));
        assert!(matches!(
            graph.has_directed_link(Node::Schema(tag), tag),
            Err(CodegenError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_dangling_reference() {
        let mut store = SchemaStore::new();
        let orphan = store.add(
            RecordSchema::new("Orphan")
                .with_field("lost", Field::sub_record(SchemaId::from_index(5))),
        );
        let result = ReferenceGraph::build(&store, &[orphan]);
        assert!(matches!(
            result,
            Err(CodegenError::Schema(SchemaError::DanglingReference { .. }))
        ));
    }

    #[test]
    fn test_self_cycle_rejected() {
        let mut store = SchemaStore::new();
        let node = store.add(RecordSchema::new("Node"));
        store
            .get_mut(node)
            .expect("Node missing")
            .add_field("next", Field::sub_record(node));

        match ReferenceGraph::build(&store, &[node]) {
            Err(CodegenError::CyclicReference { path }) => assert_eq!(path, "Node -> Node"),
            other => panic!("expected cyclic reference, got {:?}", other),
        }
    }

    #[test]
    fn test_indirect_cycle_rejected() {
        let mut store = SchemaStore::new();
        let a = store.add(RecordSchema::new("A"));
        let b = store.add(RecordSchema::new("B").with_field("a", Field::sub_record(a)));
        let c =
            store.add(RecordSchema::new("C").with_field("b", Field::list(Field::sub_record(b))));
        store
            .get_mut(a)
            .expect("A missing")
            .add_field("c", Field::map(Field::sub_record(c)));

        match ReferenceGraph::build(&store, &[c]) {
            Err(CodegenError::CyclicReference { path }) => assert_eq!(path, "C -> B -> A -> C"),
            other => panic!("expected cyclic reference, got {:?}", other),
        }
    }

    #[test]
    fn test_shared_dependency_visited_once() {
        let mut store = SchemaStore::new();
        let leaf = store.add(RecordSchema::new("Leaf"));
        let left = store.add(RecordSchema::new("Left").with_field("leaf", Field::sub_record(leaf)));
        let right =
            store.add(RecordSchema::new("Right").with_field("leaf", Field::sub_record(leaf)));
        let top = store.add(
            RecordSchema::new("Top")
                .with_field("left", Field::sub_record(left))
                .with_field("right", Field::sub_record(right)),
        );

        let graph = ReferenceGraph::build(&store, &[top]).expect("Failed to build");
        assert_eq!(graph.len(), 4);
        assert_eq!(
            graph
                .compute_reachable(Node::Schema(top), false)
                .expect("Failed to compute"),
            BTreeSet::from([leaf, left, right])
        );
    }
}
