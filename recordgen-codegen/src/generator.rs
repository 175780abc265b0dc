//! Main code generator.

use crate::config::GeneratorConfig;
use crate::error::CodegenError;
use crate::graph::ReferenceGraph;
use crate::ordering::{collect_all_schemas, topological_sort};
use crate::python::{HEADER, RecordGenerator};
use recordgen_schema::{SchemaId, SchemaStore};

/// Source generator over the records of a store.
pub struct Generator<'a> {
    store: &'a SchemaStore,
    config: GeneratorConfig,
}

impl<'a> Generator<'a> {
    /// Creates a generator with the default configuration.
    #[must_use]
    pub fn new(store: &'a SchemaStore) -> Self {
        Self::with_config(store, GeneratorConfig::default())
    }

    /// Creates a generator with the given configuration.
    #[must_use]
    pub fn with_config(store: &'a SchemaStore, config: GeneratorConfig) -> Self {
        Self { store, config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Returns every record reachable from `roots`, dependencies first.
    ///
    /// # Errors
    /// Returns `CodegenError` if a root is unknown or the records form a
    /// cycle.
    pub fn ordered_schemas(&self, roots: &[SchemaId]) -> Result<Vec<SchemaId>, CodegenError> {
        let graph = ReferenceGraph::build(self.store, roots)?;
        let all = collect_all_schemas(&graph, roots)?;
        topological_sort(&graph, &all)
    }

    /// Renders the class definition of a single record.
    ///
    /// # Errors
    /// Returns `CodegenError` if the record is unknown or a field cannot be
    /// expressed.
    pub fn render_schema(&self, id: SchemaId) -> Result<String, CodegenError> {
        self.config.validate()?;
        RecordGenerator::new(self.store, &self.config.indent).generate(id)
    }

    /// Renders the module defining every record reachable from `roots`.
    ///
    /// The output is the import header and a blank line, followed by one
    /// class per record in dependency order, separated by blank lines.
    ///
    /// # Errors
    /// Returns `CodegenError` if the configuration is invalid, a root is
    /// unknown, the records form a cycle, or a field cannot be expressed.
    /// Nothing is returned on failure.
    pub fn render(&self, roots: &[SchemaId]) -> Result<String, CodegenError> {
        self.config.validate()?;

        let order = self.ordered_schemas(roots)?;
        let records = RecordGenerator::new(self.store, &self.config.indent);
        let blocks = order
            .iter()
            .map(|&id| records.generate(id))
            .collect::<Result<Vec<_>, _>>()?;

        let mut output = String::new();
        if self.config.header {
            output.push_str(HEADER);
            output.push('\n');
        }
        output.push_str(&blocks.join("\n"));

        tracing::debug!(
            "Rendered {} records from {} roots ({} bytes)",
            blocks.len(),
            roots.len(),
            output.len()
        );
        Ok(output)
    }
}
