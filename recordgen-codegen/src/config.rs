//! Generator configuration.

use crate::error::CodegenError;
use serde::{Deserialize, Serialize};

/// Default indentation unit: four spaces.
pub const DEFAULT_INDENT: &str = "    ";

/// Configuration for source generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Whitespace used per nesting level.
    pub indent: String,
    /// Whether to emit the runtime import header.
    pub header: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT.to_string(),
            header: true,
        }
    }
}

impl GeneratorConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the indentation unit.
    #[must_use]
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Sets the indentation unit to `width` spaces.
    #[must_use]
    pub fn with_indent_width(self, width: usize) -> Self {
        self.with_indent(" ".repeat(width))
    }

    /// Indents with a single tab.
    #[must_use]
    pub fn with_tabs(self) -> Self {
        self.with_indent("\t")
    }

    /// Enables or disables the import header.
    #[must_use]
    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    /// Checks that the configuration produces well-formed source.
    ///
    /// # Errors
    /// Returns `CodegenError::InvalidConfig` if the indentation unit is
    /// empty or contains non-blank characters.
    pub fn validate(&self) -> Result<(), CodegenError> {
        if self.indent.is_empty() {
            return Err(CodegenError::invalid_config("indent must not be empty"));
        }
        if !self.indent.chars().all(|c| c == ' ' || c == '\t') {
            return Err(CodegenError::invalid_config(format!(
                "indent must only contain spaces or tabs, got {:?}",
                self.indent
            )));
        }
        Ok(())
    }
}
