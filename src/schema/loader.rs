//! Schema loading from JSON documents
//!
//! The schema is owned by an external provider. This loader only turns a
//! provider's JSON document into a validated [`Schema`] snapshot; nothing is
//! cached between loads.

use std::fs;
use std::path::Path;

use tracing::debug;

use super::errors::{SchemaError, SchemaResult};
use super::types::Schema;

/// Reads schema snapshots from disk or from in-memory JSON.
pub struct SchemaLoader;

impl SchemaLoader {
    /// Loads and validates a schema file.
    pub fn load_file(path: &Path) -> SchemaResult<Schema> {
        let content = fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::parse(&path.display().to_string(), &content)
    }

    /// Parses and validates a schema document.
    ///
    /// `source_name` only labels error messages.
    pub fn parse(source_name: &str, content: &str) -> SchemaResult<Schema> {
        let schema: Schema = serde_json::from_str(content).map_err(|e| {
            SchemaError::malformed(source_name, format!("Invalid JSON: {}", e))
        })?;

        schema
            .validate_structure()
            .map_err(|reason| SchemaError::malformed(source_name, reason))?;

        debug!(source = source_name, fields = schema.len(), "schema loaded");
        Ok(schema)
    }
}
