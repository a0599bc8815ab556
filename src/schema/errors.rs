//! Schema error types
//!
//! Error codes:
//! - FILTERQ_SCHEMA_MALFORMED
//! - FILTERQ_SCHEMA_IO

use std::io;

use thiserror::Error;

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised while loading a schema from an external source
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Schema document is not valid JSON or violates structural rules
    #[error("Malformed schema '{source_name}': {reason}")]
    Malformed { source_name: String, reason: String },

    /// Schema file could not be read
    #[error("Failed to read schema '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl SchemaError {
    /// Create a malformed schema error
    pub fn malformed(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        SchemaError::Malformed {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaError::Malformed { .. } => "FILTERQ_SCHEMA_MALFORMED",
            SchemaError::Io { .. } => "FILTERQ_SCHEMA_IO",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            SchemaError::malformed("x", "y").code(),
            "FILTERQ_SCHEMA_MALFORMED"
        );
        let io_err = SchemaError::Io {
            path: "schema.json".into(),
            source: io::Error::new(io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(io_err.code(), "FILTERQ_SCHEMA_IO");
    }

    #[test]
    fn test_error_display() {
        let err = SchemaError::malformed("schema.json", "Invalid JSON");
        let display = err.to_string();
        assert!(display.contains("schema.json"));
        assert!(display.contains("Invalid JSON"));
    }
}
