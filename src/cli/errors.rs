//! CLI-specific error types

use std::fmt;
use std::io;

use crate::compiler::Diagnostics;
use crate::schema::SchemaError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdin/stdout)
    IoError,
    /// Schema could not be loaded
    SchemaError,
    /// Input on stdin is not what the command expects
    InvalidInput,
    /// Query text has invalid rows
    CompileFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "FILTERQ_CLI_CONFIG_ERROR",
            Self::IoError => "FILTERQ_CLI_IO_ERROR",
            Self::SchemaError => "FILTERQ_CLI_SCHEMA_ERROR",
            Self::InvalidInput => "FILTERQ_CLI_INVALID_INPUT",
            Self::CompileFailed => "FILTERQ_COMPILE_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
    diagnostics: Option<Diagnostics>,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            diagnostics: None,
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Invalid stdin input
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InvalidInput, msg)
    }

    /// Compile failed with row diagnostics
    pub fn compile_failed(diagnostics: Diagnostics) -> Self {
        Self {
            code: CliErrorCode::CompileFailed,
            message: diagnostics.to_string(),
            diagnostics: Some(diagnostics),
        }
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Row diagnostics, for compile failures
    pub fn diagnostics(&self) -> Option<&Diagnostics> {
        self.diagnostics.as_ref()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<SchemaError> for CliError {
    fn from(e: SchemaError) -> Self {
        Self::new(CliErrorCode::SchemaError, e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code() {
        let err = CliError::config_error("missing schema_path");
        assert_eq!(
            err.to_string(),
            "FILTERQ_CLI_CONFIG_ERROR: missing schema_path"
        );
    }

    #[test]
    fn test_schema_error_conversion() {
        let err = CliError::from(SchemaError::malformed("s.json", "Invalid JSON"));
        assert_eq!(err.code(), &CliErrorCode::SchemaError);
        assert!(err.message().contains("s.json"));
    }

    #[test]
    fn test_compile_failed_keeps_diagnostics() {
        let diagnostics = crate::compiler::compile_default("name", &crate::schema::Schema::new())
            .unwrap_err();
        let err = CliError::compile_failed(diagnostics);
        assert_eq!(err.code_str(), "FILTERQ_COMPILE_FAILED");
        assert_eq!(err.diagnostics().map(|d| d.len()), Some(1));
    }
}
