//! Codec error types

use thiserror::Error;

use crate::schema::FieldKind;

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;

/// A literal the field's declared type cannot represent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Literal does not parse as the field's kind
    #[error("'{literal}' is not a valid {expected} literal")]
    UnsupportedLiteral { literal: String, expected: FieldKind },

    /// Pointer or Relation field declared without a target class
    #[error("{kind} field has no targetClass")]
    MissingTargetClass { kind: FieldKind },
}

impl CodecError {
    pub(crate) fn unsupported(literal: &str, expected: FieldKind) -> Self {
        CodecError::UnsupportedLiteral {
            literal: literal.to_string(),
            expected,
        }
    }
}
