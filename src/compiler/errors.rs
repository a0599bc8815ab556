//! Compiler diagnostics
//!
//! Error codes:
//! - FILTERQ_MALFORMED_ROW
//! - FILTERQ_UNKNOWN_FIELD
//! - FILTERQ_INVALID_COMPARE_TO
//! - FILTERQ_UNSUPPORTED_CONSTRAINT
//! - FILTERQ_DUPLICATE_FIELD
//!
//! Every diagnostic is scoped to one row of query text. A compile collects
//! all of them before failing.

use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::codec::CodecError;
use crate::filter::{ConstraintKind, FilterList};

/// Result type for a compile pass
pub type CompileResult = Result<FilterList, Diagnostics>;

/// Why a row was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Row has no constraint token
    MalformedRow,

    /// First token names no schema field
    UnknownField { field: String },

    /// Literal tail does not decode for the field's declared type
    InvalidCompareTo { field: String, cause: CodecError },

    /// Constraint is unknown, incompatible, blacklisted or exhausted
    UnsupportedConstraint {
        field: String,
        constraint: String,
        available: Vec<ConstraintKind>,
    },

    /// Field was already used by an earlier valid row
    DuplicateField { field: String, first_row: usize },
}

impl ErrorKind {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::MalformedRow => "FILTERQ_MALFORMED_ROW",
            ErrorKind::UnknownField { .. } => "FILTERQ_UNKNOWN_FIELD",
            ErrorKind::InvalidCompareTo { .. } => "FILTERQ_INVALID_COMPARE_TO",
            ErrorKind::UnsupportedConstraint { .. } => "FILTERQ_UNSUPPORTED_CONSTRAINT",
            ErrorKind::DuplicateField { .. } => "FILTERQ_DUPLICATE_FIELD",
        }
    }

    /// Returns the field the row named, if it got that far
    pub fn field(&self) -> Option<&str> {
        match self {
            ErrorKind::MalformedRow => None,
            ErrorKind::UnknownField { field }
            | ErrorKind::InvalidCompareTo { field, .. }
            | ErrorKind::UnsupportedConstraint { field, .. }
            | ErrorKind::DuplicateField { field, .. } => Some(field),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::MalformedRow => {
                write!(f, "Expected '<field> <constraint> [value]'; constraint is missing")
            }
            ErrorKind::UnknownField { field } => write!(f, "Unknown field '{}'", field),
            ErrorKind::InvalidCompareTo { field, cause } => {
                write!(f, "Invalid value for '{}': {}", field, cause)
            }
            ErrorKind::UnsupportedConstraint {
                field,
                constraint,
                available,
            } => {
                write!(f, "'{}' does not have constraint '{}'", field, constraint)?;
                if available.is_empty() {
                    write!(f, ", no constraints are available")
                } else {
                    let names: Vec<&str> = available.iter().map(|k| k.as_str()).collect();
                    write!(f, ", available constraints are {}", names.join(", "))
                }
            }
            ErrorKind::DuplicateField { field, first_row } => {
                write!(f, "Field '{}' is already filtered in row {}", field, first_row)
            }
        }
    }
}

/// A rejected row of query text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    /// Index among non-empty rows, from 0
    pub row: usize,
    /// Physical line number, from 1
    pub line: usize,
    /// Raw row text
    pub text: String,
    /// Rejection reason
    pub kind: ErrorKind,
}

impl RowError {
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] line {}: {}", self.kind.code(), self.line, self.kind)
    }
}

impl Serialize for RowError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("RowError", 6)?;
        state.serialize_field("row", &self.row)?;
        state.serialize_field("line", &self.line)?;
        state.serialize_field("text", &self.text)?;
        state.serialize_field("code", self.kind.code())?;
        state.serialize_field("field", &self.kind.field())?;
        state.serialize_field("message", &self.kind.to_string())?;
        state.end()
    }
}

/// Every rejected row of one compile pass, in row order
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("query has {} invalid row(s)", .errors.len())]
#[serde(transparent)]
pub struct Diagnostics {
    errors: Vec<RowError>,
}

impl Diagnostics {
    pub(crate) fn new(errors: Vec<RowError>) -> Self {
        Self { errors }
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RowError> {
        self.errors.iter()
    }

    pub fn as_slice(&self) -> &[RowError] {
        &self.errors
    }

    pub fn into_vec(self) -> Vec<RowError> {
        self.errors
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a RowError;
    type IntoIter = std::slice::Iter<'a, RowError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
