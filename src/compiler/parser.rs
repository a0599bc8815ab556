//! # Query Parser
//!
//! Compiles multi-line query text into a validated filter list.
//!
//! Each non-empty line is one row, `<field> <constraint> [value...]`, with
//! tokens separated by single spaces. Rows are validated in text order and
//! each row sees the fields consumed by the rows accepted before it. Errors
//! never stop the pass: every rejected row gets a diagnostic, and any
//! diagnostic fails the whole compile.
//!
//! A row with a single token is malformed. `"name "` has two tokens, the
//! second one empty, and is rejected as an unsupported constraint.

use std::collections::HashSet;

use tracing::debug;

use super::errors::{CompileResult, Diagnostics, ErrorKind, RowError};
use crate::catalog;
use crate::codec;
use crate::filter::{Blacklist, ConstraintKind, Filter};
use crate::schema::Schema;

/// A non-empty line of query text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Row<'a> {
    /// Physical line number, from 1
    pub line: usize,
    pub text: &'a str,
}

/// Splits text into non-empty rows, keeping their line numbers
pub(crate) fn rows(text: &str) -> impl Iterator<Item = Row<'_>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.is_empty())
        .map(|(i, line)| Row {
            line: i + 1,
            text: line,
        })
}

/// Compiles query text against `schema`.
///
/// `filters_so_far` are filters already applied outside this text; their
/// fields count as consumed. Returns the accepted filters in text order, or
/// every row diagnostic if any row was rejected.
pub fn compile(
    text: &str,
    schema: &Schema,
    filters_so_far: &[Filter],
    blacklist: &Blacklist,
) -> CompileResult {
    let mut accepted: Vec<(usize, Filter)> = Vec::new();
    let mut errors: Vec<RowError> = Vec::new();

    for (index, row) in rows(text).enumerate() {
        match compile_row(row.text, schema, filters_so_far, &accepted, blacklist) {
            Ok(filter) => accepted.push((index, filter)),
            Err(kind) => {
                debug!(
                    row = index,
                    line = row.line,
                    code = kind.code(),
                    field = kind.field().unwrap_or_default(),
                    "rejected query row"
                );
                errors.push(RowError {
                    row: index,
                    line: row.line,
                    text: row.text.to_string(),
                    kind,
                });
            }
        }
    }

    debug!(
        accepted = accepted.len(),
        rejected = errors.len(),
        "query compiled"
    );

    if !errors.is_empty() {
        return Err(Diagnostics::new(errors));
    }

    Ok(accepted.into_iter().map(|(_, filter)| filter).collect())
}

/// Validates one row. `accepted` holds the rows accepted so far in this
/// pass, with their row indices.
fn compile_row(
    text: &str,
    schema: &Schema,
    filters_so_far: &[Filter],
    accepted: &[(usize, Filter)],
    blacklist: &Blacklist,
) -> Result<Filter, ErrorKind> {
    let mut tokens = text.splitn(3, ' ');
    let field = tokens.next().unwrap_or_default();
    let constraint = tokens.next().ok_or(ErrorKind::MalformedRow)?;
    let literal = tokens.next().unwrap_or_default();

    let field_type = schema.get(field).ok_or_else(|| ErrorKind::UnknownField {
        field: field.to_string(),
    })?;

    let compare_to =
        codec::decode(field_type, literal).map_err(|cause| ErrorKind::InvalidCompareTo {
            field: field.to_string(),
            cause,
        })?;

    if let Some((first_row, _)) = accepted.iter().find(|(_, f)| f.field == field) {
        return Err(ErrorKind::DuplicateField {
            field: field.to_string(),
            first_row: *first_row,
        });
    }

    let consumed: HashSet<&str> = filters_so_far
        .iter()
        .chain(accepted.iter().map(|(_, f)| f))
        .map(|f| f.field.as_str())
        .collect();
    let available = catalog::available_excluding(schema, &consumed, blacklist);

    let kind = constraint
        .parse::<ConstraintKind>()
        .ok()
        .filter(|kind| available.allows(field, *kind))
        .ok_or_else(|| ErrorKind::UnsupportedConstraint {
            field: field.to_string(),
            constraint: constraint.to_string(),
            available: available.get(field).map(<[_]>::to_vec).unwrap_or_default(),
        })?;

    Ok(Filter::new(field, kind, compare_to))
}

/// Compiles query text with no prior filters and the built-in blacklist.
pub fn compile_default(text: &str, schema: &Schema) -> CompileResult {
    compile(text, schema, &[], &Blacklist::builtin())
}
