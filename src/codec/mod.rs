//! # Type Codec
//!
//! Converts a single comparison value between the literal tail of a query
//! line and its tagged [`CompareTo`] form.
//!
//! Decoding rules:
//! - `true` / `false` (case-sensitive) are booleans for every field kind
//! - Date literals become UTC instants
//! - Pointer and Relation literals are object ids of the schema's target class
//! - Number literals must be finite numbers
//! - Boolean fields accept nothing but `true` / `false`
//! - everything else passes through as text
//! - no literal may contain a line break, since one filter is one line
//!
//! Codec failures are returned, never raised; the parser turns them into
//! row diagnostics.

mod date;
mod errors;

pub use errors::{CodecError, CodecResult};

use crate::filter::CompareTo;
use crate::schema::{FieldKind, FieldType};

/// Decode the literal tail of a query line for a field of `field_type`
pub fn decode(field_type: &FieldType, literal: &str) -> CodecResult<CompareTo> {
    if literal.contains(['\n', '\r']) {
        return Err(CodecError::unsupported(literal, field_type.kind));
    }

    match literal {
        "true" => return Ok(CompareTo::Bool(true)),
        "false" => return Ok(CompareTo::Bool(false)),
        _ => {}
    }

    let kind = field_type.kind;
    match kind {
        FieldKind::Date => date::parse_date(literal)
            .map(CompareTo::Date)
            .ok_or_else(|| CodecError::unsupported(literal, kind)),
        FieldKind::Pointer | FieldKind::Relation => {
            let target_class = field_type
                .target_class
                .as_deref()
                .ok_or(CodecError::MissingTargetClass { kind })?;
            if literal.is_empty() || literal.chars().any(char::is_whitespace) {
                return Err(CodecError::unsupported(literal, kind));
            }
            Ok(CompareTo::pointer(target_class, literal))
        }
        FieldKind::Number => literal
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(CompareTo::Number)
            .ok_or_else(|| CodecError::unsupported(literal, kind)),
        FieldKind::Boolean => Err(CodecError::unsupported(literal, kind)),
        FieldKind::String
        | FieldKind::Array
        | FieldKind::Object
        | FieldKind::GeoPoint
        | FieldKind::File => Ok(CompareTo::String(literal.to_string())),
    }
}

/// Encode a comparison value as the literal tail of a query line
pub fn encode(value: &CompareTo) -> String {
    match value {
        CompareTo::Bool(b) => b.to_string(),
        CompareTo::Number(n) => n.to_string(),
        CompareTo::String(s) => s.clone(),
        CompareTo::Date(date) => CompareTo::iso(date),
        CompareTo::Pointer { object_id, .. } => object_id.clone(),
    }
}
