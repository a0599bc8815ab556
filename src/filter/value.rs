//! # Comparison Values
//!
//! Tagged value a filter compares a field against. Dates and pointers carry
//! their own tag so that no caller needs to inspect the runtime shape of a
//! value to know what it holds.
//!
//! The JSON form follows the backend REST shape:
//! - primitives as-is
//! - `{"__type": "Date", "iso": "..."}`
//! - `{"__type": "Pointer", "className": "...", "objectId": "..."}`

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Value on the right-hand side of a constraint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub enum CompareTo {
    /// Boolean literal, accepted for every field kind
    Bool(bool),
    /// Finite number
    Number(f64),
    /// Free text
    String(String),
    /// Calendar instant
    Date(DateTime<Utc>),
    /// Reference to an object of the target class
    Pointer {
        target_class: String,
        object_id: String,
    },
}

impl CompareTo {
    /// Create a pointer value
    pub fn pointer(target_class: impl Into<String>, object_id: impl Into<String>) -> Self {
        CompareTo::Pointer {
            target_class: target_class.into(),
            object_id: object_id.into(),
        }
    }

    /// Render a date the way the backend expects it
    pub fn iso(date: &DateTime<Utc>) -> String {
        date.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

impl From<CompareTo> for Value {
    fn from(value: CompareTo) -> Self {
        match value {
            CompareTo::Bool(b) => Value::Bool(b),
            CompareTo::Number(n) => number_to_json(n),
            CompareTo::String(s) => Value::String(s),
            CompareTo::Date(date) => json!({
                "__type": "Date",
                "iso": CompareTo::iso(&date),
            }),
            CompareTo::Pointer {
                target_class,
                object_id,
            } => json!({
                "__type": "Pointer",
                "className": target_class,
                "objectId": object_id,
            }),
        }
    }
}

impl TryFrom<Value> for CompareTo {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bool(b) => Ok(CompareTo::Bool(b)),
            Value::Number(n) => n
                .as_f64()
                .map(CompareTo::Number)
                .ok_or_else(|| format!("Number {} is out of range", n)),
            Value::String(s) => Ok(CompareTo::String(s)),
            Value::Object(obj) => match obj.get("__type").and_then(Value::as_str) {
                Some("Date") => {
                    let iso = obj
                        .get("iso")
                        .and_then(Value::as_str)
                        .ok_or("Date value is missing 'iso'")?;
                    DateTime::parse_from_rfc3339(iso)
                        .map(|date| {
                            CompareTo::Date(date.with_timezone(&Utc).trunc_subsecs(3))
                        })
                        .map_err(|e| format!("Invalid iso date '{}': {}", iso, e))
                }
                Some("Pointer") => {
                    let class_name = obj.get("className").and_then(Value::as_str);
                    let object_id = obj.get("objectId").and_then(Value::as_str);
                    match (class_name, object_id) {
                        (Some(class_name), Some(object_id)) => {
                            Ok(CompareTo::pointer(class_name, object_id))
                        }
                        _ => Err("Pointer value needs 'className' and 'objectId'".to_string()),
                    }
                }
                Some(other) => Err(format!("Unsupported __type '{}'", other)),
                None => Err("Object values must carry a __type tag".to_string()),
            },
            Value::Null | Value::Array(_) => {
                Err("compareTo must be a boolean, number, string, Date or Pointer".to_string())
            }
        }
    }
}

/// Whole numbers serialize without a fractional part
fn number_to_json(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
        Value::from(n as i64)
    } else {
        serde_json::Number::from_f64(n)
            .map(Value::Number)
            .unwrap_or(Value::Null)
    }
}
