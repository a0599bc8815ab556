//! Schema type definitions
//!
//! Supported field kinds:
//! - String, Number, Boolean, Date
//! - Pointer, Relation (both carry a target class)
//! - Array, Object, GeoPoint, File
//!
//! Field order is significant. The catalog and autocomplete list fields in
//! the order they were declared, so the schema keeps an ordered field list
//! rather than a hash map.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Declared kind of a schema field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    /// UTF-8 string
    String,
    /// 64-bit floating point number
    Number,
    /// Boolean
    Boolean,
    /// Calendar instant
    Date,
    /// Reference to a single object of the target class
    Pointer,
    /// Many-to-many reference to objects of the target class
    Relation,
    /// Heterogeneous array
    Array,
    /// Nested object
    Object,
    /// Latitude/longitude pair
    GeoPoint,
    /// Stored file reference
    File,
}

impl FieldKind {
    /// Every field kind, in declaration order
    pub const ALL: [FieldKind; 10] = [
        FieldKind::String,
        FieldKind::Number,
        FieldKind::Boolean,
        FieldKind::Date,
        FieldKind::Pointer,
        FieldKind::Relation,
        FieldKind::Array,
        FieldKind::Object,
        FieldKind::GeoPoint,
        FieldKind::File,
    ];

    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::String => "String",
            FieldKind::Number => "Number",
            FieldKind::Boolean => "Boolean",
            FieldKind::Date => "Date",
            FieldKind::Pointer => "Pointer",
            FieldKind::Relation => "Relation",
            FieldKind::Array => "Array",
            FieldKind::Object => "Object",
            FieldKind::GeoPoint => "GeoPoint",
            FieldKind::File => "File",
        }
    }

    /// Returns true for kinds that reference another class
    pub fn is_relational(&self) -> bool {
        matches!(self, FieldKind::Pointer | FieldKind::Relation)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Declared type of a single field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldType {
    /// Field kind
    #[serde(rename = "type")]
    pub kind: FieldKind,
    /// Target class, only for Pointer and Relation
    #[serde(
        rename = "targetClass",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub target_class: Option<String>,
}

impl FieldType {
    /// Create a field type of a non-relational kind
    pub fn of(kind: FieldKind) -> Self {
        Self {
            kind,
            target_class: None,
        }
    }

    /// Create a String field type
    pub fn string() -> Self {
        Self::of(FieldKind::String)
    }

    /// Create a Number field type
    pub fn number() -> Self {
        Self::of(FieldKind::Number)
    }

    /// Create a Boolean field type
    pub fn boolean() -> Self {
        Self::of(FieldKind::Boolean)
    }

    /// Create a Date field type
    pub fn date() -> Self {
        Self::of(FieldKind::Date)
    }

    /// Create a Pointer field type targeting `target_class`
    pub fn pointer(target_class: impl Into<String>) -> Self {
        Self {
            kind: FieldKind::Pointer,
            target_class: Some(target_class.into()),
        }
    }

    /// Create a Relation field type targeting `target_class`
    pub fn relation(target_class: impl Into<String>) -> Self {
        Self {
            kind: FieldKind::Relation,
            target_class: Some(target_class.into()),
        }
    }
}

/// Ordered mapping from field name to declared type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Field definitions in declaration order
    #[serde(with = "ordered_fields")]
    fields: Vec<(String, FieldType)>,
}

impl Schema {
    /// Create an empty schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field, replacing the type of an existing field with the same name
    /// without moving it.
    pub fn with_field(mut self, name: impl Into<String>, field_type: FieldType) -> Self {
        let name = name.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = field_type,
            None => self.fields.push((name, field_type)),
        }
        self
    }

    /// Gets the declared type of a field
    pub fn get(&self, field: &str) -> Option<&FieldType> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, field_type)| field_type)
    }

    /// Checks if a field is declared
    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Iterates over fields in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldType)> {
        self.fields
            .iter()
            .map(|(name, field_type)| (name.as_str(), field_type))
    }

    /// Iterates over field names in declaration order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Validates the schema structure itself.
    ///
    /// Field names must be non-empty and free of whitespace, since the
    /// query language separates tokens with spaces. Pointer and Relation
    /// fields must name a target class; other kinds must not.
    pub fn validate_structure(&self) -> Result<(), String> {
        for (name, field_type) in &self.fields {
            if name.is_empty() {
                return Err("Field names must not be empty".into());
            }
            if name.chars().any(char::is_whitespace) {
                return Err(format!("Field name '{}' contains whitespace", name));
            }

            match (&field_type.target_class, field_type.kind.is_relational()) {
                (None, true) => {
                    return Err(format!(
                        "{} field '{}' must declare a targetClass",
                        field_type.kind, name
                    ));
                }
                (Some(target), true) if target.is_empty() => {
                    return Err(format!("Field '{}' has an empty targetClass", name));
                }
                (Some(_), false) => {
                    return Err(format!(
                        "{} field '{}' cannot declare a targetClass",
                        field_type.kind, name
                    ));
                }
                _ => {}
            }
        }

        Ok(())
    }
}

/// Serializes the field list as a JSON object while keeping document order
mod ordered_fields {
    use std::fmt;

    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};

    use super::FieldType;

    pub fn serialize<S>(fields: &[(String, FieldType)], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(fields.len()))?;
        for (name, field_type) in fields {
            map.serialize_entry(name, field_type)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<(String, FieldType)>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(FieldsVisitor)
    }

    struct FieldsVisitor;

    impl<'de> Visitor<'de> for FieldsVisitor {
        type Value = Vec<(String, FieldType)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a map of field name to field type")
        }

        fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut fields: Vec<(String, FieldType)> =
                Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((name, field_type)) = access.next_entry::<String, FieldType>()? {
                if fields.iter().any(|(existing, _)| *existing == name) {
                    return Err(serde::de::Error::custom(format!(
                        "duplicate field '{}'",
                        name
                    )));
                }
                fields.push((name, field_type));
            }
            Ok(fields)
        }
    }
}
