//! # Filter Catalog
//!
//! Computes which (field, constraint) pairs are still selectable given a
//! schema, the filters already in place and a blacklist.
//!
//! A field is consumed by the first filter that uses it and disappears from
//! the catalog afterwards. The result is recomputed on every call and never
//! cached, because the filters change after every parse or edit.

use std::collections::HashSet;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::filter::{Blacklist, ConstraintKind, Filter};
use crate::schema::Schema;

/// Ordered mapping from field name to the constraints still selectable for it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailableFilters {
    entries: Vec<(String, Vec<ConstraintKind>)>,
}

impl AvailableFilters {
    /// Constraints available for `field`, if the field is available at all
    pub fn get(&self, field: &str) -> Option<&[ConstraintKind]> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, kinds)| kinds.as_slice())
    }

    /// Check if `constraint` is selectable for `field`
    pub fn allows(&self, field: &str, constraint: ConstraintKind) -> bool {
        self.get(field)
            .is_some_and(|kinds| kinds.contains(&constraint))
    }

    /// Available field names in schema order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Iterate over (field, constraints) pairs in schema order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ConstraintKind])> {
        self.entries
            .iter()
            .map(|(name, kinds)| (name.as_str(), kinds.as_slice()))
    }

    /// The first field and its highest-priority constraint
    pub fn first(&self) -> Option<(&str, ConstraintKind)> {
        self.entries
            .first()
            .and_then(|(name, kinds)| kinds.first().map(|kind| (name.as_str(), *kind)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for AvailableFilters {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, kinds) in &self.entries {
            map.serialize_entry(name, kinds)?;
        }
        map.end()
    }
}

/// Computes the catalog for `schema` given the filters already in place.
///
/// Passing no filters makes every non-blacklisted constraint of every field
/// available.
pub fn available_filters(
    schema: &Schema,
    filters_so_far: &[Filter],
    blacklist: &Blacklist,
) -> AvailableFilters {
    let consumed: HashSet<&str> = filters_so_far.iter().map(|f| f.field.as_str()).collect();
    available_excluding(schema, &consumed, blacklist)
}

/// Computes the catalog with an explicit set of consumed field names.
pub(crate) fn available_excluding(
    schema: &Schema,
    consumed: &HashSet<&str>,
    blacklist: &Blacklist,
) -> AvailableFilters {
    let entries = schema
        .iter()
        .filter(|(name, _)| !consumed.contains(name))
        .filter_map(|(name, field_type)| {
            let kinds: Vec<ConstraintKind> = ConstraintKind::for_kind(field_type.kind)
                .iter()
                .copied()
                .filter(|kind| !blacklist.contains(*kind))
                .collect();
            (!kinds.is_empty()).then(|| (name.to_string(), kinds))
        })
        .collect();

    AvailableFilters { entries }
}

/// The (field, constraint) pair a new, empty filter row starts with.
///
/// `None` when nothing is left to filter on.
pub fn default_filter(
    schema: &Schema,
    filters_so_far: &[Filter],
    blacklist: &Blacklist,
) -> Option<(String, ConstraintKind)> {
    available_filters(schema, filters_so_far, blacklist)
        .first()
        .map(|(field, kind)| (field.to_string(), kind))
}
