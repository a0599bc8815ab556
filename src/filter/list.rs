//! # Filters
//!
//! A filter is one field + constraint + comparison value triple. A filter
//! list is an ordered, immutable conjunction of filters: every edit returns
//! a new list and leaves the original untouched.

use serde::{Deserialize, Serialize};

use super::constraint::ConstraintKind;
use super::value::CompareTo;

/// A single constraint on a field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    /// Field to filter on
    pub field: String,

    /// Comparison operator
    pub constraint: ConstraintKind,

    /// Value to compare against
    #[serde(rename = "compareTo")]
    pub compare_to: CompareTo,
}

impl Filter {
    /// Create a new filter
    pub fn new(field: impl Into<String>, constraint: ConstraintKind, compare_to: CompareTo) -> Self {
        Self {
            field: field.into(),
            constraint,
            compare_to,
        }
    }
}

/// Ordered filters combined with AND logic
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterList {
    filters: Vec<Filter>,
}

impl FilterList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Filter> {
        self.filters.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Filter> {
        self.filters.iter()
    }

    pub fn as_slice(&self) -> &[Filter] {
        &self.filters
    }

    /// Fields constrained by this list, in order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.filters.iter().map(|f| f.field.as_str())
    }

    /// Check if some filter constrains `field`
    pub fn contains_field(&self, field: &str) -> bool {
        self.fields().any(|f| f == field)
    }

    /// Returns a new list with `filter` appended
    pub fn with_filter(&self, filter: Filter) -> Self {
        let mut filters = Vec::with_capacity(self.filters.len() + 1);
        filters.extend_from_slice(&self.filters);
        filters.push(filter);
        Self { filters }
    }

    /// Returns a new list without the filter at `index`.
    ///
    /// An out-of-range index yields an unchanged copy.
    pub fn without(&self, index: usize) -> Self {
        self.filters
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, f)| f.clone())
            .collect()
    }

    /// Returns an empty list
    pub fn cleared(&self) -> Self {
        Self::new()
    }
}

impl From<Vec<Filter>> for FilterList {
    fn from(filters: Vec<Filter>) -> Self {
        Self { filters }
    }
}

impl FromIterator<Filter> for FilterList {
    fn from_iter<I: IntoIterator<Item = Filter>>(iter: I) -> Self {
        Self {
            filters: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a FilterList {
    type Item = &'a Filter;
    type IntoIter = std::slice::Iter<'a, Filter>;

    fn into_iter(self) -> Self::IntoIter {
        self.filters.iter()
    }
}

impl IntoIterator for FilterList {
    type Item = Filter;
    type IntoIter = std::vec::IntoIter<Filter>;

    fn into_iter(self) -> Self::IntoIter {
        self.filters.into_iter()
    }
}
