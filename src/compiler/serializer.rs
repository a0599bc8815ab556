//! # Query Serializer
//!
//! Renders filters back into canonical query text, one line per filter.

use crate::codec;
use crate::filter::{Filter, FilterList};

/// Renders one filter as `<field> <constraint> <value>`
pub fn render_filter(filter: &Filter) -> String {
    format!(
        "{} {} {}",
        filter.field,
        filter.constraint,
        codec::encode(&filter.compare_to)
    )
}

/// Renders filters as query text. An empty list renders as "".
pub fn render(filters: &[Filter]) -> String {
    filters
        .iter()
        .map(render_filter)
        .collect::<Vec<_>>()
        .join("\n")
}

impl FilterList {
    /// Renders this list as query text, see [`render`].
    pub fn to_query(&self) -> String {
        render(self.as_slice())
    }
}
