//! filterq - a line-oriented query language for schema-typed filters
//!
//! Each non-empty line of a query is one filter row,
//! `<field> <constraint> <compareTo...>`, checked against a schema snapshot
//! and a constraint blacklist. Queries compile into a [`FilterList`] and
//! render back to text; the same catalog drives autocomplete.

pub mod autocomplete;
pub mod catalog;
pub mod cli;
pub mod codec;
pub mod compiler;
pub mod filter;
pub mod schema;

pub use catalog::{available_filters, default_filter, AvailableFilters};
pub use compiler::{compile, render, CompileResult, Diagnostics, ErrorKind, RowError};
pub use filter::{Blacklist, CompareTo, ConstraintKind, Filter, FilterList};
pub use schema::{FieldKind, FieldType, Schema, SchemaLoader};
