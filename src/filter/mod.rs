//! # Filter Model
//!
//! Constraint kinds, blacklists, comparison values and filter lists shared
//! by the codec, catalog, compiler and autocomplete engine.

mod constraint;
mod list;
mod value;

pub use constraint::{Blacklist, ConstraintKind, UnknownConstraint};
pub use list::{Filter, FilterList};
pub use value::CompareTo;
