//! # Query Compiler
//!
//! Bidirectional translation between query text and filter lists.
//!
//! - [`compile`] turns text into a validated [`FilterList`] or the full set
//!   of row diagnostics
//! - [`render`] turns filters back into canonical text
//!
//! On valid input the two are inverse up to literal normalization
//! (booleans, number spelling, ISO dates).
//!
//! [`FilterList`]: crate::filter::FilterList

mod errors;
mod parser;
mod serializer;

pub use errors::{CompileResult, Diagnostics, ErrorKind, RowError};
pub use parser::{compile, compile_default};
pub use serializer::{render, render_filter};

pub(crate) use parser::rows;
