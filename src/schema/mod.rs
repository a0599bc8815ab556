//! Schema subsystem for filterq
//!
//! A schema maps field names to declared types and is supplied by an
//! external provider. Every compile, render, catalog and suggest call takes
//! the schema snapshot it should use; nothing here is cached.

mod errors;
mod loader;
mod types;

pub use errors::{SchemaError, SchemaResult};
pub use loader::SchemaLoader;
pub use types::{FieldKind, FieldType, Schema};
