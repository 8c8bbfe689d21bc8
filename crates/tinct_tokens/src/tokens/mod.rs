//! Token data model
//!
//! - Values: literals, `$ref` references, `$compute` expressions
//! - Definitions: category -> key -> value tables
//! - Sources: a named, optionally inheriting bundle of definitions
//! - Resolved tokens: the same tables with every leaf reduced to a string

mod source;
mod value;

pub use source::*;
pub use value::*;
