//! SQL text for the library tables: identifiers come from configuration only, values are bound.

mod builder;
pub use builder::*;
