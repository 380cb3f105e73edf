//! SQL for the JSONB document tables. Identifiers are validated names; values are always parameters.

mod builder;
pub use builder::*;
