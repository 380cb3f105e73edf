//! Trip and Place entities.
//!
//! Each entity has two shapes: a create input carrying only client fields, and
//! the stored record which adds the server-assigned `id` and `created_at`.
//! Constructing a record from its input is the only place those are generated.

pub mod place;
pub mod timestamp;
pub mod trip;

pub use place::{NewPlace, Place};
pub use trip::{NewTrip, Trip};

use crate::error::AppError;

/// Fresh random identifier for a new record.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Required text fields must be present and not blank.
pub(crate) fn require_text(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", field)));
    }
    Ok(())
}
