//! Trip and place use cases over a [`RecordStore`](crate::store::RecordStore).
//!
//! No operation spans a transaction. Deleting a trip removes its places first
//! and the trip second, as two separate store calls; a place created for the
//! same trip between those calls is left behind with a dangling `trip_id`.

mod place;
mod trip;
pub use place::PlaceService;
pub use trip::TripService;

/// Upper bound on every list result. There is no cursor past it.
pub const LIST_LIMIT: usize = 1000;
