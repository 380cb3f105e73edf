//! HTTP handlers for trips and places.

pub mod place;
pub mod trip;
pub use place::*;
pub use trip::*;
