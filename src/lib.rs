//! Trip planner: trips and the places belonging to them, stored as documents
//! and served over a JSON HTTP API.

pub mod error;
pub mod handlers;
pub mod model;
pub mod openapi;
pub mod response;
pub mod routes;
pub mod service;
pub mod settings;
pub mod sql;
pub mod state;
pub mod store;
pub mod telemetry;

pub use error::{AppError, SettingsError, StoreError};
pub use model::{NewPlace, NewTrip, Place, Trip};
pub use routes::{app, common_routes, trip_routes};
pub use service::{PlaceService, TripService, LIST_LIMIT};
pub use settings::{Settings, StoreBackend};
pub use state::AppState;
pub use store::{ensure_database_exists, MemoryStore, PgStore, RecordStore, COLLECTIONS};
pub use telemetry::init_tracing;
