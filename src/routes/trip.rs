//! Trip and place routes, mounted under `/api`.

use crate::handlers::{
    create_place, create_trip, delete_place, delete_trip, get_trip, list_places, list_trips,
};
use crate::openapi::ApiDoc;
use crate::state::AppState;
use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

pub fn trip_routes(state: AppState) -> Router {
    Router::new()
        .route("/trips", get(list_trips).post(create_trip))
        .route("/trips/:trip_id", get(get_trip).delete(delete_trip))
        .route("/trips/:trip_id/places", get(list_places).post(create_place))
        .route("/places/:place_id", axum::routing::delete(delete_place))
        .route("/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .with_state(state)
}
