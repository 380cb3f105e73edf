//! Trip handlers: create, list, read, delete (with cascade).

use crate::error::{AppError, ErrorBody};
use crate::model::{NewTrip, Trip};
use crate::response::{message, MessageBody};
use crate::service::TripService;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

/// POST /api/trips
#[utoipa::path(post, path = "/api/trips", request_body = NewTrip,
    responses((status = 200, body = Trip), (status = 422, body = ErrorBody)))]
pub async fn create_trip(
    State(state): State<AppState>,
    body: Result<Json<NewTrip>, JsonRejection>,
) -> Result<Json<Trip>, AppError> {
    let Json(body) = body?;
    let trip = TripService::create(state.store.as_ref(), body).await?;
    Ok(Json(trip))
}

/// GET /api/trips, newest first, at most 1000.
#[utoipa::path(get, path = "/api/trips", responses((status = 200, body = [Trip])))]
pub async fn list_trips(State(state): State<AppState>) -> Result<Json<Vec<Trip>>, AppError> {
    Ok(Json(TripService::list(state.store.as_ref()).await?))
}

/// GET /api/trips/:trip_id
#[utoipa::path(get, path = "/api/trips/{trip_id}", params(("trip_id" = String, Path)),
    responses((status = 200, body = Trip), (status = 404, body = ErrorBody)))]
pub async fn get_trip(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
) -> Result<Json<Trip>, AppError> {
    Ok(Json(TripService::get(state.store.as_ref(), &trip_id).await?))
}

/// DELETE /api/trips/:trip_id
#[utoipa::path(delete, path = "/api/trips/{trip_id}", params(("trip_id" = String, Path)),
    responses((status = 200, body = MessageBody), (status = 404, body = ErrorBody)))]
pub async fn delete_trip(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
) -> Result<Json<MessageBody>, AppError> {
    TripService::delete(state.store.as_ref(), &trip_id).await?;
    Ok(message("Trip deleted successfully"))
}
