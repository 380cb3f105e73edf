//! Place handlers. Creation and listing are nested under a trip; deletion is by place id alone.

use crate::error::{AppError, ErrorBody};
use crate::model::{NewPlace, Place};
use crate::response::{message, MessageBody};
use crate::service::PlaceService;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

/// POST /api/trips/:trip_id/places
#[utoipa::path(post, path = "/api/trips/{trip_id}/places", params(("trip_id" = String, Path)),
    request_body = NewPlace,
    responses((status = 200, body = Place), (status = 404, body = ErrorBody), (status = 422, body = ErrorBody)))]
pub async fn create_place(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
    body: Result<Json<NewPlace>, JsonRejection>,
) -> Result<Json<Place>, AppError> {
    let Json(body) = body?;
    let place = PlaceService::create(state.store.as_ref(), &trip_id, body).await?;
    Ok(Json(place))
}

/// GET /api/trips/:trip_id/places, oldest first, at most 1000.
#[utoipa::path(get, path = "/api/trips/{trip_id}/places", params(("trip_id" = String, Path)),
    responses((status = 200, body = [Place])))]
pub async fn list_places(
    State(state): State<AppState>,
    Path(trip_id): Path<String>,
) -> Result<Json<Vec<Place>>, AppError> {
    Ok(Json(PlaceService::list_by_trip(state.store.as_ref(), &trip_id).await?))
}

/// DELETE /api/places/:place_id
#[utoipa::path(delete, path = "/api/places/{place_id}", params(("place_id" = String, Path)),
    responses((status = 200, body = MessageBody), (status = 404, body = ErrorBody)))]
pub async fn delete_place(
    State(state): State<AppState>,
    Path(place_id): Path<String>,
) -> Result<Json<MessageBody>, AppError> {
    PlaceService::delete(state.store.as_ref(), &place_id).await?;
    Ok(message("Place deleted successfully"))
}
