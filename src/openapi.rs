//! OpenAPI document for the trip and place routes.

use crate::error::{ErrorBody, ErrorDetail};
use crate::handlers;
use crate::model::{NewPlace, NewTrip, Place, Trip};
use crate::response::MessageBody;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::trip::create_trip,
        handlers::trip::list_trips,
        handlers::trip::get_trip,
        handlers::trip::delete_trip,
        handlers::place::create_place,
        handlers::place::list_places,
        handlers::place::delete_place,
    ),
    components(schemas(Trip, NewTrip, Place, NewPlace, MessageBody, ErrorBody, ErrorDetail))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();
        for p in [
            "/api/trips",
            "/api/trips/{trip_id}",
            "/api/trips/{trip_id}/places",
            "/api/places/{place_id}",
        ] {
            assert!(paths.contains(&p), "missing {}", p);
        }
    }
}
