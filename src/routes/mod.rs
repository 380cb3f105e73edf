//! Router assembly.

mod common;
mod trip;

pub use common::common_routes;
pub use trip::trip_routes;

use crate::state::AppState;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Largest accepted request body.
pub const BODY_LIMIT: usize = 1024 * 1024;

/// Full application: operational routes at the root, domain routes under `/api`,
/// wildcard CORS on everything.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(common_routes(state.clone()))
        .nest("/api", trip_routes(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(BODY_LIMIT))
                // Cors needs a `Default` response body, so it sits innermost.
                .layer(cors),
        )
}
