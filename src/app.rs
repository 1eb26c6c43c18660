use axum::http::Method;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{
    contours_20m, contours_5m, healthcheck, survey_points, survey_points_info, track,
};
use crate::state::AppState;

/// The route table: five fixed datasets plus a liveness probe.
///
/// CORS is wide open for GET; the map client is served from a different
/// origin and sends no credentials.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/api/puyas", get(survey_points))
        .route("/api/puyas_info", get(survey_points_info))
        .route("/api/track", get(track))
        .route("/api/curva20s", get(contours_20m))
        .route("/api/curva5s", get(contours_5m))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_headers(Any)
                .allow_methods([Method::GET]),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
