use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("database query failed")]
    Database(#[from] sqlx::Error),
    #[error("geometry column is not valid JSON")]
    GeometryJson(#[from] serde_json::Error),
    #[error("geometry column is not valid GeoJSON")]
    Geometry(#[from] geojson::Error),
    #[error("query did not finish within {0:?}")]
    QueryTimeout(Duration),
}

/// Every failure maps to the same opaque 500; the detail stays in the
/// server log.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::error!(error = ?self, "feature query failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
    }
}
