//! One handler per endpoint. Each is a single store call; there are no
//! request parameters anywhere on this surface.

use axum::extract::State;
use axum::Json;
use geojson::FeatureCollection;
use serde::Serialize;

use crate::error::Error;
use crate::state::AppState;

#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
}

pub async fn healthcheck() -> Json<Health> {
    Json(Health { status: "ok" })
}

/// `GET /api/puyas`
pub async fn survey_points(
    State(state): State<AppState>,
) -> Result<Json<FeatureCollection>, Error> {
    Ok(Json(state.store.survey_points().await?))
}

/// `GET /api/puyas_info`
pub async fn survey_points_info(
    State(state): State<AppState>,
) -> Result<Json<FeatureCollection>, Error> {
    Ok(Json(state.store.survey_points_info().await?))
}

/// `GET /api/track`
pub async fn track(State(state): State<AppState>) -> Result<Json<FeatureCollection>, Error> {
    Ok(Json(state.store.track().await?))
}

/// `GET /api/curva20s`
pub async fn contours_20m(State(state): State<AppState>) -> Result<Json<FeatureCollection>, Error> {
    Ok(Json(state.store.contours_20m().await?))
}

/// `GET /api/curva5s`
pub async fn contours_5m(State(state): State<AppState>) -> Result<Json<FeatureCollection>, Error> {
    Ok(Json(state.store.contours_5m().await?))
}
