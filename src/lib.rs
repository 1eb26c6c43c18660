//! # Puya Atlas
//!
//! GeoJSON API for the Comanche puya survey map.
//!
//! The browser frontend renders a 3D Mapbox GL view of Comanche (La Paz,
//! Bolivia) with five layers on top: the surveyed Puya raimondii stand as
//! bare and annotated points, the GPS track walked during the survey, and
//! elevation contours at two intervals. Each layer is one fixed read-only
//! PostGIS query; rows come back with
//! `ST_AsGeoJSON(ST_Transform(geom, 4326))` and are reshaped here into a
//! GeoJSON `FeatureCollection` per request.
//!
//! ## Current features
//!
//! Given a PostGIS database holding the survey exports, this crate serves
//! them as `FeatureCollection` responses over plain HTTP GET, reprojected
//! to WGS84 regardless of the storage projection. The store sits behind a
//! trait, so the HTTP layer can be exercised without a database.
//!
//! ## Known limitations
//!
//! Result sets are built in memory and delivered whole; there is no
//! pagination, filtering, or tile-wise delivery. That is fine at survey
//! scale (a few thousand rows) but would not be at regional scale. The
//! HTTP surface is read-only and unauthenticated.

pub mod app;
pub mod config;
pub mod error;
pub mod geometry;
pub mod handlers;
pub mod repository;
pub mod state;

pub use app::build_router;
pub use error::Error;
