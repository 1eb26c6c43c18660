//! Normalization boundary between PostGIS output and GeoJSON geometries.
//!
//! `ST_AsGeoJSON` reaches this crate in two shapes: the point and track
//! queries cast the column to `json`, so the driver hands back structured
//! data, while the contour queries return the serialized text form. Both
//! funnel through [`RawGeometry::normalize`], so everything past the
//! repository only ever sees structured [`Geometry`] values.

use geojson::Geometry;
use serde_json::Value;

use crate::error::Error;

/// A geometry column as it comes off the wire.
#[derive(Debug, Clone)]
pub enum RawGeometry {
    /// Structured JSON from an `ST_AsGeoJSON(..)::json` column.
    Structured(Value),
    /// Serialized GeoJSON text from a bare `ST_AsGeoJSON(..)` column.
    Serialized(String),
}

impl RawGeometry {
    /// Converts either wire shape into a structured GeoJSON geometry.
    pub fn normalize(self) -> Result<Geometry, Error> {
        let value = match self {
            RawGeometry::Structured(value) => value,
            RawGeometry::Serialized(text) => serde_json::from_str(&text)?,
        };
        Ok(Geometry::from_json_value(value)?)
    }
}
