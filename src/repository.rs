//! The query-to-GeoJSON adapter.
//!
//! Each dataset is one fixed read-only query against the survey database.
//! Geometry is reprojected to EPSG:4326 inside the query, so nothing in
//! this crate ever sees native-projection coordinates; rows are decoded
//! into typed structs and mapped one-to-one into GeoJSON features.
//!
//! Table and column names are what the QGIS exports created, quoting
//! included. This crate reads them and never owns their schema.

use std::time::Duration;

use async_trait::async_trait;
use futures::TryStreamExt;
use geojson::{Feature, FeatureCollection, JsonObject};
use serde_json::Value;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool};

use crate::error::Error;
use crate::geometry::RawGeometry;

const SURVEY_POINTS_SQL: &str = r#"
    SELECT id, fid, ST_AsGeoJSON(ST_Transform(geom, 4326))::json AS geometry
    FROM "ConteoPuyas"
    ORDER BY id
"#;

const SURVEY_POINTS_INFO_SQL: &str = r#"
    SELECT
        p.id,
        p.conteopuyas_id,
        p.nombre_cientifico,
        p.nombre_comun,
        p.edad_estimada,
        p.estado_floracion,
        p.observaciones,
        ST_AsGeoJSON(ST_Transform(c.geom, 4326))::json AS geometry
    FROM "ConteoPuyas" c
    JOIN "puyas_info" p ON c.id = p.conteopuyas_id
    ORDER BY p.id
"#;

const TRACK_SQL: &str = r#"
    SELECT id, name, description, ST_AsGeoJSON(ST_Transform(geom, 4326))::json AS geometry
    FROM "doc — track"
    ORDER BY id
"#;

const CONTOURS_20M_SQL: &str = r#"
    SELECT id, contour, inline_fid, ST_AsGeoJSON(ST_Transform(geom, 4326)) AS geometry
    FROM "curvas20s"
    ORDER BY id
"#;

const CONTOURS_5M_SQL: &str = r#"
    SELECT id, contour, inline_fid, ST_AsGeoJSON(ST_Transform(geom, 4326)) AS geometry
    FROM "curvas5s"
    ORDER BY id
"#;

/// Read access to the five fixed survey datasets.
///
/// Handlers depend on this trait rather than on a concrete pool, so tests
/// can inject [`StaticFeatureStore`] or a failing double.
#[async_trait]
pub trait FeatureStore: Send + Sync {
    /// The surveyed puya stand as bare points (`id`, `fid`).
    async fn survey_points(&self) -> Result<FeatureCollection, Error>;

    /// Survey points joined with their recorded attributes.
    async fn survey_points_info(&self) -> Result<FeatureCollection, Error>;

    /// The GPS track walked during the survey.
    async fn track(&self) -> Result<FeatureCollection, Error>;

    /// Elevation contours at the 20 m interval.
    async fn contours_20m(&self) -> Result<FeatureCollection, Error>;

    /// Elevation contours at the 5 m interval.
    async fn contours_5m(&self) -> Result<FeatureCollection, Error>;
}

/// A row that knows how to turn itself into a GeoJSON feature.
trait DatasetRow: for<'r> FromRow<'r, PgRow> + Send + Unpin + 'static {
    fn into_feature(self) -> Result<Feature, Error>;
}

#[derive(Debug, FromRow)]
struct SurveyPointRow {
    id: i32,
    fid: Option<String>,
    geometry: Value,
}

impl DatasetRow for SurveyPointRow {
    fn into_feature(self) -> Result<Feature, Error> {
        let mut properties = JsonObject::new();
        properties.insert("id".to_owned(), self.id.into());
        properties.insert("fid".to_owned(), self.fid.into());
        feature(RawGeometry::Structured(self.geometry), properties)
    }
}

#[derive(Debug, FromRow)]
struct SurveyPointInfoRow {
    id: i32,
    conteopuyas_id: i32,
    nombre_cientifico: Option<String>,
    nombre_comun: Option<String>,
    edad_estimada: Option<i32>,
    estado_floracion: Option<String>,
    observaciones: Option<String>,
    geometry: Value,
}

impl DatasetRow for SurveyPointInfoRow {
    fn into_feature(self) -> Result<Feature, Error> {
        // Absent attributes must surface as explicit nulls, never as
        // missing keys; the frontend popups index all seven.
        let mut properties = JsonObject::new();
        properties.insert("id".to_owned(), self.id.into());
        properties.insert("fid".to_owned(), self.conteopuyas_id.into());
        properties.insert("nombre_cientifico".to_owned(), self.nombre_cientifico.into());
        properties.insert("nombre_comun".to_owned(), self.nombre_comun.into());
        properties.insert("edad_estimada".to_owned(), self.edad_estimada.into());
        properties.insert("estado_floracion".to_owned(), self.estado_floracion.into());
        properties.insert("observaciones".to_owned(), self.observaciones.into());
        feature(RawGeometry::Structured(self.geometry), properties)
    }
}

#[derive(Debug, FromRow)]
struct TrackRow {
    id: i32,
    name: Option<String>,
    description: Option<String>,
    geometry: Value,
}

impl DatasetRow for TrackRow {
    fn into_feature(self) -> Result<Feature, Error> {
        let mut properties = JsonObject::new();
        properties.insert("id".to_owned(), self.id.into());
        properties.insert("name".to_owned(), self.name.into());
        properties.insert("description".to_owned(), self.description.into());
        feature(RawGeometry::Structured(self.geometry), properties)
    }
}

#[derive(Debug, FromRow)]
struct ContourRow {
    id: i32,
    contour: Option<f64>,
    inline_fid: Option<i64>,
    geometry: String,
}

impl DatasetRow for ContourRow {
    fn into_feature(self) -> Result<Feature, Error> {
        let mut properties = JsonObject::new();
        properties.insert("id".to_owned(), self.id.into());
        properties.insert("contour".to_owned(), self.contour.into());
        properties.insert("inline_fid".to_owned(), self.inline_fid.into());
        feature(RawGeometry::Serialized(self.geometry), properties)
    }
}

fn feature(geometry: RawGeometry, properties: JsonObject) -> Result<Feature, Error> {
    Ok(Feature {
        bbox: None,
        geometry: Some(geometry.normalize()?),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    })
}

fn collection(features: Vec<Feature>) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// The PostGIS-backed store used in production.
#[derive(Clone)]
pub struct PgFeatureStore {
    pool: PgPool,
    query_timeout: Duration,
}

impl PgFeatureStore {
    pub fn new(pool: PgPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    async fn collect<R: DatasetRow>(&self, sql: &'static str) -> Result<FeatureCollection, Error> {
        tokio::time::timeout(self.query_timeout, self.collect_inner::<R>(sql))
            .await
            .map_err(|_| Error::QueryTimeout(self.query_timeout))?
    }

    async fn collect_inner<R: DatasetRow>(
        &self,
        sql: &'static str,
    ) -> Result<FeatureCollection, Error> {
        let mut rows = sqlx::query_as::<_, R>(sql).fetch(&self.pool);
        let mut features = Vec::new();
        while let Some(row) = rows.try_next().await? {
            features.push(row.into_feature()?);
        }
        Ok(collection(features))
    }
}

#[async_trait]
impl FeatureStore for PgFeatureStore {
    async fn survey_points(&self) -> Result<FeatureCollection, Error> {
        self.collect::<SurveyPointRow>(SURVEY_POINTS_SQL).await
    }

    async fn survey_points_info(&self) -> Result<FeatureCollection, Error> {
        self.collect::<SurveyPointInfoRow>(SURVEY_POINTS_INFO_SQL).await
    }

    async fn track(&self) -> Result<FeatureCollection, Error> {
        self.collect::<TrackRow>(TRACK_SQL).await
    }

    async fn contours_20m(&self) -> Result<FeatureCollection, Error> {
        self.collect::<ContourRow>(CONTOURS_20M_SQL).await
    }

    async fn contours_5m(&self) -> Result<FeatureCollection, Error> {
        self.collect::<ContourRow>(CONTOURS_5M_SQL).await
    }
}

/// Serves collections prepared ahead of time. The HTTP tests run the real
/// router over this store; it is also handy for demoing the API without a
/// database.
#[derive(Debug, Clone)]
pub struct StaticFeatureStore {
    pub survey_points: FeatureCollection,
    pub survey_points_info: FeatureCollection,
    pub track: FeatureCollection,
    pub contours_20m: FeatureCollection,
    pub contours_5m: FeatureCollection,
}

impl Default for StaticFeatureStore {
    fn default() -> Self {
        Self {
            survey_points: collection(Vec::new()),
            survey_points_info: collection(Vec::new()),
            track: collection(Vec::new()),
            contours_20m: collection(Vec::new()),
            contours_5m: collection(Vec::new()),
        }
    }
}

#[async_trait]
impl FeatureStore for StaticFeatureStore {
    async fn survey_points(&self) -> Result<FeatureCollection, Error> {
        Ok(self.survey_points.clone())
    }

    async fn survey_points_info(&self) -> Result<FeatureCollection, Error> {
        Ok(self.survey_points_info.clone())
    }

    async fn track(&self) -> Result<FeatureCollection, Error> {
        Ok(self.track.clone())
    }

    async fn contours_20m(&self) -> Result<FeatureCollection, Error> {
        Ok(self.contours_20m.clone())
    }

    async fn contours_5m(&self) -> Result<FeatureCollection, Error> {
        Ok(self.contours_5m.clone())
    }
}
