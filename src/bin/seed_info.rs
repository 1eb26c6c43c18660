//! Backfills `"puyas_info"` with plausible survey attributes.
//!
//! Maintenance utility for the field team: given a database that already
//! holds the `"ConteoPuyas"` export, it inserts one randomized attribute
//! row (estimated age, flowering state, observation note) per survey
//! point. The HTTP service itself never writes.

use anyhow::{Context, Result};
use puya_atlas::config::AppConfig;
use rand::seq::SliceRandom;
use rand::Rng;
use sqlx::postgres::PgPoolOptions;

const FLOWERING_STATES: [&str; 4] = [
    "florecida",
    "no florecida",
    "parcialmente florecida",
    "muerta",
];

const OBSERVATIONS: [&str; 6] = [
    "Planta en buen estado",
    "Planta parcialmente seca",
    "Flores abiertas, saludable",
    "Algunas hojas dañadas por viento",
    "Planta en crecimiento",
    "Necesita protección contra pastoreo",
];

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env().context("failed to read configuration")?;

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await
        .context("failed to connect to PostGIS")?;

    let ids: Vec<i32> = sqlx::query_scalar(r#"SELECT id FROM "ConteoPuyas" ORDER BY id"#)
        .fetch_all(&pool)
        .await
        .context("failed to list survey points")?;

    let total = ids.len();
    let mut rng = rand::thread_rng();
    for id in ids {
        let edad: i32 = rng.gen_range(20..=100);
        let estado = FLOWERING_STATES
            .choose(&mut rng)
            .copied()
            .unwrap_or(FLOWERING_STATES[0]);
        let observacion = OBSERVATIONS
            .choose(&mut rng)
            .copied()
            .unwrap_or(OBSERVATIONS[0]);

        sqlx::query(
            r#"
            INSERT INTO "puyas_info" (conteopuyas_id, edad_estimada, estado_floracion, observaciones)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(id)
        .bind(edad)
        .bind(estado)
        .bind(observacion)
        .execute(&pool)
        .await
        .context("failed to insert attribute row")?;
    }

    println!("inserted {total} attribute rows into puyas_info");
    Ok(())
}
