use anyhow::Context;
use sqlx::{migrate::Migrator, postgres::PgPoolOptions, PgPool};
use tracing::info;

use crate::config::DatabaseConfig;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<PgPool> {
    match &config.url {
        Some(_) => info!(max_connections = config.max_connections, "connecting with DATABASE_URL"),
        None => info!(
            host = %config.host,
            port = config.port,
            user = %config.user,
            database = %config.name,
            max_connections = config.max_connections,
            "connecting to database"
        ),
    }

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(config.connect_options()?)
        .await
        .context("connect to database")
}

pub async fn migrate(db: &PgPool) -> anyhow::Result<()> {
    MIGRATOR.run(db).await.context("run migrations")
}
