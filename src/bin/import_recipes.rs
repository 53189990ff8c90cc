use std::{fs::File, path::PathBuf};

use culinary_compass::{
    config::AppConfig,
    db,
    import::{self, PgRecipeSink},
    telemetry,
};
use tracing::{error, info};

const DEFAULT_SOURCE: &str = "US_recipes_null.Pdf.json";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init("culinary_compass=info,import_recipes=info");

    let config = AppConfig::from_env();
    let path: PathBuf = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("RECIPES_FILE").ok())
        .unwrap_or_else(|| DEFAULT_SOURCE.into())
        .into();

    info!(path = %path.display(), "reading recipe source");
    let source = match File::open(&path) {
        Ok(f) => f,
        Err(e) => {
            error!(error = %e, path = %path.display(), "recipe source not found");
            std::process::exit(1);
        }
    };

    let pool = db::connect(&config.database).await?;
    db::migrate(&pool).await?;

    let sink = PgRecipeSink::new(pool.clone());
    let result = import::run(source, &sink, config.import_batch_size).await;
    pool.close().await;

    let report = result?;
    info!(
        processed = report.accepted,
        inserted = report.inserted,
        "finished importing recipes"
    );
    Ok(())
}
