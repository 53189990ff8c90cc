use std::sync::Arc;

use tracing::warn;

use crate::config::AppConfig;
use crate::db;
use crate::recipes::repo::{PgRecipeStore, RecipeStore};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub recipes: Arc<dyn RecipeStore>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env());
        let pool = db::connect(&config.database).await?;

        if let Err(e) = db::migrate(&pool).await {
            warn!(error = %e, "migration failed; continuing");
        }

        let recipes = Arc::new(PgRecipeStore::new(pool)) as Arc<dyn RecipeStore>;
        Ok(Self::from_parts(config, recipes))
    }

    pub fn from_parts(config: Arc<AppConfig>, recipes: Arc<dyn RecipeStore>) -> Self {
        Self { config, recipes }
    }

    #[cfg(test)]
    pub fn fake(rows: Vec<crate::recipes::repo_types::Recipe>) -> Self {
        use crate::recipes::testing::MemoryRecipeStore;

        let config = Arc::new(AppConfig::from_lookup(|_| None));
        let recipes = Arc::new(MemoryRecipeStore::new(rows)) as Arc<dyn RecipeStore>;
        Self::from_parts(config, recipes)
    }
}
