use tracing::debug;

use super::{
    dto::{RecipePage, SearchParams, SearchResults},
    filter::SearchFilter,
    repo::RecipeStore,
    repo_types::Recipe,
};

/// `page` and `limit` are expected to be positive (see `ListParams`).
pub async fn list_recipes(store: &dyn RecipeStore, page: i64, limit: i64) -> anyhow::Result<RecipePage> {
    let offset = (page - 1).saturating_mul(limit);

    let (total, data) = store.page(limit, offset).await?;
    debug!(page, limit, total, returned = data.len(), "listed recipes");

    Ok(RecipePage {
        page,
        limit,
        total,
        data,
    })
}

pub async fn search_recipes(
    store: &dyn RecipeStore,
    params: &SearchParams,
) -> anyhow::Result<SearchResults> {
    let filter = SearchFilter::from_params(params);
    let data = store.search(&filter).await?;
    debug!(predicates = filter.predicates.len(), returned = data.len(), "searched recipes");
    Ok(SearchResults { data })
}

pub async fn get_recipe(store: &dyn RecipeStore, id: i32) -> anyhow::Result<Option<Recipe>> {
    store.find(id).await
}
