use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use tracing::{error, instrument};

use super::{
    dto::{ListParams, RecipePage, SearchParams, SearchResults},
    repo_types::Recipe,
    services,
};
use crate::{error::ApiError, state::AppState};

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/api/recipes", get(list_recipes))
        .route("/api/recipes/search", get(search_recipes))
        .route("/api/recipes/:id", get(get_recipe))
}

#[instrument(skip(state))]
pub async fn list_recipes(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<RecipePage>, ApiError> {
    let page = services::list_recipes(state.recipes.as_ref(), params.page(), params.limit())
        .await
        .map_err(|e| {
            error!(error = %e, "list recipes failed");
            ApiError::Internal(e)
        })?;
    Ok(Json(page))
}

#[instrument(skip(state))]
pub async fn search_recipes(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResults>, ApiError> {
    let results = services::search_recipes(state.recipes.as_ref(), &params)
        .await
        .map_err(|e| {
            error!(error = %e, "search recipes failed");
            ApiError::Detailed(e)
        })?;
    Ok(Json(results))
}

#[instrument(skip(state))]
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Recipe>, ApiError> {
    match services::get_recipe(state.recipes.as_ref(), id).await {
        Ok(Some(recipe)) => Ok(Json(recipe)),
        Ok(None) => Err(ApiError::NotFound),
        Err(e) => {
            error!(error = %e, id, "get recipe failed");
            Err(ApiError::Internal(e))
        }
    }
}
