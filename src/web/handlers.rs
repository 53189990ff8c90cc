use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use tracing::{error, instrument};

use super::{
    render,
    view::{BrowseView, Mode, DEFAULT_PAGE_SIZE},
};
use crate::{
    recipes::{
        dto::{positive_or, SearchParams, DEFAULT_PAGE},
        filter::leading_int,
        services,
    },
    state::AppState,
};

#[derive(Debug, Default, Deserialize)]
pub struct BrowseParams {
    pub page: Option<String>,
    pub limit: Option<String>,
    /// Id of the recipe shown in the detail drawer.
    pub recipe: Option<String>,
    #[serde(flatten)]
    pub filters: SearchParams,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(index))
}

#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>, Query(params): Query<BrowseParams>) -> Response {
    match load_view(&state, params).await {
        Ok(view) => Html(render::page(&view)).into_response(),
        Err(e) => {
            error!(error = %e, "browse page failed");
            (StatusCode::INTERNAL_SERVER_ERROR, Html(render::error_page())).into_response()
        }
    }
}

async fn load_view(state: &AppState, params: BrowseParams) -> anyhow::Result<BrowseView> {
    let store = state.recipes.as_ref();
    let limit = positive_or(params.limit.as_deref(), DEFAULT_PAGE_SIZE);

    let (mode, total, recipes) = if params.filters.has_filters() {
        let found = services::search_recipes(store, &params.filters).await?;
        (Mode::Search, found.data.len() as i64, found.data)
    } else {
        let page = positive_or(params.page.as_deref(), DEFAULT_PAGE);
        let listed = services::list_recipes(store, page, limit).await?;
        (Mode::Browse { page }, listed.total, listed.data)
    };

    let selected = match params
        .recipe
        .as_deref()
        .and_then(leading_int)
        .and_then(|id| i32::try_from(id).ok())
    {
        Some(id) => services::get_recipe(store, id).await?,
        None => None,
    };

    Ok(BrowseView {
        filters: params.filters,
        limit,
        mode,
        total,
        recipes,
        selected,
    })
}
