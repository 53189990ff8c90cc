//! Server-rendered browse page: recipe table, filters, pager and detail drawer.

pub mod handlers;
pub mod render;
pub mod view;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
