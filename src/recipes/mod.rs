pub mod dto;
pub mod filter;
pub mod handlers;
pub mod repo;
pub mod repo_types;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::api_routes()
}
