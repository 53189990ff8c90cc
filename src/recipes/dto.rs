use serde::{Deserialize, Serialize};

use super::{filter::leading_int, repo_types::Recipe};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

/// Raw `page`/`limit` query values; anything but a positive integer falls back
/// to the defaults.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl ListParams {
    pub fn page(&self) -> i64 {
        positive_or(self.page.as_deref(), DEFAULT_PAGE)
    }

    pub fn limit(&self) -> i64 {
        positive_or(self.limit.as_deref(), DEFAULT_LIMIT)
    }
}

pub(crate) fn positive_or(raw: Option<&str>, default: i64) -> i64 {
    raw.and_then(leading_int).filter(|v| *v > 0).unwrap_or(default)
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub title: Option<String>,
    pub cuisine: Option<String>,
    pub rating: Option<String>,
    pub total_time: Option<String>,
    pub prep_time: Option<String>,
    pub cook_time: Option<String>,
    pub calories: Option<String>,
}

impl SearchParams {
    pub fn has_filters(&self) -> bool {
        [
            &self.title,
            &self.cuisine,
            &self.rating,
            &self.total_time,
            &self.prep_time,
            &self.cook_time,
            &self.calories,
        ]
        .into_iter()
        .any(|v| v.as_deref().is_some_and(|s| !s.is_empty()))
    }
}

#[derive(Debug, Serialize)]
pub struct RecipePage {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub data: Vec<Recipe>,
}

/// Search results carry no pagination metadata.
#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub data: Vec<Recipe>,
}
