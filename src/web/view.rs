//! Display rules for the browse page, independent of markup.

use serde_json::Value;

use crate::recipes::{dto::SearchParams, repo_types::Recipe};

pub const DEFAULT_PAGE_SIZE: i64 = 15;
pub const PAGE_SIZE_CHOICES: [i64; 3] = [15, 25, 50];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Paginated listing over the whole table.
    Browse { page: i64 },
    /// Any filter set: every match at once, no pager.
    Search,
}

#[derive(Debug, Clone)]
pub struct BrowseView {
    pub filters: SearchParams,
    pub limit: i64,
    pub mode: Mode,
    pub total: i64,
    pub recipes: Vec<Recipe>,
    pub selected: Option<Recipe>,
}

impl BrowseView {
    pub fn page_count(&self) -> i64 {
        if self.limit <= 0 {
            return 0;
        }
        self.total / self.limit + i64::from(self.total % self.limit != 0)
    }

    pub fn has_previous(&self) -> bool {
        matches!(self.mode, Mode::Browse { page } if page > 1)
    }

    pub fn has_next(&self) -> bool {
        matches!(self.mode, Mode::Browse { page } if page.saturating_mul(self.limit) < self.total)
    }

    /// Query string for this view with `page` and `recipe` replaced.
    pub fn href(&self, page: Option<i64>, recipe: Option<i32>) -> String {
        let mut pairs: Vec<(&str, String)> = vec![("limit", self.limit.to_string())];
        for (name, value) in filter_pairs(&self.filters) {
            pairs.push((name, value.to_string()));
        }
        if let Some(page) = page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(id) = recipe {
            pairs.push(("recipe", id.to_string()));
        }
        let query: Vec<String> = pairs
            .into_iter()
            .map(|(k, v)| format!("{k}={}", urlencoding::encode(&v)))
            .collect();
        format!("/?{}", query.join("&"))
    }

    /// Current page, for links that keep the user where they are.
    pub fn current_page(&self) -> Option<i64> {
        match self.mode {
            Mode::Browse { page } => Some(page),
            Mode::Search => None,
        }
    }
}

fn filter_pairs(filters: &SearchParams) -> Vec<(&'static str, &str)> {
    [
        ("title", &filters.title),
        ("cuisine", &filters.cuisine),
        ("rating", &filters.rating),
        ("calories", &filters.calories),
        ("total_time", &filters.total_time),
        ("prep_time", &filters.prep_time),
        ("cook_time", &filters.cook_time),
    ]
    .into_iter()
    .filter_map(|(name, value)| value.as_deref().filter(|v| !v.is_empty()).map(|v| (name, v)))
    .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stars {
    pub filled: usize,
    pub empty: usize,
}

/// `None` for a missing or zero rating, shown as "N/A". Never more than five.
pub fn stars(rating: Option<f64>) -> Option<Stars> {
    let rating = rating.filter(|r| r.is_finite() && *r != 0.0)?;
    let filled = (rating + 0.5).floor().clamp(0.0, 5.0) as usize;
    Some(Stars {
        filled,
        empty: 5usize.saturating_sub(filled),
    })
}

/// `saturatedFatContent` -> `Saturated Fat Content`.
pub fn humanize_key(key: &str) -> String {
    let mut spaced = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_uppercase() {
            spaced.push(' ');
        }
        spaced.push(c);
    }
    spaced
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

pub fn minutes(value: Option<i32>, unit: &str) -> String {
    match value {
        Some(v) => format!("{v} {unit}"),
        None => "-".to_string(),
    }
}

/// Key/value rows of a nutrients blob, or `None` when it is not a mapping.
pub fn nutrient_rows(nutrients: Option<&Value>) -> Option<Vec<(String, String)>> {
    let map = nutrients?.as_object()?;
    Some(
        map.iter()
            .map(|(k, v)| {
                let value = match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (humanize_key(k), value)
            })
            .collect(),
    )
}
