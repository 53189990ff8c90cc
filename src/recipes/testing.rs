//! In-memory `RecipeStore` evaluating the same typed predicates the Postgres
//! store renders to SQL.

use std::cmp::Ordering;

use async_trait::async_trait;
use serde_json::json;

use super::{
    filter::{CompareOp, NumericField, Operand, Predicate, SearchFilter, TextColumn},
    repo::RecipeStore,
    repo_types::Recipe,
};

pub struct MemoryRecipeStore {
    rows: Vec<Recipe>,
}

impl MemoryRecipeStore {
    pub fn new(rows: Vec<Recipe>) -> Self {
        Self { rows }
    }
}

#[async_trait]
impl RecipeStore for MemoryRecipeStore {
    async fn page(&self, limit: i64, offset: i64) -> anyhow::Result<(i64, Vec<Recipe>)> {
        let mut rows = self.rows.clone();
        rows.sort_by(|a, b| match (a.rating, b.rating) {
            (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        let data = rows
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect();
        Ok((self.rows.len() as i64, data))
    }

    async fn search(&self, filter: &SearchFilter) -> anyhow::Result<Vec<Recipe>> {
        Ok(self
            .rows
            .iter()
            .filter(|r| filter.predicates.iter().all(|p| matches(r, p)))
            .cloned()
            .collect())
    }

    async fn find(&self, id: i32) -> anyhow::Result<Option<Recipe>> {
        Ok(self.rows.iter().find(|r| r.id == id).cloned())
    }
}

fn matches(recipe: &Recipe, predicate: &Predicate) -> bool {
    match predicate {
        Predicate::Contains { column, needle } => {
            let haystack = match column {
                TextColumn::Title => Some(recipe.title.as_str()),
                TextColumn::Cuisine => recipe.cuisine.as_deref(),
            };
            haystack.is_some_and(|h| h.to_lowercase().contains(&needle.to_lowercase()))
        }
        Predicate::Compare { field, op, value } => {
            let Some(lhs) = numeric_value(recipe, *field) else {
                return false;
            };
            let rhs = match *value {
                Operand::Integer(v) => v as f64,
                Operand::Decimal(v) => v,
            };
            match op {
                CompareOp::Eq => lhs == rhs,
                CompareOp::Lt => lhs < rhs,
                CompareOp::Gt => lhs > rhs,
                CompareOp::Le => lhs <= rhs,
                CompareOp::Ge => lhs >= rhs,
            }
        }
    }
}

fn numeric_value(recipe: &Recipe, field: NumericField) -> Option<f64> {
    match field {
        NumericField::Rating => recipe.rating,
        NumericField::TotalTime => recipe.total_time.map(f64::from),
        NumericField::PrepTime => recipe.prep_time.map(f64::from),
        NumericField::CookTime => recipe.cook_time.map(f64::from),
        NumericField::Calories => {
            let raw = recipe.nutrients.as_ref()?.get("calories")?;
            let text = match raw {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            text.chars()
                .filter(|c| c.is_ascii_digit() || *c == '.')
                .collect::<String>()
                .parse()
                .ok()
        }
    }
}

/// `n` recipes with ids `1..=n`; every sixth has no rating and every seventh
/// no nutrients.
pub fn sample_recipes(n: usize) -> Vec<Recipe> {
    const TITLES: [&str; 5] = ["Tomato Soup", "Chicken Pie", "Lentil soup", "Apple Crumble", "Beef Stew"];
    const CUISINES: [Option<&str>; 5] = [
        Some("Italian"),
        Some("Southern"),
        None,
        Some("Italian Food"),
        Some("Mexican"),
    ];

    (1..=n)
        .map(|i| Recipe {
            id: i as i32,
            title: format!("{} #{i}", TITLES[i % TITLES.len()]),
            cuisine: CUISINES[i % CUISINES.len()].map(str::to_string),
            rating: (i % 6 != 0).then(|| (i % 5) as f64 + 0.5),
            prep_time: Some(5 * i as i32),
            cook_time: Some(5 * i as i32),
            total_time: Some(10 * i as i32),
            description: Some(format!("Sample recipe number {i}.")),
            nutrients: (i % 7 != 0).then(|| {
                json!({
                    "calories": format!("{} kcal", 100 * (i % 8) + 50),
                    "proteinContent": "12 g",
                })
            }),
            serves: Some(format!("{} servings", i % 4 + 1)),
        })
        .collect()
}
