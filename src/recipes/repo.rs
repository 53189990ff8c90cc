use anyhow::Context;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::{filter::SearchFilter, repo_types::Recipe};

/// Read access to the `recipes` table.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Total row count plus one page ordered by rating, best first, nulls last.
    async fn page(&self, limit: i64, offset: i64) -> anyhow::Result<(i64, Vec<Recipe>)>;
    async fn search(&self, filter: &SearchFilter) -> anyhow::Result<Vec<Recipe>>;
    async fn find(&self, id: i32) -> anyhow::Result<Option<Recipe>>;
}

const SELECT_RECIPES: &str = "SELECT id, title, cuisine, rating, prep_time, cook_time, \
     total_time, description, nutrients, serves FROM recipes";

#[derive(Clone)]
pub struct PgRecipeStore {
    db: PgPool,
}

impl PgRecipeStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

pub(crate) fn page_query(limit: i64, offset: i64) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(SELECT_RECIPES);
    qb.push(" ORDER BY rating DESC NULLS LAST LIMIT ")
        .push_bind(limit)
        .push(" OFFSET ")
        .push_bind(offset);
    qb
}

pub(crate) fn find_query(id: i32) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(SELECT_RECIPES);
    qb.push(" WHERE id = ").push_bind(id);
    qb
}

pub(crate) fn search_query(filter: &SearchFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(SELECT_RECIPES);
    filter.push_where(&mut qb);
    qb
}

#[async_trait]
impl RecipeStore for PgRecipeStore {
    async fn page(&self, limit: i64, offset: i64) -> anyhow::Result<(i64, Vec<Recipe>)> {
        let mut conn = self.db.acquire().await.context("acquire connection")?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recipes")
            .fetch_one(&mut *conn)
            .await
            .context("count recipes")?;

        let rows = page_query(limit, offset)
            .build_query_as::<Recipe>()
            .fetch_all(&mut *conn)
            .await
            .context("list recipes")?;

        Ok((total, rows))
    }

    async fn search(&self, filter: &SearchFilter) -> anyhow::Result<Vec<Recipe>> {
        let mut conn = self.db.acquire().await.context("acquire connection")?;
        let rows = search_query(filter)
            .build_query_as::<Recipe>()
            .fetch_all(&mut *conn)
            .await
            .context("search recipes")?;
        Ok(rows)
    }

    async fn find(&self, id: i32) -> anyhow::Result<Option<Recipe>> {
        let row = find_query(id)
            .build_query_as::<Recipe>()
            .fetch_optional(&self.db)
            .await
            .context("find recipe")?;
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipes::dto::SearchParams;

    #[test]
    fn search_query_selects_explicit_columns() {
        let filter = SearchFilter::from_params(&SearchParams {
            rating: Some(">=4".into()),
            ..SearchParams::default()
        });
        let qb = search_query(&filter);
        assert_eq!(
            qb.sql(),
            format!("{SELECT_RECIPES} WHERE 1=1 AND rating >= $1")
        );
    }

    #[test]
    fn page_query_orders_nulls_last_and_binds_limit_first() {
        let qb = page_query(15, 30);
        assert_eq!(
            qb.sql(),
            format!("{SELECT_RECIPES} ORDER BY rating DESC NULLS LAST LIMIT $1 OFFSET $2")
        );
    }

    #[test]
    fn find_query_filters_by_id() {
        assert_eq!(find_query(7).sql(), format!("{SELECT_RECIPES} WHERE id = $1"));
    }
}
