//! Bulk load of the recipe dataset.
//!
//! The table is truncated, then the source document is streamed on a blocking
//! thread and handed to the async side over a bounded channel. Rows are written
//! in batches, one transaction per batch. A failed batch is rolled back and
//! logged and the import moves on; a malformed document aborts it.

mod record;
mod stream;

use std::io::{BufReader, Read};

use anyhow::Context;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder, Transaction};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use crate::recipes::repo_types::NewRecipe;

pub use record::normalize;
pub use stream::for_each_entry;

/// Postgres accepts at most 65535 bind parameters per statement, nine per row.
const MAX_BATCH_SIZE: usize = u16::MAX as usize / 9;

/// Destination of an import run.
#[async_trait]
pub trait RecipeSink: Send + Sync {
    async fn truncate(&self) -> anyhow::Result<()>;
    /// Inserts all rows or none of them.
    async fn insert_batch(&self, rows: &[NewRecipe]) -> anyhow::Result<()>;
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportReport {
    /// Entries with a title, handed to the sink.
    pub accepted: usize,
    /// Entries dropped for lacking a title.
    pub skipped: usize,
    pub inserted: usize,
    pub failed_batches: usize,
}

pub async fn run<R, S>(source: R, sink: &S, batch_size: usize) -> anyhow::Result<ImportReport>
where
    R: Read + Send + 'static,
    S: RecipeSink + ?Sized,
{
    let batch_size = batch_size.clamp(1, MAX_BATCH_SIZE);

    info!("truncating recipes table");
    sink.truncate().await.context("truncate recipes")?;

    let (tx, mut rx) = mpsc::channel::<NewRecipe>(batch_size);
    let parser = tokio::task::spawn_blocking(move || -> anyhow::Result<usize> {
        let mut skipped = 0;
        for_each_entry(BufReader::new(source), |entry| match normalize(&entry) {
            Some(recipe) => tx
                .blocking_send(recipe)
                .map_err(|_| "import receiver closed".to_string()),
            None => {
                skipped += 1;
                Ok(())
            }
        })?;
        Ok(skipped)
    });

    let mut report = ImportReport::default();
    let mut batch = Vec::with_capacity(batch_size);
    while let Some(recipe) = rx.recv().await {
        report.accepted += 1;
        batch.push(recipe);
        if batch.len() >= batch_size {
            flush(sink, &mut batch, &mut report).await;
        }
    }
    if !batch.is_empty() {
        flush(sink, &mut batch, &mut report).await;
    }

    report.skipped = parser
        .await
        .context("parser task failed")?
        .context("read recipe source")?;

    info!(
        accepted = report.accepted,
        skipped = report.skipped,
        inserted = report.inserted,
        failed_batches = report.failed_batches,
        "import finished"
    );
    Ok(report)
}

async fn flush<S>(sink: &S, batch: &mut Vec<NewRecipe>, report: &mut ImportReport)
where
    S: RecipeSink + ?Sized,
{
    match sink.insert_batch(batch).await {
        Ok(()) => {
            report.inserted += batch.len();
            info!(rows = batch.len(), inserted = report.inserted, "batch committed");
        }
        Err(e) => {
            report.failed_batches += 1;
            error!(error = %e, rows = batch.len(), "batch failed and was rolled back");
        }
    }
    batch.clear();
}

pub struct PgRecipeSink {
    db: PgPool,
}

impl PgRecipeSink {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RecipeSink for PgRecipeSink {
    async fn truncate(&self) -> anyhow::Result<()> {
        sqlx::query("TRUNCATE recipes RESTART IDENTITY")
            .execute(&self.db)
            .await?;
        Ok(())
    }

    async fn insert_batch(&self, rows: &[NewRecipe]) -> anyhow::Result<()> {
        let mut tx = self.db.begin().await.context("begin tx")?;
        match insert_rows(&mut tx, rows).await {
            Ok(()) => tx.commit().await.context("commit tx"),
            Err(e) => {
                if let Err(rb) = tx.rollback().await {
                    warn!(error = %rb, "rollback failed");
                }
                Err(e)
            }
        }
    }
}

async fn insert_rows(tx: &mut Transaction<'_, Postgres>, rows: &[NewRecipe]) -> anyhow::Result<()> {
    insert_query(rows)
        .build()
        .execute(&mut **tx)
        .await
        .context("insert recipes")?;
    Ok(())
}

fn insert_query(rows: &[NewRecipe]) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(
        "INSERT INTO recipes (title, cuisine, rating, prep_time, cook_time, total_time, \
         description, nutrients, serves) ",
    );
    qb.push_values(rows, |mut b, r| {
        b.push_bind(r.title.clone())
            .push_bind(r.cuisine.clone())
            .push_bind(r.rating)
            .push_bind(r.prep_time)
            .push_bind(r.cook_time)
            .push_bind(r.total_time)
            .push_bind(r.description.clone())
            .push_bind(r.nutrients.clone())
            .push_bind(r.serves.clone());
    });
    qb
}
