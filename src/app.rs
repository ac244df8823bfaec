//! Load pipeline tying storage, seeding and views together.

use anyhow::{Context, Result};

use crate::article::ArticleCollection;
use crate::seed::SeedSource;
use crate::storage::Database;
use crate::view::ArticleView;

/// The article store plus the seed used to populate it when empty.
pub struct Blog {
    db: Database,
    seed: SeedSource,
}

impl Blog {
    pub fn new(db: Database, seed: SeedSource) -> Self {
        Self { db, seed }
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    /// Load every article and hand the collection to `view`.
    ///
    /// When the store is empty it is seeded first: all seed articles are
    /// inserted and committed before the table is read again. `view` is
    /// rendered exactly once on either path, and the loaded collection is
    /// returned to the caller.
    pub async fn fetch_all<V: ArticleView>(&self, view: &mut V) -> Result<ArticleCollection> {
        let rows = self.db.select_all().await.context("Failed to load articles")?;

        let rows = if rows.is_empty() {
            tracing::info!(source = %self.seed, "Article store is empty, seeding");
            self.seed_store().await?;
            self.db
                .select_all()
                .await
                .context("Failed to reload articles after seeding")?
        } else {
            rows
        };

        let mut articles = ArticleCollection::load_all(rows);
        tracing::info!(count = articles.len(), "Loaded articles");

        view.render_index_page(&mut articles)?;
        Ok(articles)
    }

    /// Reload the collection from storage without seeding or rendering.
    pub async fn reload(&self) -> Result<ArticleCollection> {
        let rows = self.db.select_all().await.context("Failed to load articles")?;
        Ok(ArticleCollection::load_all(rows))
    }

    async fn seed_store(&self) -> Result<u64> {
        let seed = self
            .seed
            .fetch()
            .await
            .with_context(|| format!("Failed to fetch seed data from {}", self.seed))?;

        let inserted = self
            .db
            .insert_records(&seed)
            .await
            .context("Failed to insert seed articles")?;

        tracing::info!(inserted = inserted, "Seeded article store");
        Ok(inserted)
    }
}
