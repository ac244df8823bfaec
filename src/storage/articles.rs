use anyhow::Result;
use sqlx::QueryBuilder;

use super::schema::Database;
use super::types::{ArticleField, DatabaseError};
use crate::article::Article;

/// Column list shared by every article read.
///
/// `publishedOn` is declared DATE (numeric affinity), so a bare year would
/// come back as an integer; the cast keeps it decodable as text. Values that
/// SQLite stores as REAL do not survive exactly (`1e3` reads back as
/// `1000.0`). Dates and date-times are not numeric and round-trip unchanged.
const ARTICLE_COLUMNS: &str =
    "id, title, category, author, authorUrl, CAST(publishedOn AS TEXT) AS publishedOn, body";

/// Rows per multi-value INSERT (6 binds each, well under SQLite's 999 limit)
const INSERT_BATCH_SIZE: usize = 100;

impl Database {
    // ========================================================================
    // Article Reads
    // ========================================================================

    /// Get every stored article in insertion order
    pub async fn select_all(&self) -> Result<Vec<Article>> {
        let sql = format!("SELECT {ARTICLE_COLUMNS} FROM articletable ORDER BY id");
        let articles = sqlx::query_as::<_, Article>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(articles)
    }

    /// Get the articles whose `field` equals `value`
    pub async fn find_where(&self, field: ArticleField, value: &str) -> Result<Vec<Article>> {
        let sql = format!(
            "SELECT {ARTICLE_COLUMNS} FROM articletable WHERE {} = ? ORDER BY id",
            field.column()
        );
        let articles = sqlx::query_as::<_, Article>(&sql)
            .bind(value)
            .fetch_all(&self.pool)
            .await?;

        Ok(articles)
    }

    /// Number of stored articles
    pub async fn count(&self) -> Result<i64> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM articletable")
            .fetch_one(&self.pool)
            .await?;

        Ok(row.0)
    }

    // ========================================================================
    // Article Writes
    // ========================================================================

    /// Insert one article and return the id storage assigned to it.
    ///
    /// The article's own `id` is never bound; storage always picks it.
    pub async fn insert_record(&self, article: &Article) -> Result<i64> {
        let row: (i64,) = sqlx::query_as(
            r#"
            INSERT INTO articletable (title, category, author, authorUrl, publishedOn, body)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id
        "#,
        )
        .bind(&article.title)
        .bind(&article.category)
        .bind(&article.author)
        .bind(&article.author_url)
        .bind(&article.published_on)
        .bind(&article.body)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = row.0, title = ?article.title, "Inserted article");
        Ok(row.0)
    }

    /// Insert a batch of articles in a single transaction.
    ///
    /// Returns only after the transaction commits, so every row is visible
    /// to the next query. Returns the number of rows inserted.
    pub async fn insert_records(&self, articles: &[Article]) -> Result<u64> {
        if articles.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;

        for chunk in articles.chunks(INSERT_BATCH_SIZE) {
            let mut builder: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new(
                "INSERT INTO articletable (title, category, author, authorUrl, publishedOn, body) ",
            );

            builder.push_values(chunk, |mut b, article| {
                b.push_bind(&article.title)
                    .push_bind(&article.category)
                    .push_bind(&article.author)
                    .push_bind(&article.author_url)
                    .push_bind(&article.published_on)
                    .push_bind(&article.body);
            });

            inserted += builder.build().execute(&mut *tx).await?.rows_affected();
        }

        tx.commit().await?;
        tracing::debug!(inserted = inserted, "Inserted article batch");
        Ok(inserted)
    }

    /// Rewrite the persisted columns of an already stored article.
    ///
    /// Returns whether a row matched the article's id.
    pub async fn update_record(&self, article: &Article) -> Result<bool> {
        let id = article.id.ok_or(DatabaseError::MissingId)?;
        let result = sqlx::query(
            r#"
            UPDATE articletable
            SET title = ?, category = ?, author = ?, authorUrl = ?, publishedOn = ?, body = ?
            WHERE id = ?
        "#,
        )
        .bind(&article.title)
        .bind(&article.category)
        .bind(&article.author)
        .bind(&article.author_url)
        .bind(&article.published_on)
        .bind(&article.body)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete the article with the given id.
    ///
    /// Does not touch any loaded `ArticleCollection`; reload to observe the
    /// change. Returns whether a row was removed.
    pub async fn delete_record(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM articletable WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete every article. Returns the number of rows removed.
    pub async fn clear_table(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM articletable")
            .execute(&self.pool)
            .await?;

        tracing::info!(removed = result.rows_affected(), "Cleared articles table");
        Ok(result.rows_affected())
    }
}
