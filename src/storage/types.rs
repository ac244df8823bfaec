use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Database-specific errors with user-friendly messages
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Table provisioning failed
    #[error("Database migration failed: {0}")]
    Migration(String),

    /// An update was requested for an article that was never persisted
    #[error("Article has no id; insert it before updating")]
    MissingId,

    /// Generic database error
    #[error("Database error: {0}")]
    Other(#[from] sqlx::Error),
}

// ============================================================================
// Query Helpers
// ============================================================================

/// Persisted article columns that can be used as an equality filter.
///
/// Column names are fixed here so `find_where` never interpolates caller
/// strings into SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleField {
    Title,
    Category,
    Author,
    AuthorUrl,
    PublishedOn,
}

impl ArticleField {
    /// Column name in `articletable`
    pub fn column(self) -> &'static str {
        match self {
            ArticleField::Title => "title",
            ArticleField::Category => "category",
            ArticleField::Author => "author",
            ArticleField::AuthorUrl => "authorUrl",
            ArticleField::PublishedOn => "publishedOn",
        }
    }
}

impl std::str::FromStr for ArticleField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(ArticleField::Title),
            "category" => Ok(ArticleField::Category),
            "author" => Ok(ArticleField::Author),
            "authorUrl" | "author_url" => Ok(ArticleField::AuthorUrl),
            "publishedOn" | "published_on" => Ok(ArticleField::PublishedOn),
            other => Err(format!("unknown article field: {other}")),
        }
    }
}
