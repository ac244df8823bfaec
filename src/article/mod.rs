//! The article record and its in-memory collection.
//!
//! - [`Article`] is one stored or seed record. Every persisted field is
//!   optional: a property missing from the source stays `None`.
//! - [`ArticleCollection`] is a loaded snapshot of the table and owns the
//!   aggregate statistics (authors, categories, word counts).
//!
//! Rendering lives in [`render`], word counting in [`words`].

mod collection;
mod render;
mod words;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;

pub use collection::{ArticleCollection, ArticleStats, AuthorWords};
pub use render::{days_since, parse_published, publish_status, render_markdown, DRAFT_STATUS};
pub use words::word_count;

/// Property names understood by [`Article::from_props`]
const KNOWN_PROPS: [&str; 7] = [
    "id",
    "title",
    "category",
    "author",
    "authorUrl",
    "publishedOn",
    "body",
];

#[derive(Debug, Error)]
pub enum ArticleError {
    #[error("Article properties must be a JSON object")]
    NotAnObject,
    #[error("Invalid article property: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// One article, as stored in `articletable`.
///
/// `days_ago`, `publish_status` and `rendered_body` are filled in by
/// [`Article::to_html`] and are never read from or written to storage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase", default)]
#[sqlx(rename_all = "camelCase")]
pub struct Article {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub category: Option<String>,
    pub author: Option<String>,
    pub author_url: Option<String>,
    pub published_on: Option<String>,
    pub body: Option<String>,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    #[sqlx(skip)]
    pub days_ago: Option<i64>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    #[sqlx(skip)]
    pub publish_status: Option<String>,
    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    #[sqlx(skip)]
    pub rendered_body: Option<String>,
}

impl Article {
    /// Build an article from a JSON property bag.
    ///
    /// Known properties are copied into their typed fields, missing ones stay
    /// `None` and unknown ones are dropped (logged at debug level).
    pub fn from_props(props: serde_json::Value) -> Result<Self, ArticleError> {
        let serde_json::Value::Object(map) = props else {
            return Err(ArticleError::NotAnObject);
        };

        for key in map.keys() {
            if !KNOWN_PROPS.contains(&key.as_str()) {
                tracing::debug!(key = %key, "Ignoring unknown article property");
            }
        }

        Ok(serde_json::from_value(serde_json::Value::Object(map))?)
    }

    /// Number of words in the body; an article without body has none
    pub fn word_count(&self) -> usize {
        self.body.as_deref().map_or(0, word_count)
    }

    /// Whether the article has no publication date
    pub fn is_draft(&self) -> bool {
        self.published_on
            .as_deref()
            .map_or(true, |s| s.trim().is_empty())
    }
}
