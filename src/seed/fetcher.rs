use futures::StreamExt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::article::{Article, ArticleError};

const MAX_SEED_SIZE: usize = 10 * 1024 * 1024; // 10MB
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors that can occur while loading seed articles.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Request exceeded the configured timeout
    #[error("Request timed out")]
    Timeout,
    /// Response body or file exceeded the 10MB size limit
    #[error("Seed data too large")]
    ResponseTooLarge,
    /// Seed URL is not an absolute http(s) URL
    #[error("Invalid seed URL: {0}")]
    InvalidUrl(String),
    /// Seed file could not be read
    #[error("Failed to read seed file: {0}")]
    Io(#[from] std::io::Error),
    /// Seed data is not a JSON array
    #[error("Seed data is not a JSON array of objects: {0}")]
    Parse(#[from] serde_json::Error),
    /// One element of the seed array is not a valid article
    #[error("Seed article {index} is invalid: {source}")]
    Article {
        index: usize,
        #[source]
        source: ArticleError,
    },
}

/// Where seed articles come from when the store is empty.
#[derive(Debug, Clone)]
pub enum SeedSource {
    /// HTTP GET returning a JSON array
    Http {
        client: reqwest::Client,
        url: Url,
        timeout: Duration,
    },
    /// Local JSON file with the same shape
    File(PathBuf),
}

impl SeedSource {
    /// Seed from an http(s) URL with the default 30 second timeout
    pub fn http(client: reqwest::Client, url: &str) -> Result<Self, SeedError> {
        let parsed = Url::parse(url).map_err(|e| SeedError::InvalidUrl(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(SeedError::InvalidUrl(format!(
                "unsupported scheme '{}'",
                parsed.scheme()
            )));
        }

        Ok(Self::Http {
            client,
            url: parsed,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    /// Override the request timeout (no effect on file sources)
    pub fn with_timeout(mut self, new_timeout: Duration) -> Self {
        if let Self::Http { timeout, .. } = &mut self {
            *timeout = new_timeout;
        }
        self
    }

    /// Load and parse every seed article.
    ///
    /// # Errors
    ///
    /// - [`SeedError::Network`] / [`SeedError::Timeout`] - request failed
    /// - [`SeedError::HttpStatus`] - non-2xx response
    /// - [`SeedError::ResponseTooLarge`] - payload over 10MB
    /// - [`SeedError::Io`] - seed file unreadable
    /// - [`SeedError::Parse`] / [`SeedError::Article`] - malformed JSON
    pub async fn fetch(&self) -> Result<Vec<Article>, SeedError> {
        let bytes = match self {
            Self::Http {
                client,
                url,
                timeout,
            } => fetch_bytes(client, url, *timeout).await?,
            Self::File(path) => read_file(path).await?,
        };

        let articles = parse_seed(&bytes)?;
        tracing::info!(source = %self, count = articles.len(), "Loaded seed articles");
        Ok(articles)
    }
}

impl std::fmt::Display for SeedSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http { url, .. } => write!(f, "{}", url),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Parse a JSON array of article property bags
pub fn parse_seed(bytes: &[u8]) -> Result<Vec<Article>, SeedError> {
    let values: Vec<serde_json::Value> = serde_json::from_slice(bytes)?;
    values
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            Article::from_props(value).map_err(|source| SeedError::Article { index, source })
        })
        .collect()
}

async fn fetch_bytes(
    client: &reqwest::Client,
    url: &Url,
    timeout: Duration,
) -> Result<Vec<u8>, SeedError> {
    let response = tokio::time::timeout(timeout, client.get(url.clone()).send())
        .await
        .map_err(|_| SeedError::Timeout)??;

    if !response.status().is_success() {
        tracing::warn!(url = %url, status = %response.status(), "Seed request failed");
        return Err(SeedError::HttpStatus(response.status().as_u16()));
    }

    read_limited_bytes(response, MAX_SEED_SIZE).await
}

async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, SeedError> {
    if let Some(len) = response.content_length() {
        if len as usize > limit {
            return Err(SeedError::ResponseTooLarge);
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(SeedError::ResponseTooLarge);
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}

async fn read_file(path: &Path) -> Result<Vec<u8>, SeedError> {
    let meta = tokio::fs::metadata(path).await?;
    if meta.len() > MAX_SEED_SIZE as u64 {
        return Err(SeedError::ResponseTooLarge);
    }
    Ok(tokio::fs::read(path).await?)
}
