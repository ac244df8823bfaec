use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use handlebars::RenderError;
use pulldown_cmark::{html, Parser};

use super::Article;
use crate::template::ArticleTemplate;

/// Publish status shown for articles without a publication date
pub const DRAFT_STATUS: &str = "(draft)";

/// Offset-less date-time layouts, tried after RFC 3339 (`%.f` allows fractions)
const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parse a stored publication date.
///
/// Accepts RFC 3339 timestamps, ISO date-times without an offset (`T` or
/// space separated, read as UTC) and plain `YYYY-MM-DD` dates (midnight UTC).
/// Blank input yields `None`.
pub fn parse_published(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt.and_utc());
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Whole days elapsed between `published` and `now`, truncated toward zero
pub fn days_since(published: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - published).num_days()
}

/// Status label for an article published `days_ago` days ago, or a draft
pub fn publish_status(days_ago: Option<i64>) -> String {
    match days_ago {
        Some(days) => format!("published {} days ago", days),
        None => DRAFT_STATUS.to_string(),
    }
}

/// Convert markdown to an HTML fragment
pub fn render_markdown(md: &str) -> String {
    let parser = Parser::new(md);
    let mut out = String::with_capacity(md.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

impl Article {
    /// Render the article through `template`, using the current time.
    pub fn to_html(&mut self, template: &ArticleTemplate) -> Result<String, RenderError> {
        self.to_html_at(Utc::now(), template)
    }

    /// Render the article as of `now`.
    ///
    /// Fills in `days_ago`, `publish_status` and `rendered_body` before
    /// rendering, and leaves them set afterwards. The raw `body` is untouched,
    /// so rendering twice produces the same markup for the same `now`.
    pub fn to_html_at(
        &mut self,
        now: DateTime<Utc>,
        template: &ArticleTemplate,
    ) -> Result<String, RenderError> {
        let published = match self.published_on.as_deref() {
            Some(raw) if !self.is_draft() => {
                let parsed = parse_published(raw);
                if parsed.is_none() {
                    tracing::warn!(id = ?self.id, published_on = %raw, "Unparseable publication date, rendering as draft");
                }
                parsed
            }
            _ => None,
        };

        self.days_ago = published.map(|p| days_since(p, now));
        self.publish_status = Some(publish_status(self.days_ago));
        self.rendered_body = Some(render_markdown(self.body.as_deref().unwrap_or_default()));

        template.render(&*self)
    }
}
