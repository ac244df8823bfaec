use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use handlebars::Handlebars;
use serde::Serialize;
use std::io::Write;

use super::ArticleView;
use crate::article::ArticleCollection;
use crate::template::ArticleTemplate;

const PAGE_TEMPLATE: &str = r#"<nav class="filters">
  <select id="author-filter">
    <option value="">-- Filter by Author --</option>
{{#each authors}}    <option value="{{this}}">{{this}}</option>
{{/each}}  </select>
  <select id="category-filter">
    <option value="">-- Filter by Category --</option>
{{#each categories}}    <option value="{{this}}">{{this}}</option>
{{/each}}  </select>
</nav>
<section id="articles">
{{#each articles}}{{{this}}}{{/each}}</section>
"#;

#[derive(Serialize)]
struct IndexPage<'a> {
    authors: Vec<&'a str>,
    categories: Vec<&'a str>,
    articles: Vec<String>,
}

/// HTML index page written to `out`
pub struct IndexView<W: Write> {
    template: ArticleTemplate,
    page: Handlebars<'static>,
    out: W,
    now: Option<DateTime<Utc>>,
}

impl<W: Write> IndexView<W> {
    pub fn new(template: ArticleTemplate, out: W) -> Result<Self> {
        let mut page = Handlebars::new();
        page.register_template_string("index", PAGE_TEMPLATE)
            .context("Failed to compile index page template")?;

        Ok(Self {
            template,
            page,
            out,
            now: None,
        })
    }

    /// Render relative dates as of `now` instead of the current time
    pub fn at(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ArticleView for IndexView<W> {
    fn render_index_page(&mut self, articles: &mut ArticleCollection) -> Result<()> {
        let now = self.now.unwrap_or_else(Utc::now);

        let rendered = articles
            .iter_mut()
            .map(|article| {
                article
                    .to_html_at(now, &self.template)
                    .with_context(|| format!("Failed to render article {:?}", article.id))
            })
            .collect::<Result<Vec<_>>>()?;

        let page = IndexPage {
            authors: articles.all_authors(),
            categories: articles.all_categories(),
            articles: rendered,
        };
        let html = self
            .page
            .render("index", &page)
            .context("Failed to render index page")?;

        self.out.write_all(html.as_bytes())?;
        self.out.flush()?;

        tracing::debug!(articles = articles.len(), "Rendered index page");
        Ok(())
    }
}
