use anyhow::{Context, Result};
use handlebars::Handlebars;
use std::io::Write;

use super::ArticleView;
use crate::article::ArticleCollection;

const STATS_TEMPLATE: &str = r#"<section id="blog-stats">
  <p class="article-count">Number of articles: {{numArticles}}</p>
  <p class="author-count">Number of authors: {{numAuthors}}</p>
  <p class="word-count">Total words: {{numWordsAll}}</p>
  <ul class="author-stats">
{{#each wordsByAuthor}}    <li>{{name}}: {{numWords}} words</li>
{{/each}}  </ul>
</section>
"#;

/// Admin statistics page written to `out`
pub struct AdminView<W: Write> {
    page: Handlebars<'static>,
    out: W,
}

impl<W: Write> AdminView<W> {
    pub fn new(out: W) -> Result<Self> {
        let mut page = Handlebars::new();
        page.register_template_string("stats", STATS_TEMPLATE)
            .context("Failed to compile stats template")?;
        Ok(Self { page, out })
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ArticleView for AdminView<W> {
    fn render_index_page(&mut self, articles: &mut ArticleCollection) -> Result<()> {
        let stats = articles.stats();
        let html = self
            .page
            .render("stats", &stats)
            .context("Failed to render stats page")?;

        self.out.write_all(html.as_bytes())?;
        self.out.flush()?;

        tracing::debug!(
            articles = stats.num_articles,
            authors = stats.num_authors,
            words = stats.num_words_all,
            "Rendered stats page"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::Article;

    fn article(author: &str, body: &str) -> Article {
        Article {
            author: Some(author.to_string()),
            body: Some(body.to_string()),
            ..Article::default()
        }
    }

    #[test]
    fn test_renders_stats() {
        let mut articles = ArticleCollection::load_all(vec![
            article("Bob", "a b"),
            article("Alice", "c d e"),
        ]);

        let mut view = AdminView::new(Vec::new()).unwrap();
        view.render_index_page(&mut articles).unwrap();
        let html = String::from_utf8(view.into_inner()).unwrap();

        assert!(html.contains("Number of articles: 2"));
        assert!(html.contains("Number of authors: 2"));
        assert!(html.contains("Total words: 5"));
        let bob = html.find("<li>Bob: 2 words</li>").unwrap();
        let alice = html.find("<li>Alice: 3 words</li>").unwrap();
        assert!(bob < alice);
    }

    #[test]
    fn test_empty_collection_reports_zero() {
        let mut view = AdminView::new(Vec::new()).unwrap();
        view.render_index_page(&mut ArticleCollection::default())
            .unwrap();
        let html = String::from_utf8(view.into_inner()).unwrap();

        assert!(html.contains("Number of articles: 0"));
        assert!(html.contains("Total words: 0"));
    }
}
