//! Compiled Handlebars templates.
//!
//! Double-stash expressions (`{{title}}`) are HTML-escaped; use triple-stash
//! (`{{{renderedBody}}}`) for markup that is already HTML.

use handlebars::{Handlebars, RenderError, TemplateError};
use serde::Serialize;

const TEMPLATE_NAME: &str = "article";

/// Template used when no custom article template is configured
pub const DEFAULT_ARTICLE_TEMPLATE: &str = r#"<article data-id="{{id}}" data-category="{{category}}">
  <header>
    <h1>{{title}}</h1>
    <div class="byline">
      By <address><a href="{{authorUrl}}">{{author}}</a></address>
      <span class="publish-status">{{publishStatus}}</span>
    </div>
  </header>
  <section class="article-body">{{{renderedBody}}}</section>
</article>
"#;

/// A compiled template handle for rendering one article
pub struct ArticleTemplate {
    registry: Handlebars<'static>,
}

impl ArticleTemplate {
    /// Compile a template from source
    pub fn compile(source: &str) -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        registry.register_template_string(TEMPLATE_NAME, source)?;
        Ok(Self { registry })
    }

    /// Compile [`DEFAULT_ARTICLE_TEMPLATE`]
    pub fn builtin() -> Result<Self, TemplateError> {
        Self::compile(DEFAULT_ARTICLE_TEMPLATE)
    }

    /// Render `data` through the template
    pub fn render<T: Serialize>(&self, data: &T) -> Result<String, RenderError> {
        self.registry.render(TEMPLATE_NAME, data)
    }
}

impl std::fmt::Debug for ArticleTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArticleTemplate").finish_non_exhaustive()
    }
}
