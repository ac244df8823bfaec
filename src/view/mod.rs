//! Page rendering for loaded article collections.
//!
//! [`ArticleView`] is the entry point the fetch pipeline hands control to once
//! a collection is loaded. Two pages implement it:
//!
//! - [`IndexView`] - every article through the article template, plus author
//!   and category filter lists
//! - [`AdminView`] - article, author and word statistics

mod admin;
mod index;

pub use admin::AdminView;
pub use index::IndexView;

use anyhow::Result;

use crate::article::ArticleCollection;

/// A page that renders the current article collection.
pub trait ArticleView {
    /// Render the page for `articles`.
    ///
    /// Rendering may fill in the derived display fields of each article.
    fn render_index_page(&mut self, articles: &mut ArticleCollection) -> Result<()>;
}
