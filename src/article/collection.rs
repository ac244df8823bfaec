use serde::Serialize;
use std::collections::HashSet;

use super::Article;

/// Word total for one author
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorWords {
    pub name: String,
    pub num_words: usize,
}

/// Summary numbers for the admin page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleStats {
    pub num_articles: usize,
    pub num_authors: usize,
    pub num_words_all: usize,
    pub words_by_author: Vec<AuthorWords>,
}

/// A loaded snapshot of the articles table.
///
/// Loading always builds a complete new snapshot; nothing is merged into an
/// existing one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArticleCollection {
    articles: Vec<Article>,
}

impl ArticleCollection {
    /// Build a collection from rows, keeping their order
    pub fn load_all(rows: impl IntoIterator<Item = Article>) -> Self {
        Self {
            articles: rows.into_iter().collect(),
        }
    }

    /// Replace the whole snapshot with `rows`
    pub fn replace(&mut self, rows: impl IntoIterator<Item = Article>) {
        *self = Self::load_all(rows);
    }

    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Article> {
        self.articles.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Article> {
        self.articles.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Distinct author names in order of first appearance.
    ///
    /// Articles without an author are skipped.
    pub fn all_authors(&self) -> Vec<&str> {
        distinct(self.articles.iter().filter_map(|a| a.author.as_deref()))
    }

    /// Distinct categories in order of first appearance
    pub fn all_categories(&self) -> Vec<&str> {
        distinct(self.articles.iter().filter_map(|a| a.category.as_deref()))
    }

    /// Total words across every article; zero when the collection is empty
    pub fn num_words_all(&self) -> usize {
        self.articles.iter().map(Article::word_count).sum()
    }

    /// Word totals per author, in [`all_authors`](Self::all_authors) order
    pub fn num_words_by_author(&self) -> Vec<AuthorWords> {
        self.all_authors()
            .into_iter()
            .map(|name| AuthorWords {
                name: name.to_string(),
                num_words: self
                    .articles
                    .iter()
                    .filter(|a| a.author.as_deref() == Some(name))
                    .map(Article::word_count)
                    .sum(),
            })
            .collect()
    }

    pub fn stats(&self) -> ArticleStats {
        let words_by_author = self.num_words_by_author();
        ArticleStats {
            num_articles: self.len(),
            num_authors: words_by_author.len(),
            num_words_all: self.num_words_all(),
            words_by_author,
        }
    }
}

impl<'a> IntoIterator for &'a ArticleCollection {
    type Item = &'a Article;
    type IntoIter = std::slice::Iter<'a, Article>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    values.filter(|v| seen.insert(*v)).collect()
}
