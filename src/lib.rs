//! Blog article model: SQLite persistence, seeding from JSON, Handlebars
//! rendering and word statistics.
//!
//! ```ignore
//! use ipsum_blog::{app::Blog, seed::SeedSource, storage::Database};
//! use ipsum_blog::{template::ArticleTemplate, view::IndexView};
//!
//! let db = Database::open("articles.db").await?;
//! let seed = SeedSource::http(reqwest::Client::new(), "http://localhost:8080/data/hackerIpsum.json")?;
//! let blog = Blog::new(db, seed);
//!
//! let mut view = IndexView::new(ArticleTemplate::builtin()?, std::io::stdout())?;
//! let articles = blog.fetch_all(&mut view).await?;
//! println!("{} words", articles.num_words_all());
//! ```

pub mod app;
pub mod article;
pub mod config;
pub mod seed;
pub mod storage;
pub mod template;
pub mod view;
