//! Seed data for an empty article store.
//!
//! The seed is a JSON array of article property bags, fetched over HTTP or
//! read from a local file. Each element goes through
//! [`Article::from_props`](crate::article::Article::from_props), so unknown
//! keys are ignored and missing ones stay empty.

mod fetcher;

pub use fetcher::{parse_seed, SeedError, SeedSource};
