//! Integration tests for the article table: provision, insert, query,
//! update, delete and clear.
//!
//! Each test creates its own SQLite database for isolation.

use ipsum_blog::article::{Article, ArticleCollection};
use ipsum_blog::storage::{ArticleField, Database};
use pretty_assertions::assert_eq;

async fn test_db() -> Database {
    Database::open(":memory:").await.unwrap()
}

fn test_article(title: &str, author: &str, category: &str) -> Article {
    Article {
        title: Some(title.to_string()),
        category: Some(category.to_string()),
        author: Some(author.to_string()),
        author_url: Some(format!("https://example.com/{}", author.to_lowercase())),
        published_on: Some("2024-01-01".to_string()),
        body: Some(format!("{title} by {author}")),
        ..Article::default()
    }
}

// ============================================================================
// Provisioning
// ============================================================================

#[tokio::test]
async fn test_new_database_is_empty() {
    let db = test_db().await;
    assert_eq!(db.count().await.unwrap(), 0);
    assert!(db.select_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_table_is_idempotent() {
    let db = test_db().await;
    db.insert_record(&test_article("T", "A", "c")).await.unwrap();

    db.create_table().await.unwrap();
    db.create_table().await.unwrap();

    assert_eq!(db.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_rows_survive_reopen() {
    let dir = std::env::temp_dir().join("ipsum_blog_store_test_reopen");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("articles.db");
    let _ = std::fs::remove_file(&path);
    let path_str = path.to_str().unwrap();

    {
        let db = Database::open(path_str).await.unwrap();
        db.insert_record(&test_article("Persisted", "A", "c"))
            .await
            .unwrap();
    }

    let db = Database::open(path_str).await.unwrap();
    let rows = db.select_all().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title.as_deref(), Some("Persisted"));

    std::fs::remove_dir_all(&dir).ok();
}

// ============================================================================
// Insert and Read
// ============================================================================

#[tokio::test]
async fn test_insert_assigns_increasing_ids() {
    let db = test_db().await;
    let id1 = db.insert_record(&test_article("One", "A", "c")).await.unwrap();
    let id2 = db.insert_record(&test_article("Two", "A", "c")).await.unwrap();
    assert!(id2 > id1);
}

#[tokio::test]
async fn test_round_trip_preserves_fields() {
    let db = test_db().await;
    let article = test_article("Round", "Alice", "tech");
    let id = db.insert_record(&article).await.unwrap();

    let rows = db.select_all().await.unwrap();
    assert_eq!(
        rows,
        vec![Article {
            id: Some(id),
            ..article
        }]
    );
}

#[tokio::test]
async fn test_partial_article_stores_nulls() {
    let db = test_db().await;
    let article = Article::from_props(serde_json::json!({"title": "T", "author": "A"})).unwrap();
    db.insert_record(&article).await.unwrap();

    let row = db.select_all().await.unwrap().remove(0);
    assert_eq!(row.title.as_deref(), Some("T"));
    assert_eq!(row.category, None);
    assert_eq!(row.published_on, None);
    assert_eq!(row.body, None);
    assert_eq!(row.word_count(), 0);
}

#[tokio::test]
async fn test_select_all_feeds_collection_in_order() {
    let db = test_db().await;
    let batch = vec![
        test_article("First", "Bob", "c"),
        test_article("Second", "Alice", "c"),
        test_article("Third", "Bob", "c"),
    ];
    assert_eq!(db.insert_records(&batch).await.unwrap(), 3);

    let collection = ArticleCollection::load_all(db.select_all().await.unwrap());
    let titles: Vec<_> = collection
        .iter()
        .map(|a| a.title.as_deref().unwrap())
        .collect();
    assert_eq!(titles, vec!["First", "Second", "Third"]);
    assert_eq!(collection.all_authors(), vec!["Bob", "Alice"]);
}

#[tokio::test]
async fn test_insert_empty_batch() {
    let db = test_db().await;
    assert_eq!(db.insert_records(&[]).await.unwrap(), 0);
}

#[tokio::test]
async fn test_find_where() {
    let db = test_db().await;
    db.insert_records(&[
        test_article("A1", "Alice", "tech"),
        test_article("B1", "Bob", "food"),
        test_article("A2", "Alice", "food"),
    ])
    .await
    .unwrap();

    let by_alice = db.find_where(ArticleField::Author, "Alice").await.unwrap();
    assert_eq!(by_alice.len(), 2);
    assert_eq!(by_alice[0].title.as_deref(), Some("A1"));

    let food = db.find_where(ArticleField::Category, "food").await.unwrap();
    assert_eq!(food.len(), 2);

    let none = db.find_where(ArticleField::Title, "missing").await.unwrap();
    assert!(none.is_empty());
}

// ============================================================================
// Update, Delete, Clear
// ============================================================================

#[tokio::test]
async fn test_update_record() {
    let db = test_db().await;
    let id = db
        .insert_record(&test_article("Old", "A", "c"))
        .await
        .unwrap();

    let mut article = db.select_all().await.unwrap().remove(0);
    article.title = Some("New".to_string());
    article.published_on = None;
    assert!(db.update_record(&article).await.unwrap());

    let rows = db.select_all().await.unwrap();
    assert_eq!(rows[0].id, Some(id));
    assert_eq!(rows[0].title.as_deref(), Some("New"));
    assert!(rows[0].is_draft());
}

#[tokio::test]
async fn test_update_unknown_id_matches_nothing() {
    let db = test_db().await;
    let article = Article {
        id: Some(4242),
        ..test_article("Ghost", "A", "c")
    };
    assert!(!db.update_record(&article).await.unwrap());
    assert_eq!(db.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_delete_record() {
    let db = test_db().await;
    let keep = db.insert_record(&test_article("Keep", "A", "c")).await.unwrap();
    let gone = db.insert_record(&test_article("Gone", "A", "c")).await.unwrap();

    assert!(db.delete_record(gone).await.unwrap());
    assert!(!db.delete_record(gone).await.unwrap());

    let rows = db.select_all().await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, Some(keep));
}

#[tokio::test]
async fn test_delete_does_not_touch_loaded_collection() {
    let db = test_db().await;
    let id = db.insert_record(&test_article("T", "A", "c")).await.unwrap();
    let collection = ArticleCollection::load_all(db.select_all().await.unwrap());

    db.delete_record(id).await.unwrap();

    assert_eq!(collection.len(), 1);
    assert_eq!(db.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_clear_table() {
    let db = test_db().await;
    db.insert_records(&[
        test_article("1", "A", "c"),
        test_article("2", "B", "c"),
    ])
    .await
    .unwrap();

    assert_eq!(db.clear_table().await.unwrap(), 2);
    assert_eq!(db.count().await.unwrap(), 0);
    assert_eq!(db.clear_table().await.unwrap(), 0);

    // Table still usable after clearing
    db.insert_record(&test_article("3", "C", "c")).await.unwrap();
    assert_eq!(db.count().await.unwrap(), 1);
}
