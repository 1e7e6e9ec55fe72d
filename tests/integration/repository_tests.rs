//! Store tests against a database file on disk

use book_catalog::{
    config::DatabaseConfig,
    models::{BookInput, NewBook},
    repository::Repository,
};
use tempfile::TempDir;

fn file_config(dir: &TempDir) -> DatabaseConfig {
    DatabaseConfig {
        url: format!("sqlite://{}", dir.path().join("books.db").display()),
        max_connections: 2,
        min_connections: 1,
    }
}

fn hobbit() -> NewBook {
    NewBook {
        title: "The Hobbit".to_string(),
        author: "Tolkien".to_string(),
        genre: "Fantasy".to_string(),
        publication_year: 1937,
        price: 12.5,
    }
}

#[tokio::test]
async fn test_creates_file_and_persists_across_reopen() {
    let dir = TempDir::new().unwrap();
    let config = file_config(&dir);

    let id = {
        let repo = Repository::connect(&config).await.unwrap();
        let id = repo.books.insert(&hobbit()).await.unwrap();
        repo.pool.close().await;
        id
    };
    assert!(dir.path().join("books.db").exists());

    let repo = Repository::connect(&config).await.unwrap();
    let books = repo.books.list().await.unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].b_id, id);
    assert_eq!(books[0].published_year, 1937);
}

#[tokio::test]
async fn test_insert_assigns_increasing_ids() {
    let dir = TempDir::new().unwrap();
    let repo = Repository::connect(&file_config(&dir)).await.unwrap();

    let first = repo.books.insert(&hobbit()).await.unwrap();
    let second = repo.books.insert(&hobbit()).await.unwrap();
    assert!(second > first);
}

#[tokio::test]
async fn test_ids_are_not_reused_after_delete() {
    let dir = TempDir::new().unwrap();
    let repo = Repository::connect(&file_config(&dir)).await.unwrap();

    let first = repo.books.insert(&hobbit()).await.unwrap();
    repo.books.remove(first).await.unwrap();
    let second = repo.books.insert(&hobbit()).await.unwrap();
    assert_ne!(first, second);
}

#[tokio::test]
async fn test_replace_and_remove_report_affected_rows() {
    let dir = TempDir::new().unwrap();
    let repo = Repository::connect(&file_config(&dir)).await.unwrap();
    let id = repo.books.insert(&hobbit()).await.unwrap();

    let mut changed = hobbit();
    changed.price = 8.0;
    assert_eq!(repo.books.replace(id, &BookInput::from(changed)).await.unwrap(), 1);
    assert_eq!(repo.books.list().await.unwrap()[0].price, 8.0);

    assert_eq!(repo.books.replace(id + 100, &BookInput::from(hobbit())).await.unwrap(), 0);
    assert_eq!(repo.books.remove(id + 100).await.unwrap(), 0);
    assert_eq!(repo.books.remove(id).await.unwrap(), 1);
    assert!(repo.books.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_replace_with_missing_field_fails() {
    let dir = TempDir::new().unwrap();
    let repo = Repository::connect(&file_config(&dir)).await.unwrap();
    let id = repo.books.insert(&hobbit()).await.unwrap();

    let partial = BookInput {
        title: Some("No author".to_string()),
        ..BookInput::default()
    };
    assert!(repo.books.replace(id, &partial).await.is_err());
}

#[tokio::test]
async fn test_ping() {
    let dir = TempDir::new().unwrap();
    let repo = Repository::connect(&file_config(&dir)).await.unwrap();
    assert!(repo.ping().await.is_ok());
}
