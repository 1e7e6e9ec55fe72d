//! Books repository

use sqlx::{Pool, Sqlite};

use crate::{
    error::AppResult,
    models::book::{Book, BookInput, NewBook},
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Sqlite>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }

    /// List all books, in no particular order
    pub async fn list(&self) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, Book>("SELECT * FROM books")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Insert a new book and return its assigned identifier
    pub async fn insert(&self, book: &NewBook) -> AppResult<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO books (title, author, genre, published_year, price)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.genre)
        .bind(book.publication_year)
        .bind(book.price)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Overwrite every field of the book with the given id.
    ///
    /// Missing fields bind NULL. Succeeds without effect when no row matches.
    pub async fn replace(&self, id: i64, book: &BookInput) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE books
            SET title = ?, author = ?, genre = ?, published_year = ?, price = ?
            WHERE b_id = ?
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.genre)
        .bind(book.publication_year)
        .bind(book.price)
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Delete the book with the given id. Succeeds without effect when no row matches.
    pub async fn remove(&self, id: i64) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM books WHERE b_id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
