//! Catalog management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookInput, CreatedBook},
    repository::Repository,
};

/// Message returned when a create payload is incomplete
pub const INVALID_FIELDS: &str = "All fields must be valid.";

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List every book in the catalog
    pub async fn list_books(&self) -> AppResult<Vec<Book>> {
        self.repository.books.list().await
    }

    /// Create a book after checking every field is present and non-empty.
    ///
    /// Only presence is checked here; letter-content and year bounds are
    /// enforced by the client form.
    pub async fn create_book(&self, input: BookInput) -> AppResult<CreatedBook> {
        if let Err(errors) = input.validate() {
            tracing::debug!("Create rejected: {}", errors);
            return Err(AppError::Validation(INVALID_FIELDS.to_string()));
        }
        let book = input
            .into_new_book()
            .ok_or_else(|| AppError::Validation(INVALID_FIELDS.to_string()))?;

        let b_id = self.repository.books.insert(&book).await?;
        tracing::info!("Created book id={} title={:?}", b_id, book.title);

        Ok(CreatedBook { b_id, book })
    }

    /// Replace all fields of a book. No validation and no existence check.
    pub async fn update_book(&self, id: i64, input: &BookInput) -> AppResult<()> {
        let affected = self.repository.books.replace(id, input).await?;
        if affected == 0 {
            tracing::warn!("Update matched no book with id={}", id);
        } else {
            tracing::info!("Updated book id={}", id);
        }
        Ok(())
    }

    /// Delete a book. Unknown ids are not an error.
    pub async fn delete_book(&self, id: i64) -> AppResult<()> {
        let affected = self.repository.books.remove(id).await?;
        if affected == 0 {
            tracing::warn!("Delete matched no book with id={}", id);
        } else {
            tracing::info!("Deleted book id={}", id);
        }
        Ok(())
    }
}
