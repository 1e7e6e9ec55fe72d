//! Drives the catalog state against the API.
//!
//! Every successful mutation marks the local list stale and reloads it in
//! full; nothing is patched in place.

use crate::client::CatalogApi;

use super::state::{CatalogState, FormMode, Modal, NoticeLevel};

pub const FETCH_FAILED: &str = "Failed to fetch books";
pub const SAVE_FAILED: &str = "Error saving book";
pub const DELETE_FAILED: &str = "Error deleting book";

pub struct CatalogController<C> {
    client: C,
    state: CatalogState,
}

impl<C: CatalogApi> CatalogController<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            state: CatalogState::new(),
        }
    }

    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut CatalogState {
        &mut self.state
    }

    /// Fetch the full list and replace the local copy
    pub async fn reload(&mut self) -> bool {
        match self.client.list_books().await {
            Ok(books) => {
                tracing::debug!("Loaded {} books", books.len());
                self.state.load(books);
                true
            }
            Err(e) => {
                tracing::warn!("Fetching books failed: {}", e);
                self.state.notify(NoticeLevel::Error, FETCH_FAILED);
                false
            }
        }
    }

    /// Validate the open form and send it. Returns whether the save went through.
    ///
    /// A validation failure sends nothing and leaves the form untouched.
    pub async fn submit(&mut self, current_year: i32) -> bool {
        let Modal::FormOpen(mode) = self.state.modal() else {
            return false;
        };

        let book = match self.state.form().validate(current_year) {
            Ok(book) => book,
            Err(e) => {
                self.state.notify(NoticeLevel::Warning, e.to_string());
                return false;
            }
        };

        let (result, done) = match mode {
            FormMode::Create => (self.client.create_book(&book).await.map(|_| ()), "added"),
            FormMode::Edit(id) => (self.client.update_book(id, &book).await.map(|_| ()), "updated"),
        };

        if let Err(e) = result {
            tracing::warn!("Saving book failed: {}", e);
            self.state.notify(NoticeLevel::Error, SAVE_FAILED);
            return false;
        }

        self.state.finish_save();
        self.state
            .notify(NoticeLevel::Success, format!("Book {} successfully", done));
        self.reload().await;
        true
    }

    /// Perform the deletion awaiting confirmation. Returns whether it went through.
    pub async fn confirm_delete(&mut self) -> bool {
        let Modal::DeleteConfirm(id) = self.state.modal() else {
            return false;
        };

        if let Err(e) = self.client.delete_book(id).await {
            tracing::warn!("Deleting book {} failed: {}", id, e);
            self.state.notify(NoticeLevel::Error, DELETE_FAILED);
            return false;
        }

        self.state.finish_delete();
        self.state
            .notify(NoticeLevel::Success, "Book deleted successfully");
        self.reload().await;
        true
    }
}
