//! Catalog UI state container

use crate::models::book::Book;

use super::form::BookForm;

/// What the form is being used for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

/// Modal visibility; exactly one at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Modal {
    #[default]
    Browsing,
    FormOpen(FormMode),
    DeleteConfirm(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// Transient message shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Local copy of the catalog plus all view state for one session
#[derive(Debug, Default)]
pub struct CatalogState {
    books: Vec<Book>,
    stale: bool,
    modal: Modal,
    form: BookForm,
    search: String,
    notice: Option<Notice>,
}

impl CatalogState {
    pub fn new() -> Self {
        Self {
            stale: true,
            ..Self::default()
        }
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Whether the local list must be reloaded before it can be trusted
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn modal(&self) -> Modal {
        self.modal
    }

    pub fn form(&self) -> &BookForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut BookForm {
        &mut self.form
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
    }

    /// Books matching the current search, in list order
    pub fn filtered_books(&self) -> Vec<&Book> {
        self.books.iter().filter(|b| b.matches(&self.search)).collect()
    }

    pub fn book(&self, id: i64) -> Option<&Book> {
        self.books.iter().find(|b| b.b_id == id)
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notice = Some(Notice {
            level,
            message: message.into(),
        });
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    /// "Add": open an empty form. Ignored unless browsing.
    pub fn open_create(&mut self) -> bool {
        if self.modal != Modal::Browsing {
            return false;
        }
        self.form.clear();
        self.modal = Modal::FormOpen(FormMode::Create);
        true
    }

    /// "Edit": open the form pre-filled with the record. Ignored unless browsing
    /// and the record is loaded.
    pub fn open_edit(&mut self, id: i64) -> bool {
        if self.modal != Modal::Browsing {
            return false;
        }
        let Some(book) = self.book(id) else {
            return false;
        };
        self.form = BookForm::from_book(book);
        self.modal = Modal::FormOpen(FormMode::Edit(id));
        true
    }

    /// "Delete": ask for confirmation. Ignored unless browsing.
    pub fn request_delete(&mut self, id: i64) -> bool {
        if self.modal != Modal::Browsing {
            return false;
        }
        self.modal = Modal::DeleteConfirm(id);
        true
    }

    /// Cancel the open form or decline the deletion
    pub fn cancel(&mut self) {
        self.modal = Modal::Browsing;
    }

    /// A save went through: close the form and drop its contents
    pub(crate) fn finish_save(&mut self) {
        self.form.clear();
        self.modal = Modal::Browsing;
        self.stale = true;
    }

    /// A delete went through
    pub(crate) fn finish_delete(&mut self) {
        self.modal = Modal::Browsing;
        self.stale = true;
    }

    /// Replace the local copy with a freshly fetched list
    pub(crate) fn load(&mut self, books: Vec<Book>) {
        self.books = books;
        self.stale = false;
    }
}
