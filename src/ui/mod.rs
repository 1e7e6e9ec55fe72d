//! Catalog UI core
//!
//! Everything here is independent of the rendering backend: the form with
//! client-side validation, the state container driven by [`state::Modal`], and
//! the controller that talks to the API and reloads after each mutation.

pub mod controller;
pub mod form;
pub mod state;
#[cfg(feature = "tui")]
pub mod tui;

use chrono::Datelike;

pub use controller::CatalogController;
pub use form::{BookForm, FormError, FormField};
pub use state::{CatalogState, FormMode, Modal, Notice, NoticeLevel};

/// Current calendar year in local time
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}
