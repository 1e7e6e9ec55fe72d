//! Book form data and client-side validation

use std::fmt;

use thiserror::Error;

use crate::models::book::{Book, NewBook};

/// Form fields, in display and validation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Title,
    Author,
    Genre,
    PublicationYear,
    Price,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Title,
        FormField::Author,
        FormField::Genre,
        FormField::PublicationYear,
        FormField::Price,
    ];

    /// Wire name of the field
    pub fn name(self) -> &'static str {
        match self {
            FormField::Title => "title",
            FormField::Author => "author",
            FormField::Genre => "genre",
            FormField::PublicationYear => "publication_year",
            FormField::Price => "price",
        }
    }

    pub fn next(self) -> Self {
        let idx = self as usize;
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = self as usize;
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FormField::Title => "Title",
            FormField::Author => "Author",
            FormField::Genre => "Genre",
            FormField::PublicationYear => "Publication year",
            FormField::Price => "Price",
        };
        f.write_str(label)
    }
}

/// First validation failure found in a form. `Display` is the user-facing warning.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    #[error("{0} is required and must be a valid string.")]
    InvalidText(FormField),

    #[error("Publication year must be a valid year not in the future.")]
    InvalidYear,

    #[error("Price must be a non-negative number.")]
    InvalidPrice,
}

/// Raw form values keyed by field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookForm {
    values: [String; 5],
}

impl BookForm {
    /// Pre-fill from an existing record
    pub fn from_book(book: &Book) -> Self {
        let mut form = Self::default();
        form.set(FormField::Title, book.title.clone());
        form.set(FormField::Author, book.author.clone());
        form.set(FormField::Genre, book.genre.clone());
        form.set(FormField::PublicationYear, book.published_year.to_string());
        form.set(FormField::Price, book.price.to_string());
        form
    }

    pub fn get(&self, field: FormField) -> &str {
        &self.values[field as usize]
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        self.values[field as usize] = value.into();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Check every field in order and build the request payload.
    pub fn validate(&self, current_year: i32) -> Result<NewBook, FormError> {
        for field in [FormField::Title, FormField::Author, FormField::Genre] {
            if !is_meaningful_text(self.get(field)) {
                return Err(FormError::InvalidText(field));
            }
        }

        let publication_year = self
            .get(FormField::PublicationYear)
            .trim()
            .parse::<i32>()
            .ok()
            .filter(|year| *year <= current_year)
            .ok_or(FormError::InvalidYear)?;

        let price = self
            .get(FormField::Price)
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|price| price.is_finite() && *price >= 0.0)
            .ok_or(FormError::InvalidPrice)?;

        Ok(NewBook {
            title: self.get(FormField::Title).to_string(),
            author: self.get(FormField::Author).to_string(),
            genre: self.get(FormField::Genre).to_string(),
            publication_year,
            price,
        })
    }
}

/// Non-blank and containing at least one letter
fn is_meaningful_text(value: &str) -> bool {
    !value.trim().is_empty() && value.chars().any(char::is_alphabetic)
}
