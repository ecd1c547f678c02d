//! Book domain model.
//!
//! # Responsibility
//! - Define the canonical catalog record and its pre-insert shape.
//!
//! # Invariants
//! - `id` is assigned by storage on insert and never reused for another book.
//! - Text fields carry no validation; empty strings are legal values.

use serde::{Deserialize, Serialize};

/// Stable identifier assigned by storage on insert.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type BookId = i64;

/// Canonical catalog record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Stable storage-assigned ID, immutable for the record's lifetime.
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub description: String,
}

/// Book fields before an ID exists. Input shape for insert paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub description: String,
}

impl BookDraft {
    /// Creates a draft from the three text fields.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            description: description.into(),
        }
    }
}

impl Book {
    /// Returns the concatenated text fields used as the search corpus.
    pub fn combined_text(&self) -> String {
        format!("{} {} {}", self.title, self.author, self.description)
    }
}
