//! Linear keyword search over catalog records.
//!
//! # Responsibility
//! - Tokenize book text fields into lower-cased whitespace-separated words.
//! - Match query words against tokens, whole-token and case-insensitive.
//!
//! # Invariants
//! - Matching is exact token equality, never substring containment.
//! - A book appears once in the result per query word it matches, so one
//!   book can occur multiple times for multi-word queries.

use crate::model::book::Book;

/// Splits a book's combined text fields into lower-cased tokens.
pub fn tokenize(book: &Book) -> Vec<String> {
    book.combined_text()
        .split_whitespace()
        .map(|word| word.to_lowercase())
        .collect()
}

/// Scans `books` for whole-token matches of `words`.
///
/// Query words are lower-cased before comparison. Books are visited in the
/// order given, and matches keep that order. Duplicate hits for a book that
/// matches several query words are preserved.
pub fn search_for_words(books: &[Book], words: &[String]) -> Vec<Book> {
    let mut matches = Vec::new();

    for book in books {
        let tokens = tokenize(book);

        for word in words {
            let word = word.to_lowercase();
            if tokens.iter().any(|token| *token == word) {
                matches.push(book.clone());
            }
        }
    }

    matches
}
