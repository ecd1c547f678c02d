//! Book use-case service.
//!
//! # Responsibility
//! - Provide stable catalog entry points for core callers.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::model::book::{Book, BookDraft, BookId};
use crate::repo::book_repo::{BookRepository, RepoError, RepoResult};
use crate::search::keyword::search_for_words;
use log::debug;

/// Use-case service wrapper for catalog operations.
pub struct BookService<R: BookRepository> {
    repo: R,
}

impl<R: BookRepository> BookService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns the number of stored books.
    pub fn count(&self) -> RepoResult<u64> {
        self.repo.count()
    }

    /// Returns all book ids in ascending order.
    ///
    /// Re-queries storage on every call, so the result always reflects the
    /// current persisted state.
    pub fn list_ids(&self) -> RepoResult<Vec<BookId>> {
        self.repo.list_ids()
    }

    /// Lists all books ordered by ascending id.
    pub fn list(&self) -> RepoResult<Vec<Book>> {
        self.repo.list_books()
    }

    /// Gets one book by id.
    ///
    /// # Errors
    /// - `RepoError::NotFound` when no book has the given id.
    pub fn get_by_id(&self, id: BookId) -> RepoResult<Book> {
        self.repo.get_book(id)?.ok_or(RepoError::NotFound(id))
    }

    /// Creates and persists a new book, returning its assigned id.
    ///
    /// # Contract
    /// - No validation; empty strings are accepted for every field.
    pub fn add(
        &self,
        title: impl Into<String>,
        author: impl Into<String>,
        description: impl Into<String>,
    ) -> RepoResult<BookId> {
        let draft = BookDraft::new(title, author, description);
        let id = self.repo.insert_book(&draft)?;
        debug!("event=book_add module=service status=ok book_id={id}");
        Ok(id)
    }

    /// Updates an existing book, treating empty field values as "keep".
    ///
    /// # Contract
    /// - Fails with `RepoError::NotFound` when the id is unknown.
    /// - Each field is replaced only when the supplied value is non-empty,
    ///   otherwise the stored value is left unchanged.
    pub fn edit(
        &self,
        id: BookId,
        new_title: &str,
        new_author: &str,
        new_description: &str,
    ) -> RepoResult<()> {
        let mut book = self.get_by_id(id)?;

        if !new_title.is_empty() {
            book.title = new_title.to_string();
        }
        if !new_author.is_empty() {
            book.author = new_author.to_string();
        }
        if !new_description.is_empty() {
            book.description = new_description.to_string();
        }

        self.repo.update_book(&book)?;
        debug!("event=book_edit module=service status=ok book_id={id}");
        Ok(())
    }

    /// Searches all books for whole-token matches of the query words.
    ///
    /// Linear scan over the catalog; matching is case-insensitive exact
    /// token equality over the concatenated text fields. A book matching
    /// several query words appears once per matched word.
    pub fn search_for_words(&self, words: &[String]) -> RepoResult<Vec<Book>> {
        let books = self.repo.list_books()?;
        let matches = search_for_words(&books, words);
        debug!(
            "event=book_search module=service status=ok words={} hits={}",
            words.len(),
            matches.len()
        );
        Ok(matches)
    }

    /// Flushes pending writes to persistent storage.
    pub fn save(&self) -> RepoResult<()> {
        self.repo.flush()
    }
}
