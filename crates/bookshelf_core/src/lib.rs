//! Core domain logic for Bookshelf.
//! This crate is the single source of truth for catalog invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use config::{Config, ConfigError, LoggingConfig, StorageConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::book::{Book, BookDraft, BookId};
pub use repo::book_repo::{BookRepository, RepoError, RepoResult, SqliteBookRepository};
pub use search::keyword::{search_for_words, tokenize};
pub use service::book_service::BookService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
