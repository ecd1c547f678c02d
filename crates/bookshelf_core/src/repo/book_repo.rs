//! Book repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over canonical `books` storage.
//! - Keep SQL details inside core persistence boundary.
//!
//! # Invariants
//! - List and id queries are ordered by ascending `id`.
//! - Read paths reject invalid persisted state instead of masking it.

use crate::db::DbError;
use crate::model::book::{Book, BookDraft, BookId};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const BOOK_SELECT_SQL: &str = "SELECT
    id,
    title,
    author,
    description
FROM books";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for book persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(BookId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "book not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted book data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for book CRUD operations.
pub trait BookRepository {
    /// Returns the number of stored books.
    fn count(&self) -> RepoResult<u64>;
    /// Returns all book ids in ascending order, re-queried on every call.
    fn list_ids(&self) -> RepoResult<Vec<BookId>>;
    /// Returns all books ordered by ascending id.
    fn list_books(&self) -> RepoResult<Vec<Book>>;
    /// Gets one book by id. Returns `None` when no such record exists.
    fn get_book(&self, id: BookId) -> RepoResult<Option<Book>>;
    /// Persists a new book and returns its storage-assigned id.
    fn insert_book(&self, draft: &BookDraft) -> RepoResult<BookId>;
    /// Replaces all text fields of an existing book.
    fn update_book(&self, book: &Book) -> RepoResult<()>;
    /// Flushes dirty pager state to persistent storage.
    fn flush(&self) -> RepoResult<()>;
}

/// SQLite-backed book repository.
pub struct SqliteBookRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBookRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl BookRepository for SqliteBookRepository<'_> {
    fn count(&self) -> RepoResult<u64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM books;", [], |row| {
                row.get::<_, i64>(0)
            })?;

        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative row count `{count}`")))
    }

    fn list_ids(&self) -> RepoResult<Vec<BookId>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id FROM books ORDER BY id ASC;")?;
        let mut rows = stmt.query([])?;
        let mut ids = Vec::new();

        while let Some(row) = rows.next()? {
            ids.push(row.get::<_, BookId>(0)?);
        }

        Ok(ids)
    }

    fn list_books(&self) -> RepoResult<Vec<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut books = Vec::new();

        while let Some(row) = rows.next()? {
            books.push(parse_book_row(row)?);
        }

        Ok(books)
    }

    fn get_book(&self, id: BookId) -> RepoResult<Option<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_book_row(row)?));
        }

        Ok(None)
    }

    fn insert_book(&self, draft: &BookDraft) -> RepoResult<BookId> {
        self.conn.execute(
            "INSERT INTO books (title, author, description) VALUES (?1, ?2, ?3);",
            params![
                draft.title.as_str(),
                draft.author.as_str(),
                draft.description.as_str(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_book(&self, book: &Book) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE books
             SET
                title = ?1,
                author = ?2,
                description = ?3
             WHERE id = ?4;",
            params![
                book.title.as_str(),
                book.author.as_str(),
                book.description.as_str(),
                book.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(book.id));
        }

        Ok(())
    }

    fn flush(&self) -> RepoResult<()> {
        self.conn.cache_flush()?;
        Ok(())
    }
}

fn parse_book_row(row: &Row<'_>) -> RepoResult<Book> {
    let id: BookId = row.get("id")?;
    if id <= 0 {
        return Err(RepoError::InvalidData(format!(
            "invalid id value `{id}` in books.id"
        )));
    }

    Ok(Book {
        id,
        title: row.get("title")?,
        author: row.get("author")?,
        description: row.get("description")?,
    })
}
