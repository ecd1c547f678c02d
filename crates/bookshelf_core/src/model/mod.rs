//! Domain model for the book catalog.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//!
//! # Invariants
//! - Every book is identified by a stable `BookId` once persisted.
//! - Records are never hard-deleted by core code.

pub mod book;
