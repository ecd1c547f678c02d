//! Keyword search entry points.
//!
//! # Responsibility
//! - Expose the linear token-match scan over catalog records.
//! - Keep search result shaping inside core.

pub mod keyword;
