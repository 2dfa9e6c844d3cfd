//! Entry store capability.
//!
//! The engine treats the row store and its full-text index as an external
//! collaborator behind the [`EntryStore`] trait. Hosts typically back it
//! with an embedded database whose question column carries a prebuilt
//! inverted index; [`InMemoryEntryStore`] is provided for tests and small
//! corpora.
//!
//! # Contract notes
//!
//! - `fts_match` is best-effort: the engine recovers from its failure by
//!   continuing without the lexical signal.
//! - `fetch_entries` preserves no order; the engine reorders by id.

mod memory;

use crate::search::types::{Entry, EntryId};
use std::collections::HashMap;
use thiserror::Error;

pub use memory::InMemoryEntryStore;

/// Errors that can occur during entry store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Key/entry not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// I/O error (filesystem, database file, etc.)
    #[error("I/O error: {0}")]
    IoError(String),

    /// Full-text query could not be executed
    #[error("Full-text query failed: {0}")]
    FtsError(String),

    /// Database error
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Store already closed
    #[error("Store closed")]
    Closed,
}

/// Row store and full-text matcher for the knowledge base.
///
/// Implementations must be safe for concurrent read-only queries: a single
/// engine instance may serve overlapping searches.
#[async_trait::async_trait]
pub trait EntryStore: Send + Sync {
    /// Returns the id -> question map for the whole corpus.
    ///
    /// Called once at engine initialization to materialise the typo-scan
    /// table. Must cover every entry present in the store.
    async fn load_questions(&self) -> Result<HashMap<EntryId, String>, StoreError>;

    /// Executes a full-text match expression against the question index.
    ///
    /// Returns at most `limit` row ids, best matches first. Best-effort:
    /// the caller treats failure as "no lexical hits".
    async fn fts_match(&self, expr: &str, limit: usize) -> Result<Vec<EntryId>, StoreError>;

    /// Fetches full entries for the given ids.
    ///
    /// Result order is unspecified; the caller reorders by id.
    async fn fetch_entries(&self, ids: &[EntryId]) -> Result<Vec<Entry>, StoreError>;

    /// Releases store resources.
    ///
    /// Called once from engine disposal.
    async fn close(&self) -> Result<(), StoreError>;
}
