use crate::error::EmbedderError;
use crate::store::StoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unique knowledge-base entry identifier.
///
/// Ids are positive, 1-based, and dense: entry `id` owns embedding row
/// `id - 1`. Use [`to_index`](Self::to_index)/[`from_index`](Self::from_index)
/// to convert between the two without scattering `- 1` arithmetic around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntryId(u32);

impl EntryId {
    /// Creates an EntryId from a raw u32 value (must be >= 1).
    pub fn from_u32(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw u32 value of this id.
    pub fn as_u32(&self) -> u32 {
        self.0
    }

    /// Converts a 0-based embedding row index to the owning entry id.
    pub fn from_index(index: usize) -> Self {
        Self(index as u32 + 1)
    }

    /// Returns the 0-based embedding row index for this id.
    pub fn to_index(&self) -> usize {
        self.0 as usize - 1
    }
}

/// A knowledge-base entry.
///
/// Immutable after corpus construction. `question` is the searched text,
/// `answer` the returned payload; `category` is informational only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Unique entry identifier (1-based, dense)
    pub id: EntryId,
    /// Informational grouping label
    pub category: String,
    /// Question text (searched)
    pub question: String,
    /// Answer text (returned)
    pub answer: String,
}

/// A scored entry entering the reranker.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// The entry under consideration
    pub entry: Entry,
    /// Cosine similarity against the query, in [0, 1]
    pub vector_score: f32,
    /// The entry's embedding, when the caller has it at hand
    pub embedding: Option<Vec<f32>>,
}

/// A ranked search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// The matched entry
    pub entry: Entry,
    /// Cosine similarity plus additive boosts; may exceed 1.0
    pub score: f32,
    /// Tag of the reranker that produced this result
    pub method: String,
}

/// Error types for search operations.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Search was called before `initialize`
    #[error("Engine not initialized")]
    NotInitialized,
    /// The engine has been disposed; no further calls are valid
    #[error("Engine already disposed")]
    AlreadyDisposed,
    /// Dimension or id-range invariant violated by data or a capability
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),
    /// Entry store failure
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
    /// ANN index failure
    #[error("Index error: {0}")]
    Ann(#[from] AnnError),
    /// Embedder failure
    #[error("Embedder error: {0}")]
    Embedder(#[from] EmbedderError),
}

/// Errors that can occur during ANN index operations.
#[derive(Debug, Clone, Error)]
pub enum AnnError {
    /// Vector dimension doesn't match the index
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected vector dimension
        expected: usize,
        /// Actual vector dimension received
        actual: usize,
    },
    /// Index construction or query failed
    #[error("Index error: {0}")]
    IndexError(String),
}

/// Validates that a vector has the expected dimension.
pub(crate) fn validate_dimension(expected: usize, actual: usize) -> Result<(), SearchError> {
    if actual == expected {
        Ok(())
    } else {
        Err(SearchError::SchemaMismatch(format!(
            "expected embedding dimension {expected}, got {actual}"
        )))
    }
}

/// Validates that a subsystem-returned id falls in `[1, entry_count]`.
pub(crate) fn validate_id(id: EntryId, entry_count: usize) -> Result<(), SearchError> {
    let raw = id.as_u32() as usize;
    if raw >= 1 && raw <= entry_count {
        Ok(())
    } else {
        Err(SearchError::SchemaMismatch(format!(
            "id {raw} outside [1, {entry_count}]"
        )))
    }
}
