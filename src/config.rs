//! Engine configuration with production defaults.
//!
//! A [`SearchConfig`] is immutable for the lifetime of an engine instance.
//! The schema-name fields are passed through to the [`EntryStore`]
//! implementation; the engine itself only uses `question_column` when
//! composing full-text match expressions.
//!
//! [`EntryStore`]: crate::store::EntryStore

/// Default number of results returned by a search when the caller has no
/// opinion.
pub const DEFAULT_LIMIT: usize = 3;

/// Engine configuration.
///
/// # Example
///
/// ```
/// use lorebook::config::SearchConfig;
///
/// let config = SearchConfig {
///     embedding_dim: 512,
///     ..SearchConfig::default()
/// };
/// assert_eq!(config.candidate_pool_size, 50);
/// ```
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Maximum number of vector-top candidates fed to the reranker.
    pub candidate_pool_size: usize,
    /// Maximum rows requested from a single full-text match call.
    pub fts_limit: usize,
    /// Minimum corpus size at which the HNSW index is built.
    ///
    /// Below this, every query runs a linear cosine scan, which is both
    /// exact and fast enough for small corpora.
    pub hnsw_threshold: usize,
    /// Neighbours requested from the ANN index per query.
    ///
    /// Must be >= `candidate_pool_size` so the pool can be filled from the
    /// ANN result alone.
    pub hnsw_search_k: usize,
    /// HNSW graph fan-out (M).
    ///
    /// The bundled [`HnswAnnIndex`](crate::search::vector::HnswAnnIndex)
    /// compiles with M = 16 / M0 = 32; this field exists so custom
    /// [`AnnIndex`](crate::search::vector::AnnIndex) implementations can
    /// honour a different fan-out.
    pub hnsw_m: usize,
    /// HNSW search-list width (ef).
    pub hnsw_ef: usize,
    /// Embedding vector length; must match the embedder's output.
    pub embedding_dim: usize,
    /// Entry table name, passed through to the store.
    pub table_name: String,
    /// Full-text index table name, passed through to the store.
    pub fts_table_name: String,
    /// Id column name.
    pub id_column: String,
    /// Category column name.
    pub category_column: String,
    /// Question column name; used in full-text match expressions.
    pub question_column: String,
    /// Answer column name.
    pub answer_column: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            candidate_pool_size: 50,
            fts_limit: 50,
            hnsw_threshold: 1000,
            hnsw_search_k: 100,
            hnsw_m: 16,
            hnsw_ef: 64,
            embedding_dim: 128,
            table_name: "entries".to_string(),
            fts_table_name: "fts".to_string(),
            id_column: "id".to_string(),
            category_column: "category".to_string(),
            question_column: "question".to_string(),
            answer_column: "answer".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_consistent() {
        let config = SearchConfig::default();
        // The ANN result alone must be able to fill the candidate pool.
        assert!(config.hnsw_search_k >= config.candidate_pool_size);
        assert_eq!(config.embedding_dim, 128);
        assert_eq!(config.question_column, "question");
    }
}
