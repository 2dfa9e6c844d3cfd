//! Hybrid search over a question/answer corpus.
//!
//! This module fuses three retrieval signals into one ranked list:
//!
//! - **Vector search** (cosine similarity; HNSW above a corpus-size
//!   threshold, exact linear scan below it)
//! - **Full-text search** (lexical match delegated to the entry store)
//! - **Typo match** (1-edit-distance token matching)
//!
//! # Architecture
//!
//! - [`types`]: core types (EntryId, Entry, Candidate, SearchResult,
//!   SearchError)
//! - [`engine`]: [`HybridSearchEngine`] orchestrating the per-query
//!   pipeline
//! - [`vector`]: cosine helpers and the [`AnnIndex`](vector::AnnIndex)
//!   capability with its bundled HNSW implementation
//! - [`ranking`]: pure utilities (tokenisation, match expressions, 1-edit
//!   matching, boosts, perfect-match shortcut)
//! - [`rerank`]: the [`Reranker`](rerank::Reranker) capability and the
//!   default [`HeuristicReranker`](rerank::HeuristicReranker)
//!
//! # Scoring
//!
//! The reranker adds at most one keyword boost (full-text `0.5` or
//! typo-only `0.7`) plus a concise-match boost (up to `0.5`) on top of the
//! cosine score, so final scores may exceed 1.0. If exactly one result
//! clears the perfect-score threshold, it is returned alone.

pub mod engine;
pub mod ranking;
pub mod rerank;
pub mod types;
pub mod vector;

pub use engine::HybridSearchEngine;
pub use rerank::{HeuristicReranker, RerankInputs, Reranker};
pub use types::{AnnError, Candidate, Entry, EntryId, SearchError, SearchResult};
pub use vector::{AnnIndex, HnswAnnIndex};
