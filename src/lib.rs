//! # Lorebook
//!
//! Offline hybrid search over a local knowledge base of short
//! question/answer entries. Three retrieval signals are fused into a single
//! ranked list, entirely in-process:
//!
//! - **Vector search** - cosine similarity over precomputed embeddings
//!   (HNSW above a corpus-size threshold, linear scan below it)
//! - **Lexical search** - full-text match against the question column,
//!   delegated to the host's [`EntryStore`](store::EntryStore)
//! - **Typo match** - 1-edit-distance token matching for misspelled queries
//!
//! ## Modules
//!
//! - [`search`] - the engine, the heuristic reranker, and the ranking
//!   utilities (tokenisation, typo matching, boosts)
//! - [`embedding`] - the [`Embedder`](embedding::Embedder) capability and
//!   the Float16 codec for precomputed embedding blobs
//! - [`store`] - the [`EntryStore`](store::EntryStore) capability plus an
//!   in-memory implementation for tests
//! - [`config`] - engine configuration with production defaults
//! - [`error`] - error types for the embedder and codec boundaries
//!
//! ## Usage
//!
//! ```ignore
//! use lorebook::config::SearchConfig;
//! use lorebook::embedding::f16::decode_embeddings;
//! use lorebook::search::HybridSearchEngine;
//!
//! let embeddings = decode_embeddings(&blob)?;
//! let mut engine = HybridSearchEngine::new(embedder, store, embeddings, SearchConfig::default());
//! engine.initialize().await?;
//!
//! let results = engine.search("how do isolates work", 3).await?;
//! ```

pub mod config;
pub mod embedding;
pub mod error;
pub mod search;
pub mod store;

pub use config::SearchConfig;
pub use search::{Candidate, Entry, EntryId, HybridSearchEngine, SearchError, SearchResult};
