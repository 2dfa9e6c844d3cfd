//! Error types for the embedding boundary.
//!
//! Engine-level errors live in [`crate::search::types::SearchError`]; store
//! errors live in [`crate::store::StoreError`]. This module holds the errors
//! produced by the embedder capability and the Float16 embedding codec.

use thiserror::Error;

/// Errors that can occur during query embedding.
#[derive(Debug, Clone, Error)]
pub enum EmbedderError {
    /// Model not available or initialization failed
    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),
    /// Failed to tokenize text
    #[error("Tokenization failed: {0}")]
    TokenizationFailed(String),
    /// Forward pass through the model failed
    #[error("Inference failed: {0}")]
    InferenceFailed(String),
}

/// Errors that can occur while decoding a Float16 embedding blob.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// Blob is shorter than the 8-byte `[count][dim]` header
    #[error("Embedding blob too short for header: {len} bytes")]
    TruncatedHeader {
        /// Actual blob length in bytes
        len: usize,
    },
    /// Blob is shorter than the header promises
    #[error("Embedding payload truncated: need {expected} bytes, got {actual}")]
    TruncatedPayload {
        /// Bytes required by the header (`8 + count * dim * 2`)
        expected: usize,
        /// Actual blob length in bytes
        actual: usize,
    },
}
