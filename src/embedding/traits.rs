//! Trait for query embedding operations.

use crate::error::EmbedderError;
use async_trait::async_trait;

/// Embedding model capability supplied by the host.
///
/// Implementations must be `Send + Sync`: a single engine instance may serve
/// concurrent searches, and embedding is one of the pipeline's suspension
/// points.
///
/// # Examples
///
/// ```ignore
/// let embedder: Arc<dyn Embedder> = Arc::new(OnnxEmbedder::load(model_path)?);
///
/// let vector = embedder.embed("how do isolates work").await?;
/// assert_eq!(vector.len(), config.embedding_dim);
/// ```
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embeds query text into a dense vector.
    ///
    /// The returned vector's length must equal the engine's configured
    /// `embedding_dim`.
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedderError>;

    /// Extracts the content-bearing tokens of the query.
    ///
    /// Pure and synchronous. Tokens are lowercased; stop-word stripping is
    /// up to the implementation.
    fn content_words(&self, text: &str) -> Vec<String>;
}
