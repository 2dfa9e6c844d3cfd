//! Vector scoring: cosine helpers, the ANN index capability, and the
//! bundled rust-cv/hnsw implementation.
//!
//! Corpora below the configured threshold are scored with an exact linear
//! cosine scan in the engine; above it, an [`AnnIndex`] built at
//! initialization serves approximate top-k queries.

use super::types::{AnnError, EntryId};
use hnsw::{Hnsw, Searcher};
use space::{Metric, Neighbor};

/// L2 norm of a vector.
pub fn l2_norm(vector: &[f32]) -> f32 {
    vector.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Cosine similarity given precomputed norms.
///
/// Returns 0.0 when either norm is zero.
pub fn cosine_score(a: &[f32], b: &[f32], norm_a: f32, norm_b: f32) -> f32 {
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    let dot: f32 = a.iter().zip(b.iter()).map(|(&x, &y)| x * y).sum();
    dot / (norm_a * norm_b)
}

/// Approximate nearest-neighbour index capability.
///
/// Built once at engine initialization (ids and vectors added, then
/// [`build`](Self::build)), read-only afterwards: implementations must
/// support concurrent `search` calls after the build.
pub trait AnnIndex: Send + Sync {
    /// Registers an entry's embedding. Called only before [`build`](Self::build).
    fn add(&mut self, id: EntryId, vector: &[f32]) -> Result<(), AnnError>;

    /// Finalises the index. No `add` calls may follow.
    fn build(&mut self) -> Result<(), AnnError>;

    /// Returns up to `k` nearest entries as `(id, cosine distance)` pairs,
    /// nearest first. Distances lie in `[0, 2]`; the engine maps
    /// `score = 1 - distance`.
    fn search(&self, vector: &[f32], k: usize) -> Result<Vec<(EntryId, f32)>, AnnError>;
}

/// Cosine distance metric for embedding vectors.
/// Computes 1 - cosine_similarity, scaled to u32 (the ordering unit the
/// HNSW graph requires).
struct CosineDistance;

impl Metric<Box<[f32]>> for CosineDistance {
    type Unit = u32;

    fn distance(&self, a: &Box<[f32]>, b: &Box<[f32]>) -> u32 {
        let norm_a = l2_norm(a);
        let norm_b = l2_norm(b);
        if norm_a == 0.0 || norm_b == 0.0 {
            return u32::MAX; // Maximum distance for zero vectors
        }

        let similarity = cosine_score(a, b, norm_a, norm_b);
        let distance = 1.0 - similarity; // [0, 2]

        // Scale [0, 2] onto the full u32 range.
        (distance * (u32::MAX as f32 / 2.0)) as u32
    }
}

/// Bundled [`AnnIndex`] backed by rust-cv/hnsw.
///
/// Supports incremental insertion, so [`build`](AnnIndex::build) is a
/// no-op. Embeddings are owned as `Box<[f32]>` (stable heap allocations, no
/// lifetime gymnastics).
///
/// # HNSW parameters
///
/// - **M = 16**: bidirectional links per node at layers > 0.
/// - **M0 = 32**: links at layer 0 (2*M per standard practice).
///
/// Both are compile-time constants of the graph type; the search-list
/// width `ef` comes from configuration.
///
/// Reference: "Efficient and robust approximate nearest neighbor search
/// using Hierarchical Navigable Small World graphs", Malkov & Yashunin
/// (2018). arXiv:1603.09320
pub struct HnswAnnIndex {
    index: Hnsw<CosineDistance, Box<[f32]>, rand::rngs::StdRng, 16, 32>,
    /// Map from HNSW insertion position to entry id
    entry_ids: Vec<EntryId>,
    dimension: usize,
    ef_search: usize,
}

impl HnswAnnIndex {
    /// Creates an empty index for vectors of `dimension`, searched with the
    /// given `ef` width.
    pub fn new(dimension: usize, ef_search: usize) -> Self {
        Self {
            index: Hnsw::new(CosineDistance),
            entry_ids: Vec::new(),
            dimension,
            ef_search,
        }
    }

    /// Number of indexed vectors.
    pub fn len(&self) -> usize {
        self.entry_ids.len()
    }

    /// Whether the index holds no vectors.
    pub fn is_empty(&self) -> bool {
        self.entry_ids.is_empty()
    }

    fn validate_dimension(&self, actual: usize) -> Result<(), AnnError> {
        if actual == self.dimension {
            Ok(())
        } else {
            Err(AnnError::DimensionMismatch {
                expected: self.dimension,
                actual,
            })
        }
    }
}

impl AnnIndex for HnswAnnIndex {
    fn add(&mut self, id: EntryId, vector: &[f32]) -> Result<(), AnnError> {
        self.validate_dimension(vector.len())?;

        let boxed: Box<[f32]> = vector.to_vec().into_boxed_slice();
        self.entry_ids.push(id);

        let mut searcher = Searcher::default();
        self.index.insert(boxed, &mut searcher);
        Ok(())
    }

    fn build(&mut self) -> Result<(), AnnError> {
        // rust-cv/hnsw maintains the graph during insertion; nothing to do.
        Ok(())
    }

    fn search(&self, vector: &[f32], k: usize) -> Result<Vec<(EntryId, f32)>, AnnError> {
        self.validate_dimension(vector.len())?;

        if self.entry_ids.is_empty() {
            return Ok(Vec::new());
        }

        let actual_k = std::cmp::min(k, self.entry_ids.len());
        let mut neighbors = vec![
            Neighbor {
                index: !0,
                distance: !0
            };
            actual_k
        ];

        // The search list must be at least as wide as the ask.
        let ef_search = std::cmp::max(self.ef_search, k);
        let query: Box<[f32]> = vector.to_vec().into_boxed_slice();

        // Scratch state is per-call so concurrent searches never contend.
        let mut searcher = Searcher::default();
        self.index
            .nearest(&query, ef_search, &mut searcher, &mut neighbors);

        let results = neighbors
            .into_iter()
            .filter(|n| n.index != !0) // unfilled slots
            .map(|neighbor| {
                let distance = (neighbor.distance as f32) / (u32::MAX as f32 / 2.0);
                (self.entry_ids[neighbor.index], distance.clamp(0.0, 2.0))
            })
            .collect();
        Ok(results)
    }
}
