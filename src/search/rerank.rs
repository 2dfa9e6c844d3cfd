//! Reranker capability and the default heuristic implementation.
//!
//! The reranker takes the candidate pool, folds the lexical and typo
//! signals into the vector score as additive boosts, and shapes the final
//! list (dedup, truncation, perfect-match shortcut). Reranking is CPU-local
//! and synchronous; it is not one of the pipeline's suspension points.

use super::ranking::{
    concise_match_boost, perfect_match_filter, tokenize, CONCISE_MATCH_BOOST, FTS_BOOST,
    MAX_EXTRA_WORDS, PERFECT_SCORE_THRESHOLD, TYPO_BOOST,
};
use super::types::{Candidate, EntryId, SearchResult};
use std::collections::HashSet;
use tracing::debug;

/// Optional context the engine hands to the reranker alongside the pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct RerankInputs<'a> {
    /// The query embedding, when the caller computed one
    pub query_embedding: Option<&'a [f32]>,
    /// Ids confirmed by the full-text index
    pub fts_ids: Option<&'a HashSet<EntryId>>,
    /// Content words of the query, when already extracted
    pub content_words: Option<&'a [String]>,
}

/// Reranking capability.
///
/// Implementations return at most `limit` results, deduplicated and sorted
/// by descending score, tagged with their own `method` string.
pub trait Reranker: Send + Sync {
    /// Reorders and trims the candidate pool into the final result list.
    ///
    /// `keyword_ids` is the union of full-text and typo-scan hits;
    /// `inputs.fts_ids` isolates the full-text subset so the two boosts
    /// stay mutually exclusive.
    fn rerank(
        &self,
        query: &str,
        candidates: Vec<Candidate>,
        keyword_ids: &HashSet<EntryId>,
        limit: usize,
        inputs: RerankInputs<'_>,
    ) -> Vec<SearchResult>;
}

/// Default heuristic reranker: vector score plus boost algebra.
///
/// Each candidate scores `vector + fts | typo + concise`, where the
/// full-text and typo boosts are mutually exclusive by construction
/// (a typo-only id is a keyword hit absent from the full-text set).
/// The sorted list is oversampled at twice the limit, deduplicated by
/// normalised question, truncated, and passed through the perfect-match
/// shortcut.
#[derive(Debug, Clone)]
pub struct HeuristicReranker {
    /// Boost for full-text hits
    pub fts_boost: f32,
    /// Boost for typo-only hits
    pub typo_boost: f32,
    /// Concise-match boost ceiling
    pub concise_boost: f32,
    /// Perfect-match shortcut threshold
    pub perfect_score_threshold: f32,
    /// Extra words a question may carry and still count as concise
    pub max_extra_words: usize,
}

impl HeuristicReranker {
    /// Tag carried by every result this reranker produces.
    pub const METHOD: &'static str = "heuristic";

    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for HeuristicReranker {
    fn default() -> Self {
        Self {
            fts_boost: FTS_BOOST,
            typo_boost: TYPO_BOOST,
            concise_boost: CONCISE_MATCH_BOOST,
            perfect_score_threshold: PERFECT_SCORE_THRESHOLD,
            max_extra_words: MAX_EXTRA_WORDS,
        }
    }
}

impl Reranker for HeuristicReranker {
    fn rerank(
        &self,
        query: &str,
        candidates: Vec<Candidate>,
        keyword_ids: &HashSet<EntryId>,
        limit: usize,
        inputs: RerankInputs<'_>,
    ) -> Vec<SearchResult> {
        if candidates.is_empty() {
            return Vec::new();
        }

        let fallback_words;
        let words: &[String] = match inputs.content_words {
            Some(words) => words,
            None => {
                fallback_words = tokenize(query);
                &fallback_words
            }
        };

        // Without the full-text subset there is no way to tell typo hits
        // apart from lexical hits, so no typo boost is granted.
        let typo_only: HashSet<EntryId> = match inputs.fts_ids {
            Some(fts_ids) => keyword_ids.difference(fts_ids).copied().collect(),
            None => HashSet::new(),
        };

        let mut scored: Vec<(usize, f32)> = candidates
            .iter()
            .enumerate()
            .map(|(position, candidate)| {
                let id = candidate.entry.id;
                let mut score = candidate.vector_score;
                if inputs.fts_ids.is_some_and(|fts| fts.contains(&id)) {
                    score += self.fts_boost;
                }
                if typo_only.contains(&id) {
                    score += self.typo_boost;
                }
                score += concise_match_boost(
                    words,
                    &candidate.entry.question,
                    self.max_extra_words,
                    self.concise_boost,
                );
                (position, score)
            })
            .collect();

        // Stable sort: ties keep candidate-pool discovery order.
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        // Oversample past the limit so duplicates surviving to the head
        // cannot starve the final list.
        let mut seen_questions = HashSet::new();
        let mut results = Vec::with_capacity(limit);
        for (position, score) in scored.into_iter().take(limit * 2) {
            let key = candidates[position].entry.question.trim().to_lowercase();
            if !seen_questions.insert(key) {
                continue;
            }
            results.push(SearchResult {
                entry: candidates[position].entry.clone(),
                score,
                method: Self::METHOD.to_string(),
            });
        }
        results.truncate(limit);

        debug!(
            candidates = candidates.len(),
            kept = results.len(),
            "heuristic rerank complete"
        );

        perfect_match_filter(results, self.perfect_score_threshold)
    }
}
