//! Hybrid search engine orchestrating vector, full-text, and typo signals.
//!
//! Per query the engine:
//! 1. embeds the query text,
//! 2. scores the corpus by cosine (ANN top-k above the corpus-size
//!    threshold, exact linear scan below it),
//! 3. collects lexical hits from the store's full-text index (retrying
//!    with the first word when a multi-word query comes back empty),
//! 4. scans the question map for substring and 1-edit typo hits,
//! 5. pools the vector top candidates with every keyword hit,
//! 6. lazily cosine-scores keyword-only ids the ANN pass never saw,
//! 7. fetches entries and hands everything to the reranker,
//! 8. drops any result whose question shares no word with the query (a
//!    guard against pure-semantic false positives from the ANN).
//!
//! The engine owns only immutable post-initialization state, so concurrent
//! `search` calls on one instance are safe; `initialize` and `dispose`
//! take `&mut self` and therefore cannot race them.

use super::ranking::{fts_match_expr, tokenize, word_overlap_count};
use super::rerank::{HeuristicReranker, RerankInputs, Reranker};
use super::types::{
    validate_dimension, validate_id, Candidate, Entry, EntryId, SearchError, SearchResult,
};
use super::vector::{cosine_score, l2_norm, AnnIndex, HnswAnnIndex};
use crate::config::SearchConfig;
use crate::embedding::Embedder;
use crate::store::EntryStore;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::{debug, info, instrument, warn};

/// Engine lifecycle: `constructed -> initialized -> disposed`, with
/// `disposed` terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Constructed,
    Initialized,
    Disposed,
}

/// Hybrid search engine over a fixed question/answer corpus.
///
/// Parameterised by the host-supplied [`Embedder`] and [`EntryStore`]
/// capabilities; the reranker and ANN index are boxed strategies that
/// default to [`HeuristicReranker`] and [`HnswAnnIndex`].
///
/// # Example
///
/// ```ignore
/// let mut engine = HybridSearchEngine::new(embedder, store, embeddings, SearchConfig::default());
/// engine.initialize().await?;
/// let results = engine.search("how do isolates work", 3).await?;
/// engine.dispose().await?;
/// ```
pub struct HybridSearchEngine<E: Embedder, S: EntryStore> {
    embedder: E,
    store: S,
    reranker: Box<dyn Reranker>,
    /// Injected pre-init, populated and built during `initialize`
    custom_ann: Option<Box<dyn AnnIndex>>,
    /// Built ANN index; `None` below the corpus-size threshold
    ann: Option<Box<dyn AnnIndex>>,
    embeddings: Vec<Vec<f32>>,
    /// L2 norm per embedding row, computed once at initialization
    norms: Vec<f32>,
    /// Id -> original question text; BTreeMap so the typo scan walks ids in
    /// a stable order (ties in the reranker preserve discovery order)
    questions: BTreeMap<EntryId, String>,
    config: SearchConfig,
    state: Lifecycle,
}

impl<E: Embedder, S: EntryStore> HybridSearchEngine<E, S> {
    /// Creates an engine over decoded corpus embeddings.
    ///
    /// Row `i` of `embeddings` belongs to entry id `i + 1`. Nothing is
    /// validated or built until [`initialize`](Self::initialize).
    pub fn new(embedder: E, store: S, embeddings: Vec<Vec<f32>>, config: SearchConfig) -> Self {
        Self {
            embedder,
            store,
            reranker: Box::new(HeuristicReranker::new()),
            custom_ann: None,
            ann: None,
            embeddings,
            norms: Vec::new(),
            questions: BTreeMap::new(),
            config,
            state: Lifecycle::Constructed,
        }
    }

    /// Replaces the default heuristic reranker.
    pub fn with_reranker(mut self, reranker: Box<dyn Reranker>) -> Self {
        self.reranker = reranker;
        self
    }

    /// Supplies an empty ANN index to populate at initialization instead of
    /// the bundled [`HnswAnnIndex`].
    ///
    /// Ignored (and dropped) when the corpus stays below `hnsw_threshold`.
    pub fn with_ann_index(mut self, ann: Box<dyn AnnIndex>) -> Self {
        self.custom_ann = Some(ann);
        self
    }

    /// Number of entries in the corpus. Available before initialization.
    pub fn entry_count(&self) -> usize {
        self.embeddings.len()
    }

    /// Whether [`initialize`](Self::initialize) has completed.
    pub fn is_initialized(&self) -> bool {
        self.state == Lifecycle::Initialized
    }

    /// Computes norms, optionally builds the ANN index, and materialises
    /// the question map. Idempotent.
    ///
    /// # Errors
    ///
    /// - [`SearchError::AlreadyDisposed`] after [`dispose`](Self::dispose).
    /// - [`SearchError::SchemaMismatch`] if an embedding row has the wrong
    ///   dimension or the question map holds an id outside `[1, N]`.
    /// - [`SearchError::Store`] / [`SearchError::Ann`] on capability failure.
    #[instrument(skip_all, fields(entries = self.embeddings.len()))]
    pub async fn initialize(&mut self) -> Result<(), SearchError> {
        match self.state {
            Lifecycle::Disposed => return Err(SearchError::AlreadyDisposed),
            Lifecycle::Initialized => return Ok(()),
            Lifecycle::Constructed => {}
        }

        let dim = self.config.embedding_dim;
        for embedding in &self.embeddings {
            validate_dimension(dim, embedding.len())?;
        }
        self.norms = self.embeddings.iter().map(|e| l2_norm(e)).collect();

        let entry_count = self.embeddings.len();
        if entry_count >= self.config.hnsw_threshold {
            let mut ann = self
                .custom_ann
                .take()
                .unwrap_or_else(|| Box::new(HnswAnnIndex::new(dim, self.config.hnsw_ef)));
            for (index, embedding) in self.embeddings.iter().enumerate() {
                ann.add(EntryId::from_index(index), embedding)?;
            }
            ann.build()?;
            self.ann = Some(ann);
            info!(entries = entry_count, "ann index built");
        } else {
            self.custom_ann = None;
            debug!(
                entries = entry_count,
                threshold = self.config.hnsw_threshold,
                "corpus below ann threshold, using linear scan"
            );
        }

        let questions = self.store.load_questions().await?;
        for &id in questions.keys() {
            validate_id(id, entry_count)?;
        }
        self.questions = questions.into_iter().collect();

        self.state = Lifecycle::Initialized;
        info!(entries = entry_count, "engine initialized");
        Ok(())
    }

    /// Releases store resources. Idempotent; afterwards every call fails
    /// with [`SearchError::AlreadyDisposed`].
    pub async fn dispose(&mut self) -> Result<(), SearchError> {
        if self.state == Lifecycle::Disposed {
            return Ok(());
        }
        self.store.close().await?;
        self.ann = None;
        self.custom_ann = None;
        self.state = Lifecycle::Disposed;
        info!("engine disposed");
        Ok(())
    }

    /// Runs the hybrid pipeline and returns at most `limit` results,
    /// best first. An empty list is a valid success. Hosts with no opinion
    /// on `limit` pass [`DEFAULT_LIMIT`](crate::config::DEFAULT_LIMIT).
    ///
    /// # Errors
    ///
    /// - [`SearchError::NotInitialized`] / [`SearchError::AlreadyDisposed`]
    ///   on lifecycle misuse.
    /// - [`SearchError::Embedder`] / [`SearchError::Ann`] /
    ///   [`SearchError::Store`] when a capability fails. Full-text failures
    ///   are the exception: they degrade to "no lexical hits" and the query
    ///   proceeds on the remaining signals.
    /// - [`SearchError::SchemaMismatch`] when a subsystem returns an id
    ///   outside `[1, N]` or a wrong-dimension vector.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<SearchResult>, SearchError> {
        match self.state {
            Lifecycle::Constructed => return Err(SearchError::NotInitialized),
            Lifecycle::Disposed => return Err(SearchError::AlreadyDisposed),
            Lifecycle::Initialized => {}
        }
        let entry_count = self.embeddings.len();

        // 1. Embed the query.
        let query_vec = self.embedder.embed(query).await?;
        validate_dimension(self.config.embedding_dim, query_vec.len())?;
        let query_norm = l2_norm(&query_vec);

        // 2. Vector scores: ANN top-k or exact linear scan.
        let mut scores: HashMap<EntryId, f32> = HashMap::new();
        let mut ranked: Vec<EntryId> = Vec::new();
        if let Some(ann) = &self.ann {
            for (id, distance) in ann.search(&query_vec, self.config.hnsw_search_k)? {
                validate_id(id, entry_count)?;
                let score = (1.0 - distance).clamp(0.0, 1.0);
                if scores.insert(id, score).is_none() {
                    ranked.push(id);
                }
            }
        } else {
            let mut scan: Vec<(EntryId, f32)> = (0..entry_count)
                .map(|index| {
                    let score = cosine_score(
                        &query_vec,
                        &self.embeddings[index],
                        query_norm,
                        self.norms[index],
                    )
                    .clamp(0.0, 1.0);
                    (EntryId::from_index(index), score)
                })
                .collect();
            scan.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
            for (id, score) in scan {
                scores.insert(id, score);
                ranked.push(id);
            }
        }
        debug!(vector_hits = ranked.len(), "vector scoring complete");

        // 3. Lexical hits from the full-text index.
        let words = self.embedder.content_words(query);
        let fts_ids = self.fts_lookup(&words).await;
        for &id in &fts_ids {
            validate_id(id, entry_count)?;
        }
        let fts_set: HashSet<EntryId> = fts_ids.iter().copied().collect();

        // 4. Typo scan: substring on the lowercased question, or a 1-edit
        // token match.
        let mut keyword_ids: Vec<EntryId> = fts_ids;
        let mut keyword_set = fts_set.clone();
        if !words.is_empty() {
            for (&id, question) in &self.questions {
                if keyword_set.contains(&id) {
                    continue;
                }
                let lower = question.to_lowercase();
                let hit = words.iter().any(|word| lower.contains(word.as_str()))
                    || word_overlap_count(&words, question) > 0;
                if hit {
                    keyword_set.insert(id);
                    keyword_ids.push(id);
                }
            }
        }
        debug!(
            fts_hits = fts_set.len(),
            keyword_hits = keyword_ids.len(),
            "keyword signals collected"
        );

        // 5. Candidate pool: vector top slice plus every keyword hit.
        let mut pool: Vec<EntryId> = Vec::new();
        let mut in_pool: HashSet<EntryId> = HashSet::new();
        for &id in ranked.iter().take(self.config.candidate_pool_size) {
            if in_pool.insert(id) {
                pool.push(id);
            }
        }
        for &id in &keyword_ids {
            if in_pool.insert(id) {
                pool.push(id);
            }
        }
        if pool.is_empty() {
            debug!("no candidates formed");
            return Ok(Vec::new());
        }

        // 6. On the ANN path, keyword-only ids may have no vector score
        // yet; fill the gaps with exact cosine against the stored rows.
        if self.ann.is_some() {
            for &id in &pool {
                if !scores.contains_key(&id) {
                    let index = id.to_index();
                    let score = cosine_score(
                        &query_vec,
                        &self.embeddings[index],
                        query_norm,
                        self.norms[index],
                    )
                    .clamp(0.0, 1.0);
                    scores.insert(id, score);
                }
            }
        }

        // 7. Fetch entries (store order is unspecified) and rerank.
        let fetched = self.store.fetch_entries(&pool).await?;
        let mut by_id: HashMap<EntryId, Entry> = fetched
            .into_iter()
            .map(|entry| (entry.id, entry))
            .collect();
        let mut candidates = Vec::with_capacity(pool.len());
        for &id in &pool {
            let entry = by_id.remove(&id).ok_or_else(|| {
                SearchError::SchemaMismatch(format!(
                    "store returned no entry for pooled id {}",
                    id.as_u32()
                ))
            })?;
            candidates.push(Candidate {
                entry,
                vector_score: scores.get(&id).copied().unwrap_or(0.0),
                embedding: Some(self.embeddings[id.to_index()].clone()),
            });
        }

        let results = self.reranker.rerank(
            query,
            candidates,
            &keyword_set,
            limit,
            RerankInputs {
                query_embedding: Some(&query_vec),
                fts_ids: Some(&fts_set),
                content_words: Some(&words),
            },
        );

        // 8. Keyword-overlap safety filter: a result whose question shares
        // no word with the query is a semantic-only hallucination.
        let query_tokens = tokenize(query);
        let filtered: Vec<SearchResult> = results
            .into_iter()
            .filter(|result| word_overlap_count(&query_tokens, &result.entry.question) >= 1)
            .collect();

        info!(results = filtered.len(), "search complete");
        Ok(filtered)
    }

    /// Full-text lookup with single-word retry and local failure recovery.
    async fn fts_lookup(&self, words: &[String]) -> Vec<EntryId> {
        if words.is_empty() {
            return Vec::new();
        }

        let expr = fts_match_expr(words, &self.config.question_column);
        let mut ids = match self.store.fts_match(&expr, self.config.fts_limit).await {
            Ok(ids) => ids,
            Err(error) => {
                warn!(%error, "full-text query failed, continuing without lexical hits");
                Vec::new()
            }
        };

        // A multi-word query that matches nothing often over-constrains;
        // fall back to the first word alone.
        if ids.is_empty() && words.len() > 1 {
            let retry = fts_match_expr(&words[..1], &self.config.question_column);
            ids = match self.store.fts_match(&retry, self.config.fts_limit).await {
                Ok(ids) => ids,
                Err(error) => {
                    warn!(%error, "full-text retry failed");
                    Vec::new()
                }
            };
        }
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EmbedderError;
    use crate::search::types::AnnError;
    use crate::store::StoreError;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    fn entry(id: u32, category: &str, question: &str, answer: &str) -> Entry {
        Entry {
            id: EntryId::from_u32(id),
            category: category.to_string(),
            question: question.to_string(),
            answer: answer.to_string(),
        }
    }

    fn corpus() -> Vec<Entry> {
        vec![
            entry(1, "Dart", "What is Dart?", "Dart is a language."),
            entry(2, "Flutter", "What is Flutter?", "Flutter is a UI toolkit."),
            entry(
                3,
                "Dart",
                "How do isolates work?",
                "Isolates are lightweight threads.",
            ),
        ]
    }

    fn one_hot(position: usize, dim: usize) -> Vec<f32> {
        let mut vector = vec![0.0; dim];
        vector[position] = 1.0;
        vector
    }

    fn config(dim: usize) -> SearchConfig {
        SearchConfig {
            embedding_dim: dim,
            ..SearchConfig::default()
        }
    }

    /// Embedder that always returns one fixed vector and tokenizes content
    /// words with the crate tokenizer.
    struct StaticEmbedder {
        vector: Vec<f32>,
    }

    #[async_trait]
    impl Embedder for StaticEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbedderError> {
            Ok(self.vector.clone())
        }

        fn content_words(&self, text: &str) -> Vec<String> {
            tokenize(text)
        }
    }

    /// Store over a fixed corpus with scripted full-text responses and call
    /// recording.
    struct ScriptedStore {
        entries: Vec<Entry>,
        fts_responses: Mutex<VecDeque<Result<Vec<EntryId>, StoreError>>>,
        fts_exprs: Mutex<Vec<String>>,
        close_calls: AtomicUsize,
    }

    impl ScriptedStore {
        fn new(entries: Vec<Entry>) -> Self {
            Self {
                entries,
                fts_responses: Mutex::new(VecDeque::new()),
                fts_exprs: Mutex::new(Vec::new()),
                close_calls: AtomicUsize::new(0),
            }
        }

        fn push_fts(self, response: Result<Vec<EntryId>, StoreError>) -> Self {
            self.fts_responses.lock().unwrap().push_back(response);
            self
        }
    }

    #[async_trait]
    impl EntryStore for ScriptedStore {
        async fn load_questions(&self) -> Result<HashMap<EntryId, String>, StoreError> {
            Ok(self
                .entries
                .iter()
                .map(|e| (e.id, e.question.clone()))
                .collect())
        }

        async fn fts_match(&self, expr: &str, _limit: usize) -> Result<Vec<EntryId>, StoreError> {
            self.fts_exprs.lock().unwrap().push(expr.to_string());
            self.fts_responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Ok(Vec::new()))
        }

        async fn fetch_entries(&self, ids: &[EntryId]) -> Result<Vec<Entry>, StoreError> {
            Ok(self
                .entries
                .iter()
                .filter(|e| ids.contains(&e.id))
                .cloned()
                .collect())
        }

        async fn close(&self) -> Result<(), StoreError> {
            self.close_calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    /// Exact-scan [`AnnIndex`] that counts searches, for asserting the ANN
    /// path was taken.
    struct CountingAnnIndex {
        vectors: Vec<(EntryId, Vec<f32>)>,
        searches: Arc<AtomicUsize>,
    }

    impl AnnIndex for CountingAnnIndex {
        fn add(&mut self, id: EntryId, vector: &[f32]) -> Result<(), AnnError> {
            self.vectors.push((id, vector.to_vec()));
            Ok(())
        }

        fn build(&mut self) -> Result<(), AnnError> {
            Ok(())
        }

        fn search(&self, vector: &[f32], k: usize) -> Result<Vec<(EntryId, f32)>, AnnError> {
            self.searches.fetch_add(1, Ordering::SeqCst);
            let query_norm = l2_norm(vector);
            let mut hits: Vec<(EntryId, f32)> = self
                .vectors
                .iter()
                .map(|(id, stored)| {
                    let similarity = cosine_score(vector, stored, query_norm, l2_norm(stored));
                    (*id, 1.0 - similarity)
                })
                .collect();
            hits.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));
            hits.truncate(k);
            Ok(hits)
        }
    }

    fn engine_with(
        query_vector: Vec<f32>,
        store: ScriptedStore,
        dim: usize,
    ) -> HybridSearchEngine<StaticEmbedder, ScriptedStore> {
        let embeddings: Vec<Vec<f32>> = (0..store.entries.len())
            .map(|i| one_hot(i, dim))
            .collect();
        HybridSearchEngine::new(
            StaticEmbedder {
                vector: query_vector,
            },
            store,
            embeddings,
            config(dim),
        )
    }

    #[tokio::test]
    async fn test_search_before_initialize_fails() {
        let engine = engine_with(one_hot(0, 3), ScriptedStore::new(corpus()), 3);
        let result = engine.search("dart", 3).await;
        assert!(matches!(result, Err(SearchError::NotInitialized)));
    }

    #[tokio::test]
    async fn test_initialize_is_idempotent() {
        let mut engine = engine_with(one_hot(0, 3), ScriptedStore::new(corpus()), 3);
        assert!(!engine.is_initialized());
        assert_eq!(engine.entry_count(), 3);

        engine.initialize().await.unwrap();
        engine.initialize().await.unwrap();
        assert!(engine.is_initialized());

        let first = engine.search("dart", 3).await.unwrap();
        let second = engine.search("dart", 3).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_dispose_is_terminal_and_idempotent() {
        let mut engine = engine_with(one_hot(0, 3), ScriptedStore::new(corpus()), 3);
        engine.initialize().await.unwrap();

        engine.dispose().await.unwrap();
        engine.dispose().await.unwrap();
        assert_eq!(engine.store.close_calls.load(Ordering::SeqCst), 1);

        assert!(matches!(
            engine.search("dart", 3).await,
            Err(SearchError::AlreadyDisposed)
        ));
        assert!(matches!(
            engine.initialize().await,
            Err(SearchError::AlreadyDisposed)
        ));
    }

    #[tokio::test]
    async fn test_dispose_before_initialize() {
        let mut engine = engine_with(one_hot(0, 3), ScriptedStore::new(corpus()), 3);
        engine.dispose().await.unwrap();
        assert!(matches!(
            engine.initialize().await,
            Err(SearchError::AlreadyDisposed)
        ));
    }

    #[tokio::test]
    async fn test_fts_failure_degrades_to_other_signals() {
        let store = ScriptedStore::new(corpus())
            .push_fts(Err(StoreError::FtsError("index corrupt".to_string())));
        let mut engine = engine_with(one_hot(0, 3), store, 3);
        engine.initialize().await.unwrap();

        // Vector + typo still find entry 1.
        let results = engine.search("dart", 3).await.unwrap();
        assert!(!results.is_empty());
        assert_eq!(results[0].entry.id, EntryId::from_u32(1));
    }

    #[tokio::test]
    async fn test_fts_retry_uses_first_word() {
        let store = ScriptedStore::new(corpus())
            .push_fts(Ok(Vec::new()))
            .push_fts(Ok(vec![EntryId::from_u32(1)]));
        let mut engine = engine_with(vec![0.5, 0.5, 0.5], store, 3);
        engine.initialize().await.unwrap();

        engine.search("what dart", 3).await.unwrap();

        let exprs = engine.store.fts_exprs.lock().unwrap();
        assert_eq!(exprs.len(), 2);
        assert_eq!(exprs[0], r#"question: "what" OR question: "dart""#);
        assert_eq!(exprs[1], r#"question: "what""#);
    }

    #[tokio::test]
    async fn test_single_word_query_never_retries() {
        let store = ScriptedStore::new(corpus()).push_fts(Ok(Vec::new()));
        let mut engine = engine_with(one_hot(0, 3), store, 3);
        engine.initialize().await.unwrap();

        engine.search("dart", 3).await.unwrap();

        assert_eq!(engine.store.fts_exprs.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_query_skips_fts() {
        let store = ScriptedStore::new(corpus());
        let mut engine = engine_with(vec![0.5, 0.5, 0.5], store, 3);
        engine.initialize().await.unwrap();

        // No content words: lexical and typo signals are silent, and the
        // overlap filter then rejects every candidate.
        let results = engine.search("", 3).await.unwrap();
        assert!(results.is_empty());
        assert!(engine.store.fts_exprs.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_ann_path_with_gap_fill() {
        let searches = Arc::new(AtomicUsize::new(0));
        let store = ScriptedStore::new(corpus());
        let mut engine = engine_with(one_hot(2, 3), store, 3).with_ann_index(Box::new(
            CountingAnnIndex {
                vectors: Vec::new(),
                searches: Arc::clone(&searches),
            },
        ));
        // Force the ANN path and keep its result set tiny so the typo hit
        // for entry 1 must be gap-filled.
        engine.config.hnsw_threshold = 1;
        engine.config.hnsw_search_k = 1;
        engine.config.candidate_pool_size = 1;
        engine.initialize().await.unwrap();

        let results = engine.search("dart isolates", 3).await.unwrap();

        assert_eq!(searches.load(Ordering::SeqCst), 1);
        // Entry 3 is a perfect hit (cosine 1.0 + typo 0.7): the shortcut
        // collapses the list around it.
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].entry.id, EntryId::from_u32(3));
        assert!((results[0].score - 1.7).abs() < 1e-3);
    }

    #[tokio::test]
    async fn test_query_embedding_dimension_mismatch() {
        let store = ScriptedStore::new(corpus());
        let mut engine = engine_with(vec![1.0, 0.0], store, 3); // 2-dim query
        engine.initialize().await.unwrap();

        assert!(matches!(
            engine.search("dart", 3).await,
            Err(SearchError::SchemaMismatch(_))
        ));
    }

    #[tokio::test]
    async fn test_corpus_embedding_dimension_mismatch() {
        let store = ScriptedStore::new(corpus());
        let embeddings = vec![one_hot(0, 3), vec![1.0, 0.0], one_hot(2, 3)];
        let mut engine = HybridSearchEngine::new(
            StaticEmbedder {
                vector: one_hot(0, 3),
            },
            store,
            embeddings,
            config(3),
        );

        assert!(matches!(
            engine.initialize().await,
            Err(SearchError::SchemaMismatch(_))
        ));
    }

    #[tokio::test]
    async fn test_question_map_id_out_of_range() {
        // Four questions but only three embedding rows.
        let mut entries = corpus();
        entries.push(entry(4, "Dart", "What is a stream?", "A stream is async."));
        let store = ScriptedStore::new(entries);
        let embeddings: Vec<Vec<f32>> = (0..3).map(|i| one_hot(i, 3)).collect();
        let mut engine = HybridSearchEngine::new(
            StaticEmbedder {
                vector: one_hot(0, 3),
            },
            store,
            embeddings,
            config(3),
        );

        assert!(matches!(
            engine.initialize().await,
            Err(SearchError::SchemaMismatch(_))
        ));
    }
}
