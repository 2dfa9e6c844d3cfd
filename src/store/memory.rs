//! In-memory entry store that holds the corpus in a `Vec`.
//! Useful for testing or when the knowledge base is built in-process.

use super::{EntryStore, StoreError};
use crate::search::ranking::tokenize;
use crate::search::types::{Entry, EntryId};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

/// Quoted term inside a match expression; doubled quotes are the escape.
static QUOTED_TERM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""((?:[^"]|"")*)""#).expect("quoted-term regex is valid"));

/// In-memory [`EntryStore`] backed by a `Vec<Entry>`.
///
/// Full-text matching is naive: the quoted terms of the match expression are
/// compared for token equality against the tokenized question. Good enough
/// for tests and small corpora; production hosts should back the trait with
/// a real inverted index.
pub struct InMemoryEntryStore {
    entries: Vec<Entry>,
}

impl InMemoryEntryStore {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self { entries }
    }
}

#[async_trait::async_trait]
impl EntryStore for InMemoryEntryStore {
    async fn load_questions(&self) -> Result<HashMap<EntryId, String>, StoreError> {
        Ok(self
            .entries
            .iter()
            .map(|entry| (entry.id, entry.question.clone()))
            .collect())
    }

    async fn fts_match(&self, expr: &str, limit: usize) -> Result<Vec<EntryId>, StoreError> {
        let terms: Vec<String> = QUOTED_TERM
            .captures_iter(expr)
            .map(|cap| cap[1].replace("\"\"", "\""))
            .collect();
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        let ids = self
            .entries
            .iter()
            .filter(|entry| {
                let tokens = tokenize(&entry.question);
                terms.iter().any(|term| tokens.iter().any(|t| t == term))
            })
            .map(|entry| entry.id)
            .take(limit)
            .collect();
        Ok(ids)
    }

    async fn fetch_entries(&self, ids: &[EntryId]) -> Result<Vec<Entry>, StoreError> {
        Ok(self
            .entries
            .iter()
            .filter(|entry| ids.contains(&entry.id))
            .cloned()
            .collect())
    }

    async fn close(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
