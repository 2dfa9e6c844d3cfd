//! Pure ranking utilities: tokenisation, full-text query composition,
//! 1-edit typo matching, and the boost/shortcut rules used by the reranker.
//!
//! Everything here is stateless. The two regular expressions (Unicode
//! non-word class and whitespace class) are compiled once per process and
//! shared.

use super::types::{EntryId, SearchResult};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};

/// Additive boost for candidates confirmed by the full-text index.
pub const FTS_BOOST: f32 = 0.5;

/// Additive boost for candidates confirmed only by the 1-edit typo scan.
///
/// Larger than [`FTS_BOOST`]: a typo-tolerant token hit is scarcer and thus
/// more discriminative than a lexical index hit.
pub const TYPO_BOOST: f32 = 0.7;

/// Ceiling of the concise-match boost (question covers every query word
/// with no extras).
pub const CONCISE_MATCH_BOOST: f32 = 0.5;

/// Score at which a lone candidate short-circuits the result list.
pub const PERFECT_SCORE_THRESHOLD: f32 = 0.999;

/// Extra words a question may carry beyond the query and still qualify for
/// the concise-match boost.
pub const MAX_EXTRA_WORDS: usize = 1;

/// Anything outside letter | number | underscore | whitespace.
static NON_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{N}_\s]").expect("non-word regex is valid"));

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace regex is valid"));

/// Normalises text into lowercase word tokens.
///
/// Trims, lowercases, replaces Unicode non-word characters with spaces,
/// then splits on whitespace runs. Idempotent on its own output:
/// `tokenize(tokenize(t).join(" ")) == tokenize(t)`.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.trim().to_lowercase();
    let cleaned = NON_WORD.replace_all(&lowered, " ");
    WHITESPACE
        .split(&cleaned)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Composes a full-text match expression over `column` for the given words.
///
/// Yields `column: "w1" OR column: "w2" OR ...` with embedded `"` doubled
/// (the full-text literal escape). Empty input yields an empty string,
/// which the caller must not execute.
pub fn fts_match_expr(words: &[String], column: &str) -> String {
    words
        .iter()
        .map(|word| format!("{column}: \"{}\"", word.replace('"', "\"\"")))
        .collect::<Vec<_>>()
        .join(" OR ")
}

/// Returns true when `a` and `b` differ by at most one codepoint edit
/// (substitution, insertion, or deletion).
///
/// Runs a single forward scan with at most one skip; no temporary
/// allocations.
pub fn within_one_edit(a: &str, b: &str) -> bool {
    if a == b {
        return true;
    }

    let len_a = a.chars().count();
    let len_b = b.chars().count();

    if len_a == len_b {
        // Exactly one substituted position.
        let differing = a.chars().zip(b.chars()).filter(|(x, y)| x != y).count();
        return differing == 1;
    }

    let (short, long) = if len_a < len_b { (a, b) } else { (b, a) };
    if len_a.abs_diff(len_b) != 1 {
        return false;
    }

    // The longer string must be the shorter plus one inserted codepoint.
    let mut short_chars = short.chars().peekable();
    let mut long_chars = long.chars().peekable();
    let mut skipped = false;
    while let (Some(&sc), Some(&lc)) = (short_chars.peek(), long_chars.peek()) {
        if sc == lc {
            short_chars.next();
            long_chars.next();
        } else if skipped {
            return false;
        } else {
            skipped = true;
            long_chars.next();
        }
    }
    // Any remaining tail of the longer string is the single insertion.
    true
}

/// Counts how many query words have a 1-edit match among the question's
/// tokens.
pub fn word_overlap_count(query_words: &[String], question: &str) -> usize {
    matched_word_count(query_words, &tokenize(question))
}

fn matched_word_count(query_words: &[String], question_tokens: &[String]) -> usize {
    query_words
        .iter()
        .filter(|word| question_tokens.iter().any(|token| within_one_edit(word, token)))
        .count()
}

/// Boost rewarding short questions that cover every query word.
///
/// Zero unless the question covers all query words within
/// `max_extra_words` of the query length; otherwise tiered by how many
/// extra words the question carries: `ceiling` for zero extras,
/// `0.7 * ceiling` for one, `0.4 * ceiling` beyond that.
pub fn concise_match_boost(
    query_words: &[String],
    question: &str,
    max_extra_words: usize,
    ceiling: f32,
) -> f32 {
    if query_words.is_empty() {
        return 0.0;
    }

    let question_tokens = tokenize(question);
    if question_tokens.len() > query_words.len() + max_extra_words {
        return 0.0;
    }
    if matched_word_count(query_words, &question_tokens) < query_words.len() {
        return 0.0;
    }

    let extra = question_tokens.len() as isize - query_words.len() as isize;
    match extra {
        i if i <= 0 => ceiling,
        1 => 0.7 * ceiling,
        _ => 0.4 * ceiling,
    }
}

/// Collapses the result list to a single obviously-right answer.
///
/// If exactly one result scores at or above `threshold`, only it is
/// returned; otherwise the list passes through unchanged. Keeps unrelated
/// noise out of the list when one candidate is a perfect match.
pub fn perfect_match_filter(results: Vec<SearchResult>, threshold: f32) -> Vec<SearchResult> {
    let perfect = results.iter().filter(|r| r.score >= threshold).count();
    if perfect == 1 {
        results.into_iter().filter(|r| r.score >= threshold).collect()
    } else {
        results
    }
}

/// Top-`k` ids by vector score plus the full-text boost.
///
/// Ties (including ids sharing a boosted score) break by ascending id so
/// the result is deterministic regardless of map iteration order.
pub fn top_ids_by_combined_score(
    scores: &HashMap<EntryId, f32>,
    fts_hits: &HashSet<EntryId>,
    k: usize,
    fts_boost: f32,
) -> Vec<EntryId> {
    let mut ranked: Vec<(EntryId, f32)> = scores
        .iter()
        .map(|(&id, &score)| {
            let boost = if fts_hits.contains(&id) { fts_boost } else { 0.0 };
            (id, score + boost)
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    ranked.into_iter().take(k).map(|(id, _)| id).collect()
}
