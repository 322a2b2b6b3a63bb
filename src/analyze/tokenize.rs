//! Tokenizer + stopword filter for report descriptions.
//!
//! Text is lower-cased, everything outside `[a-z0-9 ]` is dropped (newlines and
//! punctuation included, so "foo\nbar" collapses into "foobar"), then split on
//! whitespace. Tokens of length <= 2 and stopwords are discarded.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Minimum token length (exclusive) for a token to be a keyword candidate.
pub const MIN_TOKEN_LEN: usize = 2;

/// Common English function words ignored by the keyword ranker.
pub const STOPWORDS: &[&str] = &[
    "the", "is", "at", "which", "on", "a", "an", "and", "or", "in", "to", "of", "for", "with",
    "by", "as", "from", "that", "this", "it", "was", "were", "are", "be", "has", "have", "had",
    "but", "not", "no", "yes", "if", "so", "do", "did", "does", "can", "will", "just", "i",
    "you", "he", "she", "they", "we", "my", "your", "their", "our",
];

static STOPWORD_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| STOPWORDS.iter().copied().collect());

/// True if `token` (already lower-cased) is a stopword. Exact match only.
#[inline]
pub fn is_stopword(token: &str) -> bool {
    STOPWORD_SET.contains(token)
}

/// Lower-case and strip every character outside `[a-z0-9 ]`.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| matches!(c, 'a'..='z' | '0'..='9' | ' '))
        .collect()
}

/// Lazily yields keyword candidates from already-normalized text.
pub fn candidate_tokens(normalized: &str) -> impl Iterator<Item = &str> + '_ {
    normalized
        .split_whitespace()
        .filter(|t| t.len() > MIN_TOKEN_LEN && !is_stopword(t))
}
