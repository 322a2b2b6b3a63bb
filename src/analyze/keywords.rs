//! Frequency-ranked keywords.

use std::collections::HashMap;

use super::tokenize::{candidate_tokens, normalize};

/// Default number of keywords returned.
pub const DEFAULT_KEYWORD_LIMIT: usize = 5;

/// Count tokens, keeping first-seen order. Result is sorted by count
/// descending; the sort is stable so ties stay in first-seen order.
pub fn ranked_frequencies<'a, I>(tokens: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut counts: Vec<(&'a str, usize)> = Vec::new();

    for tok in tokens {
        match index.get(tok) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(tok, counts.len());
                counts.push((tok, 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
        .into_iter()
        .map(|(t, n)| (t.to_string(), n))
        .collect()
}

/// Top `k` keywords of `text`. Empty text yields an empty list.
pub fn extract_keywords(text: &str, k: usize) -> Vec<String> {
    let norm = normalize(text);
    ranked_frequencies(candidate_tokens(&norm))
        .into_iter()
        .take(k)
        .map(|(t, _)| t)
        .collect()
}
