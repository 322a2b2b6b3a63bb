//! Spike detection: a category is a spike when its count reaches
//! `threshold * mean` over all categories of the same dimension.

use super::aggregate::CategoryCount;

pub const DEFAULT_SPIKE_THRESHOLD: f64 = 2.0;

/// Mean count, `None` when there are no categories.
pub fn mean_count(counts: &[CategoryCount]) -> Option<f64> {
    if counts.is_empty() {
        return None;
    }
    let total: usize = counts.iter().map(|c| c.count).sum();
    Some(total as f64 / counts.len() as f64)
}

/// Labels whose count is `>= threshold * mean`. Empty input → empty output.
pub fn detect_spikes(counts: &[CategoryCount], threshold: f64) -> Vec<String> {
    let Some(mean) = mean_count(counts) else {
        return Vec::new();
    };
    let cutoff = threshold * mean;
    counts
        .iter()
        .filter(|c| c.count as f64 >= cutoff)
        .map(|c| c.label.clone())
        .collect()
}

/// Narrower check used by the weekly summary: is `top_count` a spike relative to
/// the mean of `known`? With no known categories the mean is taken as the sum
/// over a single bucket (i.e. zero), so any count qualifies.
pub fn top_is_spike(top_count: usize, known: &[CategoryCount], threshold: f64) -> bool {
    let total: usize = known.iter().map(|c| c.count).sum();
    let mean = total as f64 / known.len().max(1) as f64;
    top_count as f64 >= threshold * mean
}
