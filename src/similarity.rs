//! Fuzzy title similarity used for duplicate detection.

use similar::TextDiff;

/// Scores how alike two strings are, from 0 (nothing in common) to 100 (identical).
pub trait Similarity: Send + Sync {
    fn score(&self, a: &str, b: &str) -> u8;
}

/// Character-level matching ratio: `2 * matches / total_len`, as a rounded percentage.
#[derive(Debug, Clone, Copy, Default)]
pub struct RatioSimilarity;

impl Similarity for RatioSimilarity {
    fn score(&self, a: &str, b: &str) -> u8 {
        if a.is_empty() && b.is_empty() {
            return 100;
        }
        let ratio = TextDiff::from_chars(a, b).ratio();
        (f64::from(ratio) * 100.0).round().clamp(0.0, 100.0) as u8
    }
}
