//! Review selection: which reviews reach the summarizer, and in what order.
//!
//! ```text
//! all regions ─► (dedup) ─► rank by length ─► cap ─► sort by date ─► strip
//! ```
//!
//! Longer reviews are assumed to carry more usable signal, so ranking is by
//! the characters of content plus title. The capped set is then presented
//! newest first. Every sort is stable, which makes the whole pipeline
//! deterministic for a given input.

use std::cmp::Reverse;
use std::collections::HashSet;

use crate::domain::{Review, StrippedReview};

/// Reviews kept after ranking unless configured otherwise.
pub const DEFAULT_REVIEW_CAP: usize = 500;

/// Rank by informativeness, keep the top `cap`, then order newest first.
///
/// Reviews with an unparseable date go last, keeping their ranked order.
pub fn select_reviews(mut reviews: Vec<Review>, cap: usize) -> Vec<Review> {
    reviews.sort_by_key(|r| Reverse(r.informativeness()));
    reviews.truncate(cap);
    reviews.sort_by_key(|r| Reverse(r.timestamp()));
    reviews
}

/// Copies for the summarizer with author and date removed.
pub fn strip_for_analysis(reviews: &[Review]) -> Vec<StrippedReview<'_>> {
    reviews.iter().map(Review::stripped).collect()
}

/// Drop reviews whose author and content were already seen, keeping the
/// first occurrence. The same review is often served by several storefronts.
pub fn dedup_reviews(reviews: Vec<Review>) -> Vec<Review> {
    let mut seen = HashSet::new();
    let before = reviews.len();
    let unique: Vec<Review> = reviews
        .into_iter()
        .filter(|r| seen.insert(r.fingerprint()))
        .collect();

    if unique.len() < before {
        tracing::debug!("Dropped {} duplicate reviews", before - unique.len());
    }
    unique
}
