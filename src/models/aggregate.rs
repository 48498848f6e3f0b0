//! Aggregated log shapes.

use crate::models::Rating;
use serde::Serialize;

/// Positive/negative tallies for one aggregation bucket.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RatingCounts {
    /// Number of `+` ratings.
    pub positive: u64,
    /// Number of `-` ratings.
    pub negative: u64,
}

impl RatingCounts {
    /// Tallies one rating.
    pub const fn record(&mut self, rating: Rating) {
        match rating {
            Rating::Positive => self.positive += 1,
            Rating::Negative => self.negative += 1,
        }
    }

    /// Total ratings tallied.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.positive + self.negative
    }
}

/// An insertion-ordered mapping of bucket label to rating counts.
///
/// Keys are either a counterpart person (person aggregation, first-seen
/// order) or a bucket start date (time aggregation, chronological order).
/// Order is preserved so empty middle buckets keep the series continuous
/// for charting.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AggregatedLogs {
    entries: Vec<(String, RatingCounts)>,
}

impl AggregatedLogs {
    /// Creates an empty aggregation.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Returns the counts for `key`, inserting a zeroed bucket if absent.
    pub fn entry(&mut self, key: impl Into<String>) -> &mut RatingCounts {
        let key = key.into();
        if let Some(idx) = self.entries.iter().position(|(k, _)| *k == key) {
            &mut self.entries[idx].1
        } else {
            self.entries.push((key, RatingCounts::default()));
            // Just pushed, so the vector is non-empty.
            let last = self.entries.len() - 1;
            &mut self.entries[last].1
        }
    }

    /// Returns the counts for `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&RatingCounts> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, c)| c)
    }

    /// Iterates buckets in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RatingCounts)> {
        self.entries.iter().map(|(k, c)| (k.as_str(), c))
    }

    /// Number of buckets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no buckets were generated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all bucket totals.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, c)| c.total()).sum()
    }
}
