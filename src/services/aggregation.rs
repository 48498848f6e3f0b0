//! Log aggregation.
//!
//! Groups recorded interactions either by counterpart person or by
//! fixed-size time buckets. The aggregator is pure computation over a list
//! the caller already retrieved; it is only invoked when an aggregation mode
//! was explicitly requested.

use crate::models::{AggregateMode, AggregatedLogs, Interaction};
use chrono::Duration;

/// Bucket width in days for a requested day window.
///
/// Small windows get daily buckets, medium windows weekly, anything from 60
/// days up gets 30-day buckets.
#[must_use]
pub const fn bucket_width_days(days: i64) -> i64 {
    if days < 14 {
        1
    } else if days < 60 {
        7
    } else {
        30
    }
}

/// Aggregates interactions per the requested mode.
///
/// `days` is the originally requested day window; it only influences the
/// bucket width of time aggregation.
#[must_use]
pub fn aggregate(interactions: &[Interaction], mode: AggregateMode, days: i64) -> AggregatedLogs {
    match mode {
        AggregateMode::Person => aggregate_by_person(interactions),
        AggregateMode::Time => aggregate_by_time(interactions, days),
    }
}

/// Groups interactions by ratee, tallying ratings per person.
///
/// Keys appear in first-seen order of the input list.
#[must_use]
pub fn aggregate_by_person(interactions: &[Interaction]) -> AggregatedLogs {
    let mut aggregated = AggregatedLogs::new();
    for interaction in interactions {
        let Some(ratee) = &interaction.ratee else {
            continue;
        };
        aggregated.entry(ratee.to_string()).record(interaction.rating);
    }
    aggregated
}

/// Groups interactions into consecutive half-open time buckets.
///
/// Starting from the earliest interaction, buckets of
/// [`bucket_width_days`]`(days)` are generated until the latest interaction
/// is covered. An interaction belongs to the bucket where
/// `start <= created && created < end`. Generated buckets are kept even when
/// empty, so the series stays continuous for charting. An empty input yields
/// an empty result.
///
/// Bucket labels are the bucket's start date as `%d %b %Y`.
#[must_use]
pub fn aggregate_by_time(interactions: &[Interaction], days: i64) -> AggregatedLogs {
    let mut aggregated = AggregatedLogs::new();

    let Some(first) = interactions.iter().map(|i| i.created).min() else {
        return aggregated;
    };
    let Some(last) = interactions.iter().map(|i| i.created).max() else {
        return aggregated;
    };

    let width = Duration::days(bucket_width_days(days));

    let mut start = first;
    while start <= last {
        let end = start + width;
        let counts = aggregated.entry(start.format("%d %b %Y").to_string());
        for interaction in interactions {
            if start <= interaction.created && interaction.created < end {
                counts.record(interaction.rating);
            }
        }
        start = end;
    }

    aggregated
}
