//! Log-request parsing.

use crate::grammar::{AGGREGATE_TOKEN, DAYS_TOKEN, FILTER_TOKEN};
use crate::models::{AggregateMode, LogRequest, Rating, DEFAULT_LOG_DAYS};

/// Parses logs-command text into a [`LogRequest`].
///
/// Each field is extracted independently by first occurrence: the first digit
/// run becomes the day window, the first `person`/`time` keyword the
/// aggregation mode, and the first `+`/`-` the rating filter. The logs
/// grammar already rejected any text with the fields out of order, so
/// positional tolerance here is safe.
///
/// The day window falls back to [`DEFAULT_LOG_DAYS`] when absent, unparsable,
/// or zero.
#[must_use]
pub fn parse_log_request(text: &str) -> LogRequest {
    let days = DAYS_TOKEN
        .find(text)
        .and_then(|m| m.as_str().parse::<i64>().ok())
        .filter(|&d| d > 0)
        .unwrap_or(DEFAULT_LOG_DAYS);

    let aggregate = AGGREGATE_TOKEN
        .find(text)
        .and_then(|m| AggregateMode::parse(m.as_str()));

    let filter = FILTER_TOKEN.find(text).and_then(|m| Rating::parse(m.as_str()));

    LogRequest {
        days,
        aggregate,
        filter,
    }
}
