//! CLI command implementations.
//!
//! The binary simulates the slash-command webhook locally: it composes the
//! rater id the way the webhook did (an `@` prefix on the platform user id),
//! dispatches the text, and prints the payload the webhook would have
//! returned.

use crate::rendering::{failure_message, render_outcome, unrecognized_message};
use crate::services::CommandDispatcher;
use crate::storage::SqliteStore;
use crate::{Error, RapportConfig};
use serde_json::Value;
use std::sync::Arc;

/// Runs one slash-command invocation and returns the response payload.
///
/// Recoverable errors render the same user-facing payloads the webhook
/// produced: unrecognized text becomes the help prompt, and a self-rating
/// or an out-of-range day window becomes its rejection message. Everything
/// else bubbles up.
///
/// # Errors
///
/// Returns an error when the store cannot be opened or a store operation
/// fails.
pub fn run(config: &RapportConfig, user_id: &str, text: &str) -> crate::Result<Value> {
    let store = SqliteStore::new(&config.db_path)?;
    let dispatcher = CommandDispatcher::new(Arc::new(store));

    let rater_user_id = format!("@{}", user_id.trim_start_matches('@'));

    match dispatcher.dispatch(&rater_user_id, text) {
        Ok(outcome) => Ok(render_outcome(&outcome)),
        Err(Error::UnrecognizedCommand(_)) => Ok(unrecognized_message()),
        Err(err @ (Error::SelfRatingRejected | Error::InvalidRating(_) | Error::InvalidInput(_))) => {
            let mut payload = failure_message();
            payload["text"] = Value::String(format!("{err}"));
            Ok(payload)
        },
        Err(err) => Err(err),
    }
}
