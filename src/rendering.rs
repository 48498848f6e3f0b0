//! Slack-style response payloads.
//!
//! Thin presentation layer: every outcome becomes an ephemeral payload with
//! a `text` line and optional `attachments`. The webhook transport (or the
//! CLI) just serializes whatever comes out of here.

use crate::models::AggregatedLogs;
use crate::services::CommandOutcome;
use serde_json::{json, Value};

/// The static help payload listing every supported command.
#[must_use]
pub fn help_message() -> Value {
    json!({
        "response_type": "ephemeral",
        "text": "Rate your interactions with people as a positive (*+*) or \
                 negative (*-*), each time. Over time you can see who is most \
                 worth spending your time with! Here are the commands you might need.",
        "attachments": [
            {"text": "Create an interaction: `/interactions @will +`"},
            {"text": "Create a few: `/interactions @will + @don + Random Name -`"},
            {"text": "See them: `/interactions`"},
            {"text": "See them for this week: `/interactions 7`"},
            {"text": "See this year, categorized by person: `/interactions 365 person`"},
            {"text": "See this month, categorized by week: `/interactions 31 time`"},
            {"text": "See only positives: `/interactions +`"},
            {"text": "See only in the past 45 days: `/interactions 45 -`"},
            {"text": "Clear your logs: `/interactions clear` :warning: No confirmation!"},
            {"text": "See this message: `/interactions help`"},
        ],
    })
}

/// The payload shown when text resolves to no (or several) commands.
#[must_use]
pub fn unrecognized_message() -> Value {
    let mut payload = help_message();
    payload["text"] = json!("We don't know that one! Try these: ");
    payload
}

fn aggregated_attachments(aggregated: &AggregatedLogs) -> Vec<Value> {
    aggregated
        .iter()
        .map(|(key, counts)| {
            json!({
                "text": format!(
                    "{key}:: *positive* {} / *negative* {}",
                    counts.positive, counts.negative
                )
            })
        })
        .collect()
}

/// Renders an executed command outcome as a response payload.
#[must_use]
pub fn render_outcome(outcome: &CommandOutcome) -> Value {
    match outcome {
        CommandOutcome::Created(count) => {
            let noun = if *count == 1 { "interaction" } else { "interactions" };
            json!({
                "response_type": "ephemeral",
                "text": format!("We logged {count} {noun} for you. Thanks!"),
            })
        },
        CommandOutcome::Logs(logs) => {
            let mut attachments: Vec<Value> = logs
                .iter()
                .map(|interaction| json!({"text": interaction.summary()}))
                .collect();
            attachments.push(json!({
                "text": "See more by adding an aggregation term like `/interactions 90 person`."
            }));
            json!({
                "response_type": "ephemeral",
                "text": "These are some of your interaction logs!",
                "attachments": attachments,
            })
        },
        CommandOutcome::Aggregated(aggregated) => json!({
            "response_type": "ephemeral",
            "text": "These are your aggregated interaction logs!",
            "attachments": aggregated_attachments(aggregated),
        }),
        CommandOutcome::Cleared(_) => json!({
            "response_type": "ephemeral",
            "text": "You're all clear. Thanks!",
        }),
        CommandOutcome::Help => help_message(),
    }
}

/// The apologetic payload for unexpected failures.
#[must_use]
pub fn failure_message() -> Value {
    json!({
        "response_type": "ephemeral",
        "text": "Sorry, that didn't work. :-( ",
    })
}
