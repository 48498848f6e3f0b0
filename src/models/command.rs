//! Parsed command shapes.

use crate::models::Rating;
use serde::{Deserialize, Serialize};

/// Default day window for log retrieval when the text names none.
pub const DEFAULT_LOG_DAYS: i64 = 30;

/// The four recognized command kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandKind {
    /// Record one or more interactions.
    Create,
    /// List or aggregate the interaction log.
    Logs,
    /// Clear the caller's interaction log.
    Clear,
    /// Show the help message.
    Help,
}

impl CommandKind {
    /// Returns the command name used in logging and metrics labels.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Logs => "logs",
            Self::Clear => "clear",
            Self::Help => "help",
        }
    }
}

/// How a log listing should be aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateMode {
    /// Group by counterpart person.
    Person,
    /// Group by fixed-size time buckets.
    Time,
}

impl AggregateMode {
    /// Parses an aggregation keyword, case-insensitively.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "person" => Some(Self::Person),
            "time" => Some(Self::Time),
            _ => None,
        }
    }
}

/// The structured form of a logs command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRequest {
    /// Day window to retrieve, counted back from now.
    pub days: i64,
    /// Requested aggregation, if any.
    pub aggregate: Option<AggregateMode>,
    /// Rating filter, if any.
    pub filter: Option<Rating>,
}

impl Default for LogRequest {
    fn default() -> Self {
        Self {
            days: DEFAULT_LOG_DAYS,
            aggregate: None,
            filter: None,
        }
    }
}

/// A classified command with its per-kind payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedCommand {
    /// Record the interactions described by the raw text.
    Create(String),
    /// List or aggregate logs per the parsed request.
    Logs(LogRequest),
    /// Clear the caller's log.
    Clear,
    /// Show help.
    Help,
    /// The text did not resolve to exactly one command.
    Unrecognized(String),
}
