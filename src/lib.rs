//! # Rapport
//!
//! Slash-command interaction tracker.
//!
//! Rapport interprets the free-form text of a `/interactions`-style slash
//! command, turning it into one of four actions: record interactions, list or
//! aggregate the interaction log, clear the log, or show help. Every
//! interaction is a binary rating (`+` or `-`) of one person by another,
//! grouped into a conversation per submitted batch.
//!
//! The crate is organized around a small pipeline:
//!
//! - [`grammar`]: compiled-once regex grammars for the four command shapes
//! - [`parser`]: exclusive-match classification and text-to-structure parsing
//! - [`storage`]: the SQLite-backed record store
//! - [`services`]: creation, retrieval, aggregation, and command dispatch
//! - [`rendering`]: Slack-style response payloads
//!
//! ## Example
//!
//! ```rust,ignore
//! use rapport::services::CommandDispatcher;
//! use rapport::storage::SqliteStore;
//! use std::sync::Arc;
//!
//! let store = Arc::new(SqliteStore::in_memory()?);
//! let dispatcher = CommandDispatcher::new(store);
//! let outcome = dispatcher.dispatch("@U2147483697", "<@U2147483698> +")?;
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![allow(clippy::multiple_crate_versions)]

use thiserror::Error as ThisError;

// Module declarations
pub mod cli;
pub mod config;
pub mod grammar;
pub mod models;
pub mod observability;
pub mod parser;
pub mod rendering;
pub mod services;
pub mod storage;

// Re-exports for convenience
pub use config::RapportConfig;
pub use models::{
    AggregateMode, AggregatedLogs, CommandKind, Interaction, LogRequest, ParsedCommand, Person,
    Rating, RatingCounts, DEFAULT_LOG_DAYS,
};
pub use parser::{classify, extract, parse_command, parse_log_request};
pub use services::{CommandDispatcher, CommandOutcome, InteractionService};
pub use storage::{RecordStore, SqliteStore};

/// Error type for rapport operations.
///
/// Uses `thiserror` for automatic `Display` and `Error` trait implementations.
///
/// # Error Variant Triggers
///
/// | Variant | Raised When |
/// |---------|-------------|
/// | `UnrecognizedCommand` | Text matches zero or more than one command grammar |
/// | `SelfRatingRejected` | A batch contains an interaction where rater == ratee |
/// | `InvalidRating` | A rating character outside `+`/`-` reaches the create path |
/// | `InvalidInput` | Missing or malformed caller-supplied parameters |
/// | `OperationFailed` | SQLite failures, I/O errors, subscriber init failures |
#[derive(Debug, ThisError)]
pub enum Error {
    /// The command text did not resolve to exactly one command grammar.
    ///
    /// Recoverable: callers surface this as a help prompt.
    #[error("unrecognized command: {0:?}")]
    UnrecognizedCommand(String),

    /// Someone tried to rate themselves.
    ///
    /// Recoverable: surfaced as a user-facing rejection. Nothing from the
    /// offending batch is persisted.
    #[error("you can't rate yourself")]
    SelfRatingRejected,

    /// A rating token outside `+`/`-` reached the create path.
    ///
    /// This indicates a grammar/extraction inconsistency and is a programmer
    /// error, not a user-recoverable condition.
    #[error("invalid rating {0:?} - use '+' or '-'")]
    InvalidRating(char),

    /// Invalid input was provided by the caller.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation failed.
    #[error("operation '{operation}' failed: {cause}")]
    OperationFailed {
        /// The operation that failed.
        operation: String,
        /// The underlying cause.
        cause: String,
    },
}

/// Result type alias for rapport operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnrecognizedCommand(";sadlfkjs;ldfj".to_string());
        assert!(err.to_string().contains("unrecognized command"));

        let err = Error::SelfRatingRejected;
        assert_eq!(err.to_string(), "you can't rate yourself");

        let err = Error::InvalidRating('?');
        assert!(err.to_string().contains("use '+' or '-'"));

        let err = Error::OperationFailed {
            operation: "open_sqlite".to_string(),
            cause: "disk full".to_string(),
        };
        assert!(err.to_string().contains("open_sqlite"));
        assert!(err.to_string().contains("disk full"));
    }
}
