//! Orchestration glue: parsed command to executed outcome.

use crate::models::{AggregatedLogs, Interaction, ParsedCommand};
use crate::parser::parse_command;
use crate::services::InteractionService;
use crate::storage::RecordStore;
use crate::{Error, Result};
use std::sync::Arc;
use tracing::instrument;

/// How many interactions a plain (unaggregated) listing shows.
pub const LOG_LISTING_LIMIT: usize = 5;

/// The result of executing one command.
#[derive(Debug)]
pub enum CommandOutcome {
    /// Interactions were recorded; carries how many.
    Created(usize),
    /// A plain log listing, newest first, capped at [`LOG_LISTING_LIMIT`].
    Logs(Vec<Interaction>),
    /// An aggregated log listing.
    Aggregated(AggregatedLogs),
    /// The rater's log was cleared; carries how many rows went away.
    Cleared(usize),
    /// The help message should be shown.
    Help,
}

/// Wires the classifier output to extraction, parsing, aggregation, and the
/// record store.
pub struct CommandDispatcher {
    interactions: InteractionService,
}

impl CommandDispatcher {
    /// Creates a dispatcher over the given record store.
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            interactions: InteractionService::new(store),
        }
    }

    /// Classifies `text` and executes the resulting command for
    /// `rater_user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnrecognizedCommand`] for text that resolves to zero
    /// or several grammars, plus whatever the underlying service operations
    /// raise.
    #[instrument(skip(self, text), fields(rater = rater_user_id))]
    pub fn dispatch(&self, rater_user_id: &str, text: &str) -> Result<CommandOutcome> {
        let command = parse_command(text);
        let label = command_label(&command);
        metrics::counter!("rapport_commands_total", "command" => label).increment(1);

        match command {
            ParsedCommand::Create(raw) => {
                let created = self.interactions.record(rater_user_id, &raw)?;
                Ok(CommandOutcome::Created(created.len()))
            },
            ParsedCommand::Logs(request) => match request.aggregate {
                Some(mode) => {
                    let aggregated = self.interactions.retrieve_aggregated_logs(
                        rater_user_id,
                        request.days,
                        mode,
                        request.filter,
                    )?;
                    Ok(CommandOutcome::Aggregated(aggregated))
                },
                None => {
                    let logs = self.interactions.retrieve_logs(
                        rater_user_id,
                        request.days,
                        request.filter,
                        Some(LOG_LISTING_LIMIT),
                    )?;
                    Ok(CommandOutcome::Logs(logs))
                },
            },
            ParsedCommand::Clear => {
                let deleted = self.interactions.clear_logs(rater_user_id)?;
                Ok(CommandOutcome::Cleared(deleted))
            },
            ParsedCommand::Help => Ok(CommandOutcome::Help),
            ParsedCommand::Unrecognized(raw) => {
                tracing::debug!(text = %raw, "unrecognized command text");
                Err(Error::UnrecognizedCommand(raw))
            },
        }
    }
}

const fn command_label(command: &ParsedCommand) -> &'static str {
    match command {
        ParsedCommand::Create(_) => "create",
        ParsedCommand::Logs(_) => "logs",
        ParsedCommand::Clear => "clear",
        ParsedCommand::Help => "help",
        ParsedCommand::Unrecognized(_) => "unrecognized",
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::storage::SqliteStore;

    fn dispatcher() -> CommandDispatcher {
        let store = SqliteStore::in_memory().expect("in-memory store");
        CommandDispatcher::new(Arc::new(store))
    }

    #[test]
    fn test_dispatch_create_then_logs() -> Result<()> {
        let dispatcher = dispatcher();

        let outcome = dispatcher.dispatch("@U1", "<@U2> + Trisha -")?;
        assert!(matches!(outcome, CommandOutcome::Created(2)));

        let outcome = dispatcher.dispatch("@U1", "")?;
        match outcome {
            CommandOutcome::Logs(logs) => assert_eq!(logs.len(), 2),
            other => panic!("expected logs, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn test_dispatch_aggregated_logs() -> Result<()> {
        let dispatcher = dispatcher();
        dispatcher.dispatch("@U1", "<@U2> + <@U2> + <@U3> -")?;

        let outcome = dispatcher.dispatch("@U1", "30 person")?;
        match outcome {
            CommandOutcome::Aggregated(aggregated) => {
                assert_eq!(aggregated.get("@U2").map(|c| c.positive), Some(2));
                assert_eq!(aggregated.get("@U3").map(|c| c.negative), Some(1));
            },
            other => panic!("expected aggregation, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn test_dispatch_clear_and_help() -> Result<()> {
        let dispatcher = dispatcher();
        dispatcher.dispatch("@U1", "<@U2> +")?;

        assert!(matches!(
            dispatcher.dispatch("@U1", "clear")?,
            CommandOutcome::Cleared(1)
        ));
        assert!(matches!(
            dispatcher.dispatch("@U1", "help")?,
            CommandOutcome::Help
        ));
        Ok(())
    }

    #[test]
    fn test_dispatch_unrecognized() {
        let dispatcher = dispatcher();
        assert!(matches!(
            dispatcher.dispatch("@U1", "help clear"),
            Err(Error::UnrecognizedCommand(_))
        ));
    }
}
