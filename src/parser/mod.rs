//! Command classification and text-to-structure parsing.
//!
//! The pipeline is: trim the webhook text, classify it against the four
//! command grammars with [`classify`], then hand the text to the per-kind
//! parser ([`extract`] for create, [`parse_log_request`] for logs).
//! [`parse_command`] runs the whole pipeline and never fails; ambiguous or
//! unmatched text becomes [`ParsedCommand::Unrecognized`].

mod classifier;
mod extractor;
mod log_request;

pub use classifier::classify;
pub use extractor::extract;
pub use log_request::parse_log_request;

use crate::models::{CommandKind, ParsedCommand};

/// Parses webhook text into a [`ParsedCommand`].
#[must_use]
pub fn parse_command(text: &str) -> ParsedCommand {
    let trimmed = text.trim();
    match classify(trimmed) {
        Ok(CommandKind::Create) => ParsedCommand::Create(trimmed.to_string()),
        Ok(CommandKind::Logs) => ParsedCommand::Logs(parse_log_request(trimmed)),
        Ok(CommandKind::Clear) => ParsedCommand::Clear,
        Ok(CommandKind::Help) => ParsedCommand::Help,
        Err(_) => ParsedCommand::Unrecognized(trimmed.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AggregateMode, LogRequest, Rating};

    #[test]
    fn test_parse_command_routes_to_kind_payloads() {
        assert_eq!(
            parse_command("  clear  "),
            ParsedCommand::Clear,
            "input is trimmed before classification"
        );
        assert_eq!(parse_command("help"), ParsedCommand::Help);
        assert_eq!(
            parse_command("<@U2147483698> +"),
            ParsedCommand::Create("<@U2147483698> +".to_string())
        );
        assert_eq!(
            parse_command("90 time -"),
            ParsedCommand::Logs(LogRequest {
                days: 90,
                aggregate: Some(AggregateMode::Time),
                filter: Some(Rating::Negative),
            })
        );
        assert_eq!(
            parse_command("help clear"),
            ParsedCommand::Unrecognized("help clear".to_string())
        );
    }
}
