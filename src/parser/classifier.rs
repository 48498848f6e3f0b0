//! Exclusive-match command classification.

use crate::grammar::{CLEAR_GRAMMAR, CREATE_GRAMMAR, HELP_GRAMMAR, LOGS_GRAMMAR};
use crate::models::CommandKind;
use crate::{Error, Result};
use regex::Regex;

/// The ranked classification rules, checked in order: clear, create, logs,
/// help. A rule only wins when its grammar is the *only* one of the four that
/// covers the full trimmed text, so the order matters solely as a guard
/// against pathological grammar overlap.
fn rules() -> [(CommandKind, &'static Regex); 4] {
    [
        (CommandKind::Clear, &*CLEAR_GRAMMAR),
        (CommandKind::Create, &*CREATE_GRAMMAR),
        (CommandKind::Logs, &*LOGS_GRAMMAR),
        (CommandKind::Help, &*HELP_GRAMMAR),
    ]
}

/// Classifies webhook text as exactly one command kind.
///
/// The text is trimmed first. Because every field of the logs grammar is
/// optional, the empty string classifies as [`CommandKind::Logs`].
///
/// # Errors
///
/// Returns [`Error::UnrecognizedCommand`] when zero grammars match the full
/// text, or when more than one does (e.g. `person +` satisfies both the
/// create and the logs grammar).
pub fn classify(text: &str) -> Result<CommandKind> {
    let text = text.trim();
    let mut matched = rules()
        .into_iter()
        .filter(|(_, grammar)| grammar.is_match(text));

    match (matched.next(), matched.next()) {
        (Some((kind, _)), None) => Ok(kind),
        _ => Err(Error::UnrecognizedCommand(text.to_string())),
    }
}
