//! Command grammars.
//!
//! Static pattern data for command classification and token extraction.
//! Every grammar is compiled once into a [`LazyLock`] and shared immutably
//! across calls; there is no per-call construction cost.
//!
//! The classification grammars are anchored (`^...$`) because a command is
//! only accepted when its grammar covers the *entire* trimmed input. The
//! token extractors are unanchored and used for first-occurrence scans.
// Allow expect() on static regex patterns - these are guaranteed to compile
#![allow(clippy::expect_used)]

use regex::Regex;
use std::sync::LazyLock;

/// A platform-mention token: `<@` + alphanumerics + optional suffix + `>`.
///
/// The optional `[^>]` tolerates the single trailing character Slack appends
/// to some mention forms (e.g. `<@U123|x>`-style remnants).
const MENTION: &str = r"<@[0-9a-zA-Z]+[^>]?>";

/// A raw name: one word, optionally joined to a second by one separator.
///
/// Supports two-word names like "Joseph Curtin".
const RAW_NAME: &str = r"[a-zA-Z]+(?:\W[a-zA-Z]+)?";

/// A rating token: literal `+` or `-`.
const RATING: &str = r"[+-]";

/// One entity block: mentions or raw names, then an optional separator,
/// then one or more rating tokens.
fn entity_block_source() -> String {
    format!(r"(?:(?:{MENTION})+\W?{RATING}+|(?:{RAW_NAME})+\W?{RATING}+)")
}

/// Unanchored entity-block scanner used by the interaction extractor.
pub static ENTITY_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&entity_block_source()).expect("static regex: entity block")
});

/// Whole-input grammar for the create command: one or more entity blocks
/// separated by single non-word characters.
pub static CREATE_GRAMMAR: LazyLock<Regex> = LazyLock::new(|| {
    let block = entity_block_source();
    Regex::new(&format!(r"(?i)^{block}(?:\W{block})*$")).expect("static regex: create grammar")
});

/// Whole-input grammar for the logs command: optional day count, optional
/// aggregation keyword, optional rating filter, in that fixed order.
///
/// Every field is optional, so the empty string matches (a bare
/// `/interactions` lists the recent log).
pub static LOGS_GRAMMAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:[0-9]+)?(?:\W?(?:person|time))?(?:\W?[+-])?$")
        .expect("static regex: logs grammar")
});

/// Whole-input grammar for the clear command.
pub static CLEAR_GRAMMAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^clear$").expect("static regex: clear grammar"));

/// Whole-input grammar for the help command.
pub static HELP_GRAMMAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^help$").expect("static regex: help grammar"));

/// Unanchored day-count token (a digit run).
pub static DAYS_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("static regex: days token"));

/// Unanchored aggregation keyword token.
pub static AGGREGATE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)person|time").expect("static regex: aggregate token"));

/// Unanchored rating-filter token.
pub static FILTER_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[+-]").expect("static regex: filter token"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_grammar_matches_mentions_and_names() {
        assert!(CREATE_GRAMMAR.is_match("<@U2398577> +"));
        assert!(CREATE_GRAMMAR.is_match("<@U2398577> + <@U2498577> - <@U2598577> +"));
        assert!(CREATE_GRAMMAR.is_match("Joseph Curtin +"));
        assert!(CREATE_GRAMMAR.is_match("Joseph Curtin + <@U23787> - <@U298333> + Trisha -"));
        assert!(CREATE_GRAMMAR.is_match("<@U2398578>-"));
    }

    #[test]
    fn test_create_grammar_requires_rating() {
        assert!(!CREATE_GRAMMAR.is_match("Joseph Curtin"));
        assert!(!CREATE_GRAMMAR.is_match("<@U2398577>"));
        assert!(!CREATE_GRAMMAR.is_match("+ @U23984"));
    }

    #[test]
    fn test_logs_grammar_field_combinations() {
        for text in ["", "90", "person", "time", "+", "-", "90 time", "90 person", "90 time -"] {
            assert!(LOGS_GRAMMAR.is_match(text), "should match: {text:?}");
        }
    }

    #[test]
    fn test_logs_grammar_rejects_out_of_order_fields() {
        // The grammar enforces days, aggregate, filter in that order.
        for text in ["time 90", "+ 90", "- person", "person time"] {
            assert!(!LOGS_GRAMMAR.is_match(text), "should not match: {text:?}");
        }
    }

    #[test]
    fn test_literal_grammars_are_case_insensitive() {
        assert!(CLEAR_GRAMMAR.is_match("clear"));
        assert!(CLEAR_GRAMMAR.is_match("CLEAR"));
        assert!(HELP_GRAMMAR.is_match("Help"));
        assert!(!CLEAR_GRAMMAR.is_match("clear logs"));
    }

    #[test]
    fn test_entity_block_scan_order() {
        let blocks: Vec<&str> = ENTITY_BLOCK
            .find_iter("Trisha + <@U2398578>-")
            .map(|m| m.as_str())
            .collect();
        assert_eq!(blocks, vec!["Trisha +", "<@U2398578>-"]);
    }
}
