//! Interactions and ratings.

use crate::models::Person;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A binary sentiment mark attached to one interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    /// A `+` rating.
    Positive,
    /// A `-` rating.
    Negative,
}

impl Rating {
    /// Returns the wire character for this rating.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Positive => '+',
            Self::Negative => '-',
        }
    }

    /// Returns the wire token as a string slice.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "+",
            Self::Negative => "-",
        }
    }

    /// Parses a rating token. Returns `None` for anything but `+`/`-`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "+" => Some(Self::Positive),
            "-" => Some(Self::Negative),
            _ => None,
        }
    }

    /// Converts a rating character from the extractor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRating`] for characters outside `+`/`-`. The
    /// grammars only admit those two, so hitting this error means the grammar
    /// and the extractor have drifted apart.
    pub const fn from_char(c: char) -> Result<Self> {
        match c {
            '+' => Ok(Self::Positive),
            '-' => Ok(Self::Negative),
            other => Err(Error::InvalidRating(other)),
        }
    }

    /// Returns the Slack emoji shorthand for this rating.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Positive => ":slightly_smiling_face:",
            Self::Negative => ":white_frowning_face:",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One directional rating event: `rater` rated `ratee`.
///
/// Interactions reported in a single submission batch share one
/// `conversation` id; each separate batch gets a fresh one. Conversations
/// reported by different people cannot be linked, so one real-world exchange
/// may present as several conversation ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    /// Stable unique identifier.
    pub guid: Uuid,
    /// Batch grouping identifier, shared by all interactions of one submission.
    pub conversation: Uuid,
    /// The person who reported the rating.
    pub rater: Person,
    /// The person being rated. Nullable only at the type level; creation
    /// always sets it.
    pub ratee: Option<Person>,
    /// The sentiment mark.
    pub rating: Rating,
    /// When the interaction was recorded.
    pub created: DateTime<Utc>,
}

impl Interaction {
    /// Creates a new interaction timestamped now.
    #[must_use]
    pub fn new(rater: Person, ratee: Person, rating: Rating, conversation: Uuid) -> Self {
        Self {
            guid: Uuid::new_v4(),
            conversation,
            rater,
            ratee: Some(ratee),
            rating,
            created: Utc::now(),
        }
    }

    /// One-line summary used in log listings.
    #[must_use]
    pub fn summary(&self) -> String {
        let ratee = self
            .ratee
            .as_ref()
            .map_or_else(|| "(unknown)".to_string(), ToString::to_string);
        format!(
            "*{ratee}*\t{}\t*{}*",
            self.created.format("%d %b %Y"),
            self.rating.icon()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_round_trip() {
        assert_eq!(Rating::parse("+"), Some(Rating::Positive));
        assert_eq!(Rating::parse("-"), Some(Rating::Negative));
        assert_eq!(Rating::parse("?"), None);
        assert_eq!(Rating::Positive.as_char(), '+');
        assert_eq!(Rating::Negative.as_char(), '-');
    }

    #[test]
    fn test_from_char_rejects_stray_tokens() {
        assert!(matches!(Rating::from_char('+'), Ok(Rating::Positive)));
        assert!(matches!(
            Rating::from_char('*'),
            Err(crate::Error::InvalidRating('*'))
        ));
    }

    #[test]
    fn test_summary_line() {
        let interaction = Interaction::new(
            Person::new("@U1"),
            Person::new("Trisha"),
            Rating::Positive,
            Uuid::new_v4(),
        );
        let line = interaction.summary();
        assert!(line.starts_with("*Trisha*"));
        assert!(line.ends_with("*:slightly_smiling_face:*"));
    }
}
