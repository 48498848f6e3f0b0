//! People referenced by interactions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A person on either side of an interaction.
///
/// Identity is the opaque `user_id` string: a platform handle like
/// `@U2147483697`, or a freeform display name used as a key for people
/// reported without `@`-notation. People are created on first reference
/// (get-or-create) and never deleted by this core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Stable unique identifier.
    pub guid: Uuid,
    /// Unique key: platform handle or raw name.
    pub user_id: String,
    /// Optional human-facing name.
    pub display_name: Option<String>,
    /// When this person was first referenced.
    pub created: DateTime<Utc>,
}

impl Person {
    /// Creates a new person keyed by `user_id`, timestamped now.
    #[must_use]
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            guid: Uuid::new_v4(),
            user_id: user_id.into(),
            display_name: None,
            created: Utc::now(),
        }
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.display_name.as_deref() {
            Some(name) if !name.is_empty() => write!(f, "{name}"),
            _ => write!(f, "{}", self.user_id),
        }
    }
}
