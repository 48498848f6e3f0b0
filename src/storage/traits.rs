//! Record store trait.

use crate::models::{Interaction, Person, Rating};
use crate::Result;
use chrono::{DateTime, Utc};

/// The record store the core consumes.
///
/// Implementations must make person creation race-safe on the unique
/// `user_id` key: two concurrent get-or-creates for the same id resolve to a
/// single stored person, never an error. Bulk insertion is a single
/// transaction, so a failed batch persists nothing.
pub trait RecordStore: Send + Sync {
    /// Fetches the person keyed by `user_id`, creating them on first
    /// reference.
    fn find_or_create_person(&self, user_id: &str) -> Result<Person>;

    /// Inserts a batch of interactions atomically. Returns how many were
    /// written.
    fn bulk_insert_interactions(&self, batch: &[Interaction]) -> Result<usize>;

    /// Returns interactions reported by `rater` since the given instant,
    /// newest first, optionally filtered by rating.
    fn query_interactions(
        &self,
        rater: &Person,
        since: DateTime<Utc>,
        filter: Option<Rating>,
    ) -> Result<Vec<Interaction>>;

    /// Deletes every interaction reported by `rater`. Returns how many rows
    /// were removed. The person record itself is untouched.
    fn delete_interactions(&self, rater: &Person) -> Result<usize>;
}
