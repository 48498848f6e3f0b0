//! Interaction lifecycle against the record store.

use crate::models::{AggregateMode, AggregatedLogs, Interaction, Rating};
use crate::parser::extract;
use crate::services::aggregation::aggregate;
use crate::storage::RecordStore;
use crate::{Error, Result};
use chrono::{Duration, Utc};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

/// Creates, retrieves, aggregates, and clears interactions for a rater.
pub struct InteractionService {
    store: Arc<dyn RecordStore>,
}

impl InteractionService {
    /// Creates a service over the given record store.
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Records the interactions described by create-command text.
    ///
    /// All interactions of one call share a fresh conversation id. Subjects
    /// are get-or-created by their token. The whole batch is validated before
    /// anything is written, so a rejected batch persists nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SelfRatingRejected`] when the rater appears as a
    /// subject, [`Error::InvalidRating`] when a rating character outside
    /// `+`/`-` slipped through extraction, and [`Error::InvalidInput`] when
    /// the text contains no entity blocks.
    #[instrument(skip(self, text), fields(rater = rater_user_id))]
    pub fn record(&self, rater_user_id: &str, text: &str) -> Result<Vec<Interaction>> {
        let tuples = extract(text);
        if tuples.is_empty() {
            return Err(Error::InvalidInput(
                "no interactions found in text".to_string(),
            ));
        }

        let rater = self.store.find_or_create_person(rater_user_id)?;
        let conversation = Uuid::new_v4();

        let mut batch = Vec::with_capacity(tuples.len());
        for (subject, rating_char) in tuples {
            let rating = Rating::from_char(rating_char)?;
            let ratee = self.store.find_or_create_person(&subject)?;
            if ratee.guid == rater.guid {
                return Err(Error::SelfRatingRejected);
            }
            batch.push(Interaction::new(rater.clone(), ratee, rating, conversation));
        }

        self.store.bulk_insert_interactions(&batch)?;
        tracing::info!(count = batch.len(), %conversation, "recorded interactions");
        Ok(batch)
    }

    /// Retrieves the rater's log for the past `days`, newest first.
    ///
    /// `limit`, when given, truncates the listing after retrieval.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] when `days` is too large to subtract
    /// from the current time. The grammar admits any digit run, so absurd
    /// windows must be rejected here rather than overflowing.
    #[instrument(skip(self), fields(rater = rater_user_id))]
    pub fn retrieve_logs(
        &self,
        rater_user_id: &str,
        days: i64,
        filter: Option<Rating>,
        limit: Option<usize>,
    ) -> Result<Vec<Interaction>> {
        let rater = self.store.find_or_create_person(rater_user_id)?;
        let since = Duration::try_days(days)
            .and_then(|window| Utc::now().checked_sub_signed(window))
            .ok_or_else(|| Error::InvalidInput(format!("day window {days} is out of range")))?;
        let mut interactions = self.store.query_interactions(&rater, since, filter)?;
        if let Some(limit) = limit {
            interactions.truncate(limit);
        }
        Ok(interactions)
    }

    /// Retrieves and aggregates the rater's log for the past `days`.
    ///
    /// Aggregation always runs over the full window, never a truncated
    /// listing.
    #[instrument(skip(self), fields(rater = rater_user_id))]
    pub fn retrieve_aggregated_logs(
        &self,
        rater_user_id: &str,
        days: i64,
        mode: AggregateMode,
        filter: Option<Rating>,
    ) -> Result<AggregatedLogs> {
        let interactions = self.retrieve_logs(rater_user_id, days, filter, None)?;
        Ok(aggregate(&interactions, mode, days))
    }

    /// Deletes every interaction where this person is the rater.
    ///
    /// Interactions where they are the ratee, and the person record itself,
    /// are left intact. Returns the number of deleted interactions.
    #[instrument(skip(self), fields(rater = rater_user_id))]
    pub fn clear_logs(&self, rater_user_id: &str) -> Result<usize> {
        let rater = self.store.find_or_create_person(rater_user_id)?;
        let deleted = self.store.delete_interactions(&rater)?;
        tracing::info!(deleted, "cleared interaction log");
        Ok(deleted)
    }
}
