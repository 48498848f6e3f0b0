//! Service layer: aggregation, interaction lifecycle, command dispatch.

mod aggregation;
mod dispatch;
mod interactions;

pub use aggregation::{aggregate, aggregate_by_person, aggregate_by_time, bucket_width_days};
pub use dispatch::{CommandDispatcher, CommandOutcome, LOG_LISTING_LIMIT};
pub use interactions::InteractionService;
