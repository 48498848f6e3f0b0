//! Domain models.

mod aggregate;
mod command;
mod interaction;
mod person;

pub use aggregate::{AggregatedLogs, RatingCounts};
pub use command::{AggregateMode, CommandKind, LogRequest, ParsedCommand, DEFAULT_LOG_DAYS};
pub use interaction::{Interaction, Rating};
pub use person::Person;
