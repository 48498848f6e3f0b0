//! The record store.

mod sqlite;
mod traits;

pub use sqlite::SqliteStore;
pub use traits::RecordStore;
