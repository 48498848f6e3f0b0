//! `SQLite`-backed record store.
//!
//! # Concurrency Model
//!
//! Uses a `Mutex<Connection>` for thread-safe access. `SQLite`'s WAL mode and
//! `busy_timeout` pragma mitigate contention:
//!
//! - **WAL mode**: Allows concurrent readers with a single writer
//! - **`busy_timeout`**: Waits up to 5 seconds for locks instead of failing
//!   immediately
//! - **NORMAL synchronous**: Balances durability with performance
//!
//! Person get-or-create relies on the unique `user_id` column plus
//! `ON CONFLICT DO NOTHING`, so duplicate-key races resolve to one row.

use crate::models::{Interaction, Person, Rating};
use crate::storage::traits::RecordStore;
use crate::{Error, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, params_from_iter, Connection, Row};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};
use tracing::instrument;
use uuid::Uuid;

/// Helper to acquire the connection mutex with poison recovery.
///
/// If the mutex is poisoned by a panic in a previous critical section, we
/// recover the inner value and log a warning; the connection state is still
/// valid.
fn acquire_lock(mutex: &Mutex<Connection>) -> MutexGuard<'_, Connection> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            tracing::warn!("SQLite mutex was poisoned, recovering");
            metrics::counter!("sqlite_mutex_poison_recovery_total").increment(1);
            poisoned.into_inner()
        },
    }
}

/// Configures a connection for concurrent access.
fn configure_connection(conn: &Connection) {
    // journal_mode returns the new mode as a row, which pragma_update treats
    // as an error on some backends (e.g. in-memory stays "memory"); the
    // result is intentionally ignored.
    let _ = conn.pragma_update(None, "journal_mode", "WAL");
    let _ = conn.pragma_update(None, "synchronous", "NORMAL");
    let _ = conn.pragma_update(None, "busy_timeout", "5000");
}

fn sqlite_error(operation: &str, e: &rusqlite::Error) -> Error {
    Error::OperationFailed {
        operation: operation.to_string(),
        cause: e.to_string(),
    }
}

/// `SQLite` record store for people and interactions.
pub struct SqliteStore {
    /// Protected by `Mutex` because `rusqlite::Connection` is not `Sync`.
    conn: Mutex<Connection>,
    /// Path to the database file (`None` for in-memory).
    db_path: Option<PathBuf>,
}

impl SqliteStore {
    /// Opens (or creates) the store at `db_path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or the schema
    /// cannot be initialized.
    pub fn new(db_path: impl Into<PathBuf>) -> Result<Self> {
        let db_path = db_path.into();
        let conn = Connection::open(&db_path).map_err(|e| sqlite_error("open_sqlite", &e))?;

        let store = Self {
            conn: Mutex::new(conn),
            db_path: Some(db_path),
        };
        store.initialize()?;
        Ok(store)
    }

    /// Creates an in-memory store (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be initialized.
    pub fn in_memory() -> Result<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| sqlite_error("open_sqlite_in_memory", &e))?;

        let store = Self {
            conn: Mutex::new(conn),
            db_path: None,
        };
        store.initialize()?;
        Ok(store)
    }

    /// Returns the database path (`None` for in-memory).
    #[must_use]
    pub const fn db_path(&self) -> Option<&PathBuf> {
        self.db_path.as_ref()
    }

    fn initialize(&self) -> Result<()> {
        let conn = acquire_lock(&self.conn);
        configure_connection(&conn);

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS people (
                guid TEXT PRIMARY KEY,
                user_id TEXT NOT NULL UNIQUE,
                display_name TEXT,
                created INTEGER NOT NULL
            );
            CREATE TABLE IF NOT EXISTS interactions (
                guid TEXT PRIMARY KEY,
                conversation TEXT NOT NULL,
                rater TEXT NOT NULL REFERENCES people(guid),
                ratee TEXT REFERENCES people(guid),
                rating TEXT NOT NULL CHECK (rating IN ('+', '-')),
                created INTEGER NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_interactions_rater_created
                ON interactions(rater, created DESC);
            CREATE INDEX IF NOT EXISTS idx_interactions_conversation
                ON interactions(conversation);",
        )
        .map_err(|e| sqlite_error("create_schema", &e))
    }
}

fn parse_guid(value: &str) -> rusqlite::Result<Uuid> {
    Uuid::parse_str(value).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

// Timestamps are stored as microseconds since the epoch; sub-microsecond
// precision is truncated on insert.
fn timestamp_to_datetime(micros: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_micros(micros).unwrap_or_default()
}

/// Builds a `Person` from four consecutive columns starting at `offset`:
/// guid, `user_id`, `display_name`, created.
fn person_from_row(row: &Row<'_>, offset: usize) -> rusqlite::Result<Person> {
    let guid: String = row.get(offset)?;
    Ok(Person {
        guid: parse_guid(&guid)?,
        user_id: row.get(offset + 1)?,
        display_name: row.get(offset + 2)?,
        created: timestamp_to_datetime(row.get(offset + 3)?),
    })
}

/// Builds an `Interaction` from a joined row laid out as:
/// interaction (guid, conversation, rating, created), rater person columns,
/// then nullable ratee person columns.
fn interaction_from_row(row: &Row<'_>) -> rusqlite::Result<Interaction> {
    let guid: String = row.get(0)?;
    let conversation: String = row.get(1)?;
    let rating: String = row.get(2)?;
    let rating = Rating::parse(&rating).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            2,
            rusqlite::types::Type::Text,
            format!("invalid rating {rating:?}").into(),
        )
    })?;

    let rater = person_from_row(row, 4)?;
    let ratee_guid: Option<String> = row.get(8)?;
    let ratee = match ratee_guid {
        Some(_) => Some(person_from_row(row, 8)?),
        None => None,
    };

    Ok(Interaction {
        guid: parse_guid(&guid)?,
        conversation: parse_guid(&conversation)?,
        rater,
        ratee,
        rating,
        created: timestamp_to_datetime(row.get(3)?),
    })
}

impl RecordStore for SqliteStore {
    #[instrument(skip(self), fields(operation = "find_or_create_person"))]
    fn find_or_create_person(&self, user_id: &str) -> Result<Person> {
        let conn = acquire_lock(&self.conn);

        let candidate = Person::new(user_id);
        conn.execute(
            "INSERT INTO people (guid, user_id, display_name, created)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(user_id) DO NOTHING",
            params![
                candidate.guid.to_string(),
                candidate.user_id,
                candidate.display_name,
                candidate.created.timestamp_micros(),
            ],
        )
        .map_err(|e| sqlite_error("insert_person", &e))?;

        conn.query_row(
            "SELECT guid, user_id, display_name, created FROM people WHERE user_id = ?1",
            params![user_id],
            |row| person_from_row(row, 0),
        )
        .map_err(|e| sqlite_error("fetch_person", &e))
    }

    #[instrument(skip(self, batch), fields(operation = "bulk_insert", count = batch.len()))]
    fn bulk_insert_interactions(&self, batch: &[Interaction]) -> Result<usize> {
        let mut conn = acquire_lock(&self.conn);
        let tx = conn
            .transaction()
            .map_err(|e| sqlite_error("begin_transaction", &e))?;

        for interaction in batch {
            tx.execute(
                "INSERT INTO interactions (guid, conversation, rater, ratee, rating, created)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    interaction.guid.to_string(),
                    interaction.conversation.to_string(),
                    interaction.rater.guid.to_string(),
                    interaction.ratee.as_ref().map(|p| p.guid.to_string()),
                    interaction.rating.as_str(),
                    interaction.created.timestamp_micros(),
                ],
            )
            .map_err(|e| sqlite_error("insert_interaction", &e))?;
        }

        tx.commit().map_err(|e| sqlite_error("commit_batch", &e))?;
        metrics::counter!("rapport_interactions_recorded_total").increment(batch.len() as u64);
        Ok(batch.len())
    }

    #[instrument(skip(self, rater), fields(operation = "query", rater = %rater.user_id))]
    fn query_interactions(
        &self,
        rater: &Person,
        since: DateTime<Utc>,
        filter: Option<Rating>,
    ) -> Result<Vec<Interaction>> {
        let conn = acquire_lock(&self.conn);

        let mut sql = String::from(
            "SELECT i.guid, i.conversation, i.rating, i.created,
                    r.guid, r.user_id, r.display_name, r.created,
                    e.guid, e.user_id, e.display_name, e.created
             FROM interactions i
             JOIN people r ON r.guid = i.rater
             LEFT JOIN people e ON e.guid = i.ratee
             WHERE i.rater = ?1 AND i.created >= ?2",
        );
        let mut sql_params: Vec<Box<dyn rusqlite::ToSql>> = vec![
            Box::new(rater.guid.to_string()),
            Box::new(since.timestamp_micros()),
        ];
        if let Some(rating) = filter {
            sql.push_str(" AND i.rating = ?3");
            sql_params.push(Box::new(rating.as_str()));
        }
        sql.push_str(" ORDER BY i.created DESC, i.guid");

        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| sqlite_error("prepare_query", &e))?;
        let rows = stmt
            .query_map(params_from_iter(sql_params), interaction_from_row)
            .map_err(|e| sqlite_error("query_interactions", &e))?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| sqlite_error("map_interactions", &e))
    }

    #[instrument(skip(self, rater), fields(operation = "delete", rater = %rater.user_id))]
    fn delete_interactions(&self, rater: &Person) -> Result<usize> {
        let conn = acquire_lock(&self.conn);
        conn.execute(
            "DELETE FROM interactions WHERE rater = ?1",
            params![rater.guid.to_string()],
        )
        .map_err(|e| sqlite_error("delete_interactions", &e))
    }
}
