//! SQLite-backed request store implementation.

use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use rusqlite::{params, Connection};

use super::{CreateRequestRecord, RequestRecord, RequestStore, RequestStoreError};

/// SQLite-backed request store.
pub struct SqliteRequestStore {
    conn: Mutex<Connection>,
}

impl SqliteRequestStore {
    /// Create a new SQLite request store, creating the database file and
    /// tables if needed.
    pub fn new(path: &Path) -> Result<Self, RequestStoreError> {
        let conn =
            Connection::open(path).map_err(|e| RequestStoreError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory SQLite request store (useful for testing).
    pub fn in_memory() -> Result<Self, RequestStoreError> {
        let conn =
            Connection::open_in_memory().map_err(|e| RequestStoreError::Database(e.to_string()))?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), RequestStoreError> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS requests (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                tmdb_id INTEGER NOT NULL,
                season INTEGER,
                episode INTEGER,
                approved INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_requests_user_id ON requests(user_id);
            CREATE INDEX IF NOT EXISTS idx_requests_created_at ON requests(created_at);
            "#,
        )
        .map_err(|e| RequestStoreError::Database(e.to_string()))?;

        Ok(())
    }

    fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<RequestRecord> {
        let id: String = row.get(0)?;
        let user_id: String = row.get(1)?;
        let tmdb_id: u64 = row.get(2)?;
        let season: Option<u32> = row.get(3)?;
        let episode: Option<u32> = row.get(4)?;
        let approved: bool = row.get(5)?;
        let created_at_str: String = row.get(6)?;

        // Parse timestamp - use now if parsing fails (shouldn't happen with valid data)
        let created_at = DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| Utc::now());

        Ok(RequestRecord {
            id,
            user_id,
            tmdb_id,
            season,
            episode,
            approved,
            created_at,
        })
    }
}

impl RequestStore for SqliteRequestStore {
    fn create(&self, request: CreateRequestRecord) -> Result<RequestRecord, RequestStoreError> {
        let conn = self.conn.lock().unwrap();

        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now();

        conn.execute(
            "INSERT INTO requests (id, user_id, tmdb_id, season, episode, approved, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
            params![
                id,
                request.user_id,
                request.tmdb_id,
                request.season,
                request.episode,
                request.approved,
                now.to_rfc3339(),
            ],
        )
        .map_err(|e| RequestStoreError::Database(e.to_string()))?;

        Ok(RequestRecord {
            id,
            user_id: request.user_id,
            tmdb_id: request.tmdb_id,
            season: request.season,
            episode: request.episode,
            approved: request.approved,
            created_at: now,
        })
    }

    fn count_requests_in_period(
        &self,
        user_id: &str,
        days: u32,
    ) -> Result<u32, RequestStoreError> {
        let conn = self.conn.lock().unwrap();

        let cutoff = Utc::now() - Duration::days(i64::from(days));

        let count: u32 = conn
            .query_row(
                "SELECT COUNT(*) FROM requests WHERE user_id = ? AND created_at >= ?",
                params![user_id, cutoff.to_rfc3339()],
                |row| row.get(0),
            )
            .map_err(|e| RequestStoreError::Database(e.to_string()))?;

        Ok(count)
    }

    fn list_for_user(&self, user_id: &str) -> Result<Vec<RequestRecord>, RequestStoreError> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn
            .prepare(
                "SELECT id, user_id, tmdb_id, season, episode, approved, created_at FROM requests WHERE user_id = ? ORDER BY created_at DESC",
            )
            .map_err(|e| RequestStoreError::Database(e.to_string()))?;

        let records = stmt
            .query_map(params![user_id], Self::row_to_record)
            .map_err(|e| RequestStoreError::Database(e.to_string()))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| RequestStoreError::Database(e.to_string()))?;

        Ok(records)
    }
}
