//! Request record storage.
//!
//! Approved and pending requests are persisted so the quota evaluator can
//! count a user's requests inside a rolling window. The trait mirrors the
//! persistence collaborator; [`SqliteRequestStore`] is the bundled backend.

mod sqlite;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use sqlite::SqliteRequestStore;

/// Kind of media a request refers to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Movie,
    Series,
}

/// A persisted media request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RequestRecord {
    /// Record id.
    pub id: String,
    /// User who made the request.
    pub user_id: String,
    /// TMDB id of the requested media.
    pub tmdb_id: u64,
    /// Requested season, for series requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<u32>,
    /// Requested episode number, when a single episode was picked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode: Option<u32>,
    /// Whether the request was approved (auto or by an administrator).
    pub approved: bool,
    /// When the request was recorded.
    pub created_at: DateTime<Utc>,
}

/// Request to persist a new record.
#[derive(Debug, Clone)]
pub struct CreateRequestRecord {
    pub user_id: String,
    pub tmdb_id: u64,
    pub season: Option<u32>,
    pub episode: Option<u32>,
    pub approved: bool,
}

/// Error type for request store operations.
#[derive(Debug, Error)]
pub enum RequestStoreError {
    /// Record not found.
    #[error("request not found: {0}")]
    NotFound(String),

    /// Database error.
    #[error("database error: {0}")]
    Database(String),
}

/// Trait for request record storage backends.
pub trait RequestStore: Send + Sync {
    /// Persist a new request record.
    fn create(&self, request: CreateRequestRecord) -> Result<RequestRecord, RequestStoreError>;

    /// Count a user's requests created within the trailing `days` window.
    fn count_requests_in_period(&self, user_id: &str, days: u32)
        -> Result<u32, RequestStoreError>;

    /// All records for one user, newest first.
    fn list_for_user(&self, user_id: &str) -> Result<Vec<RequestRecord>, RequestStoreError>;
}
