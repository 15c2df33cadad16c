//! Mock request store for testing.

use std::sync::Mutex;

use chrono::{Duration, Utc};

use crate::store::{CreateRequestRecord, RequestRecord, RequestStore, RequestStoreError};

/// In-memory mock implementation of the [`RequestStore`] trait.
///
/// Useful where the SQLite store gets in the way, in particular for
/// injecting persistence failures.
#[derive(Default)]
pub struct MockRequestStore {
    records: Mutex<Vec<RequestRecord>>,
    fail_create: Mutex<bool>,
}

impl MockRequestStore {
    /// Create a new empty mock store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `create` call fail.
    pub fn set_fail_create(&self, fail: bool) {
        *self.fail_create.lock().unwrap() = fail;
    }

    /// All records created so far.
    pub fn records(&self) -> Vec<RequestRecord> {
        self.records.lock().unwrap().clone()
    }
}

impl RequestStore for MockRequestStore {
    fn create(&self, request: CreateRequestRecord) -> Result<RequestRecord, RequestStoreError> {
        if *self.fail_create.lock().unwrap() {
            return Err(RequestStoreError::Database(
                "simulated write failure".to_string(),
            ));
        }

        let record = RequestRecord {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: request.user_id,
            tmdb_id: request.tmdb_id,
            season: request.season,
            episode: request.episode,
            approved: request.approved,
            created_at: Utc::now(),
        };
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    fn count_requests_in_period(
        &self,
        user_id: &str,
        days: u32,
    ) -> Result<u32, RequestStoreError> {
        let cutoff = Utc::now() - Duration::days(i64::from(days));
        let count = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id && r.created_at >= cutoff)
            .count();
        Ok(count as u32)
    }

    fn list_for_user(&self, user_id: &str) -> Result<Vec<RequestRecord>, RequestStoreError> {
        let mut records: Vec<RequestRecord> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }
}
