//! Mock metadata client for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::metadata::{CanonicalMovie, CanonicalSeries, MetadataClient, MetadataError};

/// Mock implementation of the [`MetadataClient`] trait.
///
/// Unconfigured ids resolve to [`MetadataError::NotFound`].
#[derive(Default)]
pub struct MockMetadata {
    series: Arc<RwLock<HashMap<u64, CanonicalSeries>>>,
    movies: Arc<RwLock<HashMap<u64, CanonicalMovie>>>,
}

impl MockMetadata {
    /// Create a new mock metadata client with no records.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a canonical series.
    pub async fn set_series(&self, series: CanonicalSeries) {
        self.series.write().await.insert(series.tmdb_id, series);
    }

    /// Register a canonical movie.
    pub async fn set_movie(&self, movie: CanonicalMovie) {
        self.movies.write().await.insert(movie.tmdb_id, movie);
    }
}

#[async_trait]
impl MetadataClient for MockMetadata {
    async fn series(&self, tmdb_id: u64) -> Result<CanonicalSeries, MetadataError> {
        self.series
            .read()
            .await
            .get(&tmdb_id)
            .cloned()
            .ok_or_else(|| MetadataError::NotFound(format!("series {}", tmdb_id)))
    }

    async fn movie(&self, tmdb_id: u64) -> Result<CanonicalMovie, MetadataError> {
        self.movies
            .read()
            .await
            .get(&tmdb_id)
            .cloned()
            .ok_or_else(|| MetadataError::NotFound(format!("movie {}", tmdb_id)))
    }
}
