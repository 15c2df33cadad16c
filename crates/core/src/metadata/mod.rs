//! Metadata catalog abstraction.
//!
//! Canonical series/movie identity comes from an external catalog
//! (TMDB-shaped). The core resolves a request's TMDB id to the canonical
//! record before talking to the indexer.

mod types;

use async_trait::async_trait;

pub use types::{CanonicalMovie, CanonicalSeries, ExternalIds, MetadataError};

/// Client for the external metadata catalog.
#[async_trait]
pub trait MetadataClient: Send + Sync {
    /// Fetch the canonical series record for a TMDB id.
    async fn series(&self, tmdb_id: u64) -> Result<CanonicalSeries, MetadataError>;

    /// Fetch the canonical movie record for a TMDB id.
    async fn movie(&self, tmdb_id: u64) -> Result<CanonicalMovie, MetadataError>;
}
