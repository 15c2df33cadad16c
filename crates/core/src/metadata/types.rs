//! Types for metadata catalog responses.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical series record from the metadata catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CanonicalSeries {
    /// TMDB series id.
    pub tmdb_id: u64,
    /// Series name.
    pub name: String,
    /// Cross-catalog identifiers.
    #[serde(default)]
    pub external_ids: ExternalIds,
}

/// Canonical movie record from the metadata catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CanonicalMovie {
    /// TMDB movie id.
    pub tmdb_id: u64,
    /// Movie title.
    pub title: String,
}

/// Identifiers in other catalogs, as reported by the metadata catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExternalIds {
    /// TVDB id, required to resolve a series on the indexer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tvdb_id: Option<u64>,
}

/// Errors surfaced by the metadata client.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("metadata connection failed: {0}")]
    ConnectionFailed(String),

    #[error("metadata API error: {0}")]
    ApiError(String),

    #[error("metadata record not found: {0}")]
    NotFound(String),
}
