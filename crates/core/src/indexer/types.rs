//! Types for the media indexer abstraction.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A series as tracked by the indexer.
///
/// Fetched fresh per operation; the core never caches these.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeriesItem {
    /// Indexer-side series id.
    pub id: u64,
    /// Series title.
    pub title: String,
    /// TVDB id the indexer resolved this series from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tvdb_id: Option<u64>,
    /// Seasons known to the indexer, including specials (season 0).
    #[serde(default)]
    pub seasons: Vec<SeasonInfo>,
}

impl SeriesItem {
    /// Season numbers eligible for selection (specials excluded).
    pub fn selectable_seasons(&self) -> Vec<u32> {
        self.seasons
            .iter()
            .filter(|s| s.season_number > 0)
            .map(|s| s.season_number)
            .collect()
    }
}

/// Per-season summary carried on a [`SeriesItem`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeasonInfo {
    /// Season number (0 = specials).
    pub season_number: u32,
    /// Whether the indexer is monitoring this season.
    pub monitored: bool,
    /// Number of episodes the indexer knows about.
    pub episode_count: u32,
}

/// A movie as tracked by the indexer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieItem {
    /// Indexer-side movie id.
    pub id: u64,
    /// Movie title.
    pub title: String,
    /// TMDB id the indexer resolved this movie from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tmdb_id: Option<u64>,
}

/// A single episode of a season.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Episode {
    /// Indexer-side episode id (used for monitor/search commands).
    pub id: u64,
    /// Episode number within the season.
    pub episode_number: u32,
    /// Episode title.
    pub title: String,
    /// Whether a file is already present in the library.
    pub has_file: bool,
    /// Air date, if announced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub air_date: Option<DateTime<Utc>>,
}

impl Episode {
    /// Whether this episode has aired as of `now`.
    ///
    /// An episode with no announced air date counts as not aired.
    pub fn aired_by(&self, now: DateTime<Utc>) -> bool {
        self.air_date.is_some_and(|d| d <= now)
    }
}

/// A release candidate reported by the indexer for a season or movie.
///
/// Ephemeral; exists only within one download attempt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Release {
    /// Globally unique release id on the indexer side.
    pub guid: String,
    /// Which indexer backend produced this release.
    pub indexer_id: i32,
    /// Release title as published.
    pub title: String,
    /// Seeders reported for this release.
    pub seeders: u32,
    /// Size in bytes.
    pub size_bytes: u64,
    /// Quality label parsed by the indexer (e.g. "1080p").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
    /// Whether the release covers a whole season.
    #[serde(default)]
    pub full_season: bool,
    /// Season the indexer mapped this release to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mapped_season: Option<u32>,
    /// Whether the indexer's own profile rules rejected this release.
    #[serde(default)]
    pub rejected: bool,
}

/// Errors surfaced by the indexer client.
#[derive(Debug, Error)]
pub enum IndexerError {
    #[error("indexer connection failed: {0}")]
    ConnectionFailed(String),

    #[error("indexer API error: {0}")]
    ApiError(String),

    #[error("not found on indexer: {0}")]
    NotFound(String),
}
