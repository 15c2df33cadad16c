//! Media indexer abstraction.
//!
//! The indexer is the external download manager (Sonarr/Radarr-shaped) that
//! owns library state and executes monitor/search/grab commands. The core
//! only depends on this trait; concrete HTTP clients live outside the crate.

mod types;

use async_trait::async_trait;

pub use types::{Episode, IndexerError, MovieItem, Release, SeasonInfo, SeriesItem};

/// Client for the external media indexer.
#[async_trait]
pub trait IndexerClient: Send + Sync {
    /// Look up a series by TVDB id, adding it to the indexer if missing.
    ///
    /// Returns `None` when the indexer cannot resolve the series at all.
    async fn find_or_add_series(
        &self,
        tvdb_id: u64,
        title: &str,
    ) -> Result<Option<SeriesItem>, IndexerError>;

    /// Look up a movie by TMDB id, adding it to the indexer if missing.
    async fn find_or_add_movie(
        &self,
        tmdb_id: u64,
        title: &str,
    ) -> Result<Option<MovieItem>, IndexerError>;

    /// Whether every episode of the season has a file in the library.
    async fn is_season_fully_downloaded(
        &self,
        series_id: u64,
        season: u32,
    ) -> Result<bool, IndexerError>;

    /// Episodes of one season.
    async fn episodes(&self, series_id: u64, season: u32) -> Result<Vec<Episode>, IndexerError>;

    /// Release candidates for a whole season.
    async fn season_releases(
        &self,
        series_id: u64,
        season: u32,
    ) -> Result<Vec<Release>, IndexerError>;

    /// Release candidates for a movie.
    async fn movie_releases(&self, movie_id: u64) -> Result<Vec<Release>, IndexerError>;

    /// Set the series-level monitored flag.
    async fn monitor_series(&self, series_id: u64, monitored: bool) -> Result<(), IndexerError>;

    /// Set the monitored flag for one season.
    async fn monitor_season(
        &self,
        series_id: u64,
        season: u32,
        monitored: bool,
    ) -> Result<(), IndexerError>;

    /// Mark a single episode as monitored.
    async fn monitor_episode(&self, episode_id: u64) -> Result<(), IndexerError>;

    /// Trigger an indexer-native search for a whole season.
    async fn search_season(&self, series_id: u64, season: u32) -> Result<(), IndexerError>;

    /// Trigger an indexer-native search for one episode.
    async fn search_episode(&self, episode_id: u64) -> Result<(), IndexerError>;

    /// Grab a specific release. Returns `false` when the indexer refuses it.
    async fn download_release(&self, guid: &str, indexer_id: i32) -> Result<bool, IndexerError>;
}
