//! Mock indexer client for testing.

use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::indexer::{
    Episode, IndexerClient, IndexerError, MovieItem, Release, SeriesItem,
};

/// Mock implementation of the [`IndexerClient`] trait.
///
/// Provides controllable behavior for testing:
/// - Configurable series/movie lookups, season states, episodes and releases
/// - Release fetches can follow a per-call plan, to exercise retry logic
/// - Records every monitor/search/grab command for assertions
#[derive(Default)]
pub struct MockIndexer {
    series: Arc<RwLock<Option<SeriesItem>>>,
    movie: Arc<RwLock<Option<MovieItem>>>,
    completed_seasons: Arc<RwLock<HashMap<u64, BTreeSet<u32>>>>,
    failing_checks: Arc<RwLock<HashSet<(u64, u32)>>>,
    episodes: Arc<RwLock<HashMap<(u64, u32), Vec<Episode>>>>,
    season_releases: Arc<RwLock<HashMap<(u64, u32), Vec<Release>>>>,
    season_release_plans: Arc<RwLock<HashMap<(u64, u32), VecDeque<Vec<Release>>>>>,
    movie_releases: Arc<RwLock<HashMap<u64, Vec<Release>>>>,
    season_fetches: Arc<RwLock<usize>>,
    movie_fetches: Arc<RwLock<usize>>,
    download_refused: Arc<RwLock<bool>>,
    next_series_error: Arc<RwLock<Option<IndexerError>>>,
    grabs: Arc<RwLock<Vec<(String, i32)>>>,
    monitored_series: Arc<RwLock<Vec<(u64, bool)>>>,
    monitored_seasons: Arc<RwLock<Vec<(u64, u32, bool)>>>,
    monitored_episodes: Arc<RwLock<Vec<u64>>>,
    searched_seasons: Arc<RwLock<Vec<(u64, u32)>>>,
    searched_episodes: Arc<RwLock<Vec<u64>>>,
}

impl MockIndexer {
    /// Create a new mock indexer with nothing configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the series returned by `find_or_add_series`.
    pub async fn set_series(&self, series: SeriesItem) {
        *self.series.write().await = Some(series);
    }

    /// Set the movie returned by `find_or_add_movie`.
    pub async fn set_movie(&self, movie: MovieItem) {
        *self.movie.write().await = Some(movie);
    }

    /// Mark seasons of a series as fully downloaded.
    pub async fn set_completed_seasons(&self, series_id: u64, seasons: &[u32]) {
        self.completed_seasons
            .write()
            .await
            .insert(series_id, seasons.iter().copied().collect());
    }

    /// Make the downloaded-status check for one season fail.
    pub async fn fail_season_check(&self, series_id: u64, season: u32) {
        self.failing_checks.write().await.insert((series_id, season));
    }

    /// Configure the next `find_or_add_series` call to fail.
    pub async fn fail_next_series_lookup(&self, error: IndexerError) {
        *self.next_series_error.write().await = Some(error);
    }

    /// Set the episodes of one season.
    pub async fn set_episodes(&self, series_id: u64, season: u32, episodes: Vec<Episode>) {
        self.episodes
            .write()
            .await
            .insert((series_id, season), episodes);
    }

    /// Set the releases returned for a season, for every fetch.
    pub async fn set_season_releases(&self, series_id: u64, season: u32, releases: Vec<Release>) {
        self.season_releases
            .write()
            .await
            .insert((series_id, season), releases);
    }

    /// Set a per-fetch plan for a season's releases: the first fetch returns
    /// the first entry, the second fetch the second, and so on. Once the
    /// plan is exhausted, fetches fall back to the static releases.
    pub async fn set_season_release_plan(
        &self,
        series_id: u64,
        season: u32,
        plan: Vec<Vec<Release>>,
    ) {
        self.season_release_plans
            .write()
            .await
            .insert((series_id, season), plan.into());
    }

    /// Set the releases returned for a movie.
    pub async fn set_movie_releases(&self, movie_id: u64, releases: Vec<Release>) {
        self.movie_releases.write().await.insert(movie_id, releases);
    }

    /// Make `download_release` report failure.
    pub async fn set_download_refused(&self, refused: bool) {
        *self.download_refused.write().await = refused;
    }

    /// How many times season releases were fetched.
    pub async fn season_release_fetches(&self) -> usize {
        *self.season_fetches.read().await
    }

    /// How many times movie releases were fetched.
    pub async fn movie_release_fetches(&self) -> usize {
        *self.movie_fetches.read().await
    }

    /// Grab commands issued, as (guid, indexer id) pairs.
    pub async fn recorded_grabs(&self) -> Vec<(String, i32)> {
        self.grabs.read().await.clone()
    }

    /// Series-level monitor commands.
    pub async fn monitored_series(&self) -> Vec<(u64, bool)> {
        self.monitored_series.read().await.clone()
    }

    /// Season monitor commands.
    pub async fn monitored_seasons(&self) -> Vec<(u64, u32, bool)> {
        self.monitored_seasons.read().await.clone()
    }

    /// Episode monitor commands.
    pub async fn monitored_episodes(&self) -> Vec<u64> {
        self.monitored_episodes.read().await.clone()
    }

    /// Season search commands.
    pub async fn searched_seasons(&self) -> Vec<(u64, u32)> {
        self.searched_seasons.read().await.clone()
    }

    /// Episode search commands.
    pub async fn searched_episodes(&self) -> Vec<u64> {
        self.searched_episodes.read().await.clone()
    }
}

#[async_trait]
impl IndexerClient for MockIndexer {
    async fn find_or_add_series(
        &self,
        _tvdb_id: u64,
        _title: &str,
    ) -> Result<Option<SeriesItem>, IndexerError> {
        if let Some(error) = self.next_series_error.write().await.take() {
            return Err(error);
        }
        Ok(self.series.read().await.clone())
    }

    async fn find_or_add_movie(
        &self,
        _tmdb_id: u64,
        _title: &str,
    ) -> Result<Option<MovieItem>, IndexerError> {
        Ok(self.movie.read().await.clone())
    }

    async fn is_season_fully_downloaded(
        &self,
        series_id: u64,
        season: u32,
    ) -> Result<bool, IndexerError> {
        if self.failing_checks.read().await.contains(&(series_id, season)) {
            return Err(IndexerError::ApiError(format!(
                "status check failed for season {}",
                season
            )));
        }
        Ok(self
            .completed_seasons
            .read()
            .await
            .get(&series_id)
            .is_some_and(|seasons| seasons.contains(&season)))
    }

    async fn episodes(&self, series_id: u64, season: u32) -> Result<Vec<Episode>, IndexerError> {
        Ok(self
            .episodes
            .read()
            .await
            .get(&(series_id, season))
            .cloned()
            .unwrap_or_default())
    }

    async fn season_releases(
        &self,
        series_id: u64,
        season: u32,
    ) -> Result<Vec<Release>, IndexerError> {
        *self.season_fetches.write().await += 1;

        if let Some(plan) = self
            .season_release_plans
            .write()
            .await
            .get_mut(&(series_id, season))
        {
            if let Some(releases) = plan.pop_front() {
                return Ok(releases);
            }
        }

        Ok(self
            .season_releases
            .read()
            .await
            .get(&(series_id, season))
            .cloned()
            .unwrap_or_default())
    }

    async fn movie_releases(&self, movie_id: u64) -> Result<Vec<Release>, IndexerError> {
        *self.movie_fetches.write().await += 1;
        Ok(self
            .movie_releases
            .read()
            .await
            .get(&movie_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn monitor_series(&self, series_id: u64, monitored: bool) -> Result<(), IndexerError> {
        self.monitored_series.write().await.push((series_id, monitored));
        Ok(())
    }

    async fn monitor_season(
        &self,
        series_id: u64,
        season: u32,
        monitored: bool,
    ) -> Result<(), IndexerError> {
        self.monitored_seasons
            .write()
            .await
            .push((series_id, season, monitored));
        Ok(())
    }

    async fn monitor_episode(&self, episode_id: u64) -> Result<(), IndexerError> {
        self.monitored_episodes.write().await.push(episode_id);
        Ok(())
    }

    async fn search_season(&self, series_id: u64, season: u32) -> Result<(), IndexerError> {
        self.searched_seasons.write().await.push((series_id, season));
        Ok(())
    }

    async fn search_episode(&self, episode_id: u64) -> Result<(), IndexerError> {
        self.searched_episodes.write().await.push(episode_id);
        Ok(())
    }

    async fn download_release(&self, guid: &str, indexer_id: i32) -> Result<bool, IndexerError> {
        self.grabs
            .write()
            .await
            .push((guid.to_string(), indexer_id));
        Ok(!*self.download_refused.read().await)
    }
}
