//! Automated download orchestration.
//!
//! Drives the indexer through fetch-releases -> pick-best -> grab for one
//! unit (a whole season or a movie), reporting progress through the prompt
//! surface. Failures come back to the caller; retrying the whole operation
//! is the request orchestrator's job, only the release fetch has a small
//! retry budget here.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::indexer::{IndexerClient, IndexerError, Release};
use crate::prompt::PromptSurface;
use crate::selector::{select_best, SelectionContext};

/// Extra attempts after an empty release fetch.
const RELEASE_FETCH_RETRIES: u32 = 2;

/// Errors that can occur while orchestrating a download.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The indexer returned no releases, even after retries.
    #[error("no releases found")]
    NoReleasesFound,

    /// Releases were found but none scored as usable.
    #[error("no suitable release found")]
    NoSuitableRelease,

    /// The indexer refused to grab the selected release.
    #[error("failed to grab release: {0}")]
    GrabFailed(String),

    /// Indexer call failed.
    #[error("indexer error: {0}")]
    Indexer(#[from] IndexerError),
}

/// What to download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadUnit {
    /// A whole season of a series.
    Season { series_id: u64, season: u32 },
    /// A movie.
    Movie { movie_id: u64 },
}

impl DownloadUnit {
    fn describe(&self) -> String {
        match self {
            DownloadUnit::Season { season, .. } => format!("season {}", season),
            DownloadUnit::Movie { .. } => "movie".to_string(),
        }
    }

    fn selection_context(&self) -> SelectionContext {
        match self {
            DownloadUnit::Season { season, .. } => SelectionContext::for_season(*season),
            DownloadUnit::Movie { .. } => SelectionContext::default(),
        }
    }
}

/// Orchestrates a single automated download against the indexer.
pub struct DownloadOrchestrator {
    indexer: Arc<dyn IndexerClient>,
}

impl DownloadOrchestrator {
    /// Create a new download orchestrator.
    pub fn new(indexer: Arc<dyn IndexerClient>) -> Self {
        Self { indexer }
    }

    /// Download the best release for the unit.
    ///
    /// Returns the grabbed release on success.
    pub async fn download(
        &self,
        unit: &DownloadUnit,
        prompt: &dyn PromptSurface,
    ) -> Result<Release, DownloadError> {
        prompt
            .report_progress(&format!(
                "(1/2) Checking for best releases for {}...",
                unit.describe()
            ))
            .await;

        let releases = self.fetch_releases(unit).await?;
        if releases.is_empty() {
            return Err(DownloadError::NoReleasesFound);
        }

        let best = select_best(&releases, &unit.selection_context())
            .ok_or(DownloadError::NoSuitableRelease)?
            .clone();

        prompt
            .report_progress("(2/2) Downloading best release...")
            .await;

        let grabbed = self
            .indexer
            .download_release(&best.guid, best.indexer_id)
            .await?;
        if !grabbed {
            return Err(DownloadError::GrabFailed(best.title));
        }

        info!("Grabbed release {} for {}", best.title, unit.describe());
        prompt.report_progress("Process completed").await;

        Ok(best)
    }

    /// Fetch releases for the unit, retrying a bounded number of times while
    /// the result set comes back empty.
    async fn fetch_releases(&self, unit: &DownloadUnit) -> Result<Vec<Release>, DownloadError> {
        let mut releases = self.fetch_once(unit).await?;

        for attempt in 0..RELEASE_FETCH_RETRIES {
            if !releases.is_empty() {
                break;
            }
            debug!(
                "Release fetch for {} came back empty, retry {}/{}",
                unit.describe(),
                attempt + 1,
                RELEASE_FETCH_RETRIES
            );
            releases = self.fetch_once(unit).await?;
        }

        Ok(releases)
    }

    async fn fetch_once(&self, unit: &DownloadUnit) -> Result<Vec<Release>, DownloadError> {
        let releases = match unit {
            DownloadUnit::Season { series_id, season } => {
                self.indexer.season_releases(*series_id, *season).await?
            }
            DownloadUnit::Movie { movie_id } => self.indexer.movie_releases(*movie_id).await?,
        };
        Ok(releases)
    }
}
