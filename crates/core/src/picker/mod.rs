//! Season and episode selection.
//!
//! Walks the user from a series to a concrete selection: enumerate seasons,
//! mark the ones that cannot be requested again, let the user pick, then
//! resolve how episodes of the picked season should be handled. The fast
//! path (season fully aired, nothing downloaded) skips the episode prompt
//! entirely.

use std::collections::BTreeSet;

use chrono::Utc;
use futures::future::join_all;
use thiserror::Error;
use tracing::{debug, warn};

use crate::indexer::{Episode, IndexerClient, IndexerError, SeriesItem};
use crate::prompt::{Choice, EpisodeMode, PromptSurface};

/// Errors that can occur during season/episode selection.
#[derive(Debug, Error)]
pub enum PickError {
    /// The user dismissed a selection prompt.
    #[error("selection cancelled")]
    Cancelled,

    /// Indexer call failed.
    #[error("indexer error: {0}")]
    Indexer(#[from] IndexerError),
}

/// The user's resolved selection for a series request.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionResult {
    /// Chosen season number.
    pub season: u32,
    /// Chosen episode, or `None` for a whole-season selection.
    pub episode: Option<Episode>,
    /// Whether the indexer should monitor the selection instead of the
    /// caller grabbing a release directly.
    pub monitored: bool,
}

/// Run the selection flow for one series.
///
/// `requested_seasons` is the caller's record of seasons already requested
/// this session; together with fully downloaded seasons they are excluded
/// from the picker.
pub async fn select_season_and_episode(
    indexer: &dyn IndexerClient,
    prompt: &dyn PromptSurface,
    series: &SeriesItem,
    requested_seasons: &BTreeSet<u32>,
) -> Result<SelectionResult, PickError> {
    let seasons = series.selectable_seasons();

    let completed = completed_seasons(indexer, series.id, &seasons).await;
    let unavailable = unavailable_seasons(&completed, requested_seasons);
    debug!(
        "Series {}: seasons {:?}, unavailable {:?}",
        series.id, seasons, unavailable
    );

    let season = match prompt.select_season(&seasons, &unavailable).await {
        Choice::Selected(season) => season,
        Choice::Cancelled => return Err(PickError::Cancelled),
    };

    resolve_episodes(indexer, prompt, series.id, season).await
}

/// Query every season's downloaded status concurrently.
///
/// A failed check only affects its own season: it is logged and the season
/// counts as not completed, so the list can still render.
async fn completed_seasons(
    indexer: &dyn IndexerClient,
    series_id: u64,
    seasons: &[u32],
) -> BTreeSet<u32> {
    let checks = seasons.iter().map(|&season| async move {
        match indexer.is_season_fully_downloaded(series_id, season).await {
            Ok(true) => Some(season),
            Ok(false) => None,
            Err(e) => {
                warn!("Failed to check season {} of {}: {}", season, series_id, e);
                None
            }
        }
    });

    join_all(checks).await.into_iter().flatten().collect()
}

/// Seasons that cannot be requested again: fully downloaded ones plus those
/// already requested this session, deduplicated.
fn unavailable_seasons(completed: &BTreeSet<u32>, requested: &BTreeSet<u32>) -> Vec<u32> {
    completed.union(requested).copied().collect()
}

/// Decide how episodes of the chosen season are handled.
async fn resolve_episodes(
    indexer: &dyn IndexerClient,
    prompt: &dyn PromptSurface,
    series_id: u64,
    season: u32,
) -> Result<SelectionResult, PickError> {
    let episodes = indexer.episodes(series_id, season).await?;

    let now = Utc::now();
    let total = episodes.len();
    let downloaded = episodes.iter().filter(|e| e.has_file).count();
    let all_aired = episodes.iter().all(|e| e.aired_by(now));

    debug!(
        "Season {} of {}: {} episodes, {} downloaded, all aired: {}",
        season, series_id, total, downloaded, all_aired
    );

    // Fully aired with nothing downloaded: grab the whole season, no prompt
    if downloaded == 0 && all_aired && total > 0 {
        return Ok(SelectionResult {
            season,
            episode: None,
            monitored: false,
        });
    }

    match prompt.select_episode_mode().await {
        Choice::Selected(EpisodeMode::MonitorAll) => Ok(SelectionResult {
            season,
            episode: None,
            monitored: true,
        }),
        Choice::Selected(EpisodeMode::PickManually) => {
            match prompt.select_episode(&episodes).await {
                Choice::Selected(episode) => Ok(SelectionResult {
                    season,
                    episode: Some(episode),
                    monitored: true,
                }),
                Choice::Cancelled => Err(PickError::Cancelled),
            }
        }
        Choice::Cancelled => Err(PickError::Cancelled),
    }
}
