//! Request orchestrator implementation.
//!
//! One orchestration run per [`RequestIntent`]: resolve the canonical item,
//! let the user pick (for series), evaluate the quota, then either drive an
//! automated download / indexer-native search or persist a pending record.
//! Every branch failure except a cancelled selection funnels into a single
//! user-driven retry loop.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::SettingsProvider;
use crate::download::{DownloadOrchestrator, DownloadUnit};
use crate::indexer::{IndexerClient, SeriesItem};
use crate::metadata::MetadataClient;
use crate::picker::{select_season_and_episode, SelectionResult};
use crate::prompt::{Confirmation, PromptSurface};
use crate::quota;
use crate::store::{CreateRequestRecord, MediaType, RequestStore};

use super::types::{RequestError, RequestIntent, RequestOutcome, SessionState};

const CONFIRM_SEARCH_HEADER: &str = "Confirm Automatic Search";
const CONFIRM_REQUEST_HEADER: &str = "Confirm Request";
const ERROR_HEADER: &str = "Error Occurred";

/// The request orchestrator - fulfills "request media" end to end.
pub struct RequestOrchestrator {
    indexer: Arc<dyn IndexerClient>,
    metadata: Arc<dyn MetadataClient>,
    store: Arc<dyn RequestStore>,
    settings: Arc<dyn SettingsProvider>,
    downloader: DownloadOrchestrator,
}

impl RequestOrchestrator {
    /// Create a new orchestrator over the given collaborators.
    pub fn new(
        indexer: Arc<dyn IndexerClient>,
        metadata: Arc<dyn MetadataClient>,
        store: Arc<dyn RequestStore>,
        settings: Arc<dyn SettingsProvider>,
    ) -> Self {
        let downloader = DownloadOrchestrator::new(Arc::clone(&indexer));
        Self {
            indexer,
            metadata,
            store,
            settings,
            downloader,
        }
    }

    /// Run one media request end to end.
    ///
    /// A failed branch is offered back to the user as a retry dialog;
    /// confirming re-runs the branch from the start (quota re-evaluated,
    /// selection re-run if it was the selection that failed). Declining
    /// ends the run with [`RequestOutcome::Abandoned`]. A cancelled
    /// selection prompt is terminal and never retried.
    pub async fn request_media(
        &self,
        intent: &RequestIntent,
        prompt: &dyn PromptSurface,
        session: &mut SessionState,
    ) -> Result<RequestOutcome, RequestError> {
        loop {
            let attempt = match intent.media_type {
                MediaType::Movie => self.movie_branch(intent, prompt).await,
                MediaType::Series => match (intent.season, intent.episode) {
                    (Some(season), Some(episode)) => {
                        self.episode_branch(intent, season, episode, prompt, session)
                            .await
                    }
                    _ => self.series_branch(intent, prompt, session).await,
                },
            };

            match attempt {
                Ok(outcome) => return Ok(outcome),
                Err(RequestError::SelectionCancelled) => {
                    info!("Request for tmdb {} cancelled by user", intent.tmdb_id);
                    return Err(RequestError::SelectionCancelled);
                }
                Err(e) => {
                    warn!("Request attempt for tmdb {} failed: {}", intent.tmdb_id, e);
                    let body = format!("An error occurred: {}. Do you want to retry?", e);
                    match prompt.confirm(ERROR_HEADER, &body).await {
                        Confirmation::Confirmed => continue,
                        Confirmation::Declined => {
                            return Ok(RequestOutcome::Abandoned {
                                reason: e.to_string(),
                            })
                        }
                    }
                }
            }
        }
    }

    /// Movie path: quota, confirmation, automated download, record.
    async fn movie_branch(
        &self,
        intent: &RequestIntent,
        prompt: &dyn PromptSurface,
    ) -> Result<RequestOutcome, RequestError> {
        let settings = self.settings.request_settings();
        let state = quota::evaluate(
            MediaType::Movie,
            &intent.user,
            &settings,
            self.store.as_ref(),
        )?;

        if !state.auto_approved {
            let body = "Do you want to request this movie? An administrator must approve it.";
            if !prompt
                .confirm(CONFIRM_REQUEST_HEADER, body)
                .await
                .is_confirmed()
            {
                return Ok(RequestOutcome::Declined);
            }
            let record = self.persist(intent, None, None, false)?;
            return Ok(RequestOutcome::Pending { record });
        }

        let summary = state.approval_summary(&intent.user);
        if !prompt
            .confirm(CONFIRM_SEARCH_HEADER, &summary)
            .await
            .is_confirmed()
        {
            return Ok(RequestOutcome::Declined);
        }

        prompt.report_progress("Search movie in library").await;
        let movie = self.metadata.movie(intent.tmdb_id).await?;
        let item = self
            .indexer
            .find_or_add_movie(movie.tmdb_id, &movie.title)
            .await?
            .ok_or_else(|| RequestError::ItemNotFound(movie.title.clone()))?;

        self.downloader
            .download(&DownloadUnit::Movie { movie_id: item.id }, prompt)
            .await?;

        let record = self.persist(intent, None, None, true)?;
        info!(
            "Movie request approved for user {} (tmdb {})",
            intent.user.id, intent.tmdb_id
        );
        Ok(RequestOutcome::Approved { record })
    }

    /// Interactive series path: resolve, pick, then finish.
    async fn series_branch(
        &self,
        intent: &RequestIntent,
        prompt: &dyn PromptSurface,
        session: &mut SessionState,
    ) -> Result<RequestOutcome, RequestError> {
        let item = self.resolve_series(intent).await?;

        let selection = select_season_and_episode(
            self.indexer.as_ref(),
            prompt,
            &item,
            session.requested_seasons(),
        )
        .await?;

        self.finish_series_request(intent, &item, &selection, prompt, session)
            .await
    }

    /// Deep-link path straight to one episode, no picker involved.
    async fn episode_branch(
        &self,
        intent: &RequestIntent,
        season: u32,
        episode_number: u32,
        prompt: &dyn PromptSurface,
        session: &mut SessionState,
    ) -> Result<RequestOutcome, RequestError> {
        let item = self.resolve_series(intent).await?;

        let episode = self
            .indexer
            .episodes(item.id, season)
            .await?
            .into_iter()
            .find(|e| e.episode_number == episode_number)
            .ok_or_else(|| {
                RequestError::ItemNotFound(format!(
                    "episode {} of season {} of {}",
                    episode_number, season, item.title
                ))
            })?;

        let selection = SelectionResult {
            season,
            episode: Some(episode),
            monitored: false,
        };

        self.finish_series_request(intent, &item, &selection, prompt, session)
            .await
    }

    /// Resolve the canonical series and its indexer item.
    async fn resolve_series(&self, intent: &RequestIntent) -> Result<SeriesItem, RequestError> {
        let series = self.metadata.series(intent.tmdb_id).await?;
        let tvdb_id = series.external_ids.tvdb_id.ok_or_else(|| {
            RequestError::ItemNotFound(format!("no TVDB id for series {}", series.name))
        })?;

        self.indexer
            .find_or_add_series(tvdb_id, &series.name)
            .await?
            .ok_or_else(|| RequestError::ItemNotFound(series.name))
    }

    /// Quota check and the approved/pending split for a resolved selection.
    async fn finish_series_request(
        &self,
        intent: &RequestIntent,
        item: &SeriesItem,
        selection: &SelectionResult,
        prompt: &dyn PromptSurface,
        session: &mut SessionState,
    ) -> Result<RequestOutcome, RequestError> {
        let settings = self.settings.request_settings();
        let state = quota::evaluate(
            MediaType::Series,
            &intent.user,
            &settings,
            self.store.as_ref(),
        )?;

        let episode_number = selection.episode.as_ref().map(|e| e.episode_number);

        if !state.auto_approved {
            let episode_part = episode_number
                .map(|n| format!(", episode {}", n))
                .unwrap_or_default();
            let body = format!(
                "Do you want to request season {}{}? An administrator must approve it before it appears in the library.",
                selection.season, episode_part
            );
            if !prompt
                .confirm(CONFIRM_REQUEST_HEADER, &body)
                .await
                .is_confirmed()
            {
                return Ok(RequestOutcome::Declined);
            }

            let record = self.persist(intent, Some(selection.season), episode_number, false)?;
            session.track_season(selection.season);
            info!(
                "Pending request recorded for user {} (tmdb {}, season {})",
                intent.user.id, intent.tmdb_id, selection.season
            );
            return Ok(RequestOutcome::Pending { record });
        }

        let summary = state.approval_summary(&intent.user);
        if !prompt
            .confirm(CONFIRM_SEARCH_HEADER, &summary)
            .await
            .is_confirmed()
        {
            return Ok(RequestOutcome::Declined);
        }

        self.execute_selection(item, selection, prompt).await?;

        let record = self.persist(intent, Some(selection.season), episode_number, true)?;
        info!(
            "Series request approved for user {} (tmdb {}, season {})",
            intent.user.id, intent.tmdb_id, selection.season
        );
        Ok(RequestOutcome::Approved { record })
    }

    /// Issue the download or monitor/search commands for a selection.
    ///
    /// The fast path grabs a release directly; monitored selections are
    /// indexer-native searches, the release selector is not involved.
    async fn execute_selection(
        &self,
        item: &SeriesItem,
        selection: &SelectionResult,
        prompt: &dyn PromptSurface,
    ) -> Result<(), RequestError> {
        match (&selection.episode, selection.monitored) {
            (None, false) => {
                self.downloader
                    .download(
                        &DownloadUnit::Season {
                            series_id: item.id,
                            season: selection.season,
                        },
                        prompt,
                    )
                    .await?;
            }
            (None, true) => {
                self.indexer.monitor_series(item.id, true).await?;
                self.indexer
                    .monitor_season(item.id, selection.season, true)
                    .await?;
                self.indexer.search_season(item.id, selection.season).await?;
            }
            (Some(episode), _) => {
                self.indexer.monitor_episode(episode.id).await?;
                self.indexer.search_episode(episode.id).await?;
            }
        }
        Ok(())
    }

    fn persist(
        &self,
        intent: &RequestIntent,
        season: Option<u32>,
        episode: Option<u32>,
        approved: bool,
    ) -> Result<crate::store::RequestRecord, RequestError> {
        let record = self.store.create(CreateRequestRecord {
            user_id: intent.user.id.clone(),
            tmdb_id: intent.tmdb_id,
            season,
            episode,
            approved,
        })?;
        Ok(record)
    }
}
