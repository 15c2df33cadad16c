//! Types for the request orchestrator.

use std::collections::BTreeSet;

use thiserror::Error;

use crate::download::DownloadError;
use crate::indexer::IndexerError;
use crate::metadata::MetadataError;
use crate::picker::PickError;
use crate::quota::Requester;
use crate::store::{MediaType, RequestRecord, RequestStoreError};

/// A user's intent to request one piece of media.
///
/// Immutable; consumed once per orchestration run. `season`/`episode` are
/// only set for deep links straight to a known episode; the interactive
/// series flow resolves them through the picker instead.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestIntent {
    /// Movie or series.
    pub media_type: MediaType,
    /// TMDB id of the requested media.
    pub tmdb_id: u64,
    /// Requesting user.
    pub user: Requester,
    /// Season, for episode deep links.
    pub season: Option<u32>,
    /// Episode number, for episode deep links.
    pub episode: Option<u32>,
}

impl RequestIntent {
    /// Intent to request a movie.
    pub fn movie(tmdb_id: u64, user: Requester) -> Self {
        Self {
            media_type: MediaType::Movie,
            tmdb_id,
            user,
            season: None,
            episode: None,
        }
    }

    /// Intent to request a series, with the season/episode resolved
    /// interactively.
    pub fn series(tmdb_id: u64, user: Requester) -> Self {
        Self {
            media_type: MediaType::Series,
            tmdb_id,
            user,
            season: None,
            episode: None,
        }
    }

    /// Intent to request one specific episode of a series.
    pub fn episode(tmdb_id: u64, season: u32, episode: u32, user: Requester) -> Self {
        Self {
            media_type: MediaType::Series,
            tmdb_id,
            user,
            season: Some(season),
            episode: Some(episode),
        }
    }
}

/// How a request run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestOutcome {
    /// Auto-approved; the download/monitor commands went out and the record
    /// was persisted as approved.
    Approved { record: RequestRecord },
    /// Persisted as pending; an administrator has to approve it.
    Pending { record: RequestRecord },
    /// The user declined a confirmation dialog. Nothing was persisted.
    Declined,
    /// A branch failed and the user declined the retry dialog.
    Abandoned { reason: String },
}

/// Errors that can occur during request orchestration.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The user dismissed a selection prompt; terminal, never retried.
    #[error("selection cancelled")]
    SelectionCancelled,

    /// The indexer could not resolve the requested item.
    #[error("could not resolve on the indexer: {0}")]
    ItemNotFound(String),

    /// Metadata catalog failure.
    #[error("metadata error: {0}")]
    Metadata(#[from] MetadataError),

    /// Indexer failure.
    #[error("indexer error: {0}")]
    Indexer(#[from] IndexerError),

    /// Request store failure.
    #[error("persistence failure: {0}")]
    Persistence(#[from] RequestStoreError),

    /// Automated download failure.
    #[error("download failed: {0}")]
    Download(#[from] DownloadError),
}

impl From<PickError> for RequestError {
    fn from(e: PickError) -> Self {
        match e {
            PickError::Cancelled => RequestError::SelectionCancelled,
            PickError::Indexer(e) => RequestError::Indexer(e),
        }
    }
}

/// Per-session request state, owned by the caller.
///
/// Holds the seasons already requested in this UI session so subsequent
/// picker runs exclude them. Only ever appended to after a prompt resolves;
/// there is no module-level copy of this anywhere.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    requested_seasons: BTreeSet<u32>,
}

impl SessionState {
    /// Fresh session with no requested seasons.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that a season was requested this session.
    pub fn track_season(&mut self, season: u32) {
        self.requested_seasons.insert(season);
    }

    /// Seasons requested so far.
    pub fn requested_seasons(&self) -> &BTreeSet<u32> {
        &self.requested_seasons
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_constructors() {
        let user = Requester {
            id: "alice".to_string(),
            is_admin: false,
        };

        let movie = RequestIntent::movie(603, user.clone());
        assert_eq!(movie.media_type, MediaType::Movie);
        assert_eq!(movie.season, None);

        let episode = RequestIntent::episode(1399, 4, 2, user);
        assert_eq!(episode.media_type, MediaType::Series);
        assert_eq!(episode.season, Some(4));
        assert_eq!(episode.episode, Some(2));
    }

    #[test]
    fn test_session_state_deduplicates() {
        let mut session = SessionState::new();
        session.track_season(4);
        session.track_season(4);
        session.track_season(2);

        let seasons: Vec<u32> = session.requested_seasons().iter().copied().collect();
        assert_eq!(seasons, vec![2, 4]);
    }

    #[test]
    fn test_pick_cancel_maps_to_selection_cancelled() {
        let err: RequestError = PickError::Cancelled.into();
        assert!(matches!(err, RequestError::SelectionCancelled));
    }
}
