//! End-to-end request flow tests.
//!
//! These tests drive the full orchestration through mock collaborators:
//! quota evaluation, season/episode selection, automated downloads,
//! monitor/search commands and record persistence.

use std::sync::Arc;

use concierge_core::{
    testing::{fixtures, MockIndexer, MockMetadata, MockPrompt, MockRequestStore},
    ApprovalMethod, Choice, Confirmation, CreateRequestRecord, EpisodeMode, IndexerClient,
    IndexerError, MetadataClient, RequestError, RequestIntent, RequestOrchestrator,
    RequestOutcome, RequestSettings, RequestStore, Requester, SessionState, SqliteRequestStore,
    StaticSettings,
};

const TMDB_SERIES: u64 = 1399;
const TMDB_MOVIE: u64 = 603;
const SERIES_ID: u64 = 7;
const MOVIE_ID: u64 = 42;

/// Test helper wiring all mock collaborators together.
struct TestHarness {
    indexer: Arc<MockIndexer>,
    metadata: Arc<MockMetadata>,
    store: Arc<SqliteRequestStore>,
    prompt: MockPrompt,
}

impl TestHarness {
    async fn new() -> Self {
        let harness = Self {
            indexer: Arc::new(MockIndexer::new()),
            metadata: Arc::new(MockMetadata::new()),
            store: Arc::new(SqliteRequestStore::in_memory().expect("in-memory store")),
            prompt: MockPrompt::new(),
        };

        harness
            .metadata
            .set_series(fixtures::canonical_series(TMDB_SERIES, "Some Show", 121361))
            .await;
        harness
            .metadata
            .set_movie(fixtures::canonical_movie(TMDB_MOVIE, "Some Movie"))
            .await;
        harness
            .indexer
            .set_series(fixtures::series_item(SERIES_ID, "Some Show", &[1, 2, 3, 4]))
            .await;
        harness
            .indexer
            .set_movie(fixtures::movie_item(MOVIE_ID, "Some Movie"))
            .await;

        harness
    }

    fn orchestrator(&self, settings: RequestSettings) -> RequestOrchestrator {
        RequestOrchestrator::new(
            Arc::clone(&self.indexer) as Arc<dyn IndexerClient>,
            Arc::clone(&self.metadata) as Arc<dyn MetadataClient>,
            Arc::clone(&self.store) as Arc<dyn RequestStore>,
            Arc::new(StaticSettings(settings)),
        )
    }

    /// Season 4 fully aired, nothing downloaded, one good release.
    async fn stage_fast_path_season(&self) {
        self.indexer
            .set_episodes(
                SERIES_ID,
                4,
                vec![
                    fixtures::aired_episode(41, 1, false),
                    fixtures::aired_episode(42, 2, false),
                ],
            )
            .await;
        self.indexer
            .set_season_releases(SERIES_ID, 4, vec![fixtures::release("good", 80, 4)])
            .await;
    }

    /// Seed `n` prior requests for the user so quota arithmetic has history.
    fn seed_requests(&self, user_id: &str, n: u32) {
        for _ in 0..n {
            self.store
                .create(CreateRequestRecord {
                    user_id: user_id.to_string(),
                    tmdb_id: TMDB_SERIES,
                    season: Some(1),
                    episode: None,
                    approved: true,
                })
                .expect("seed request");
        }
    }
}

fn per_quota_settings(limit: u32) -> RequestSettings {
    RequestSettings {
        delay_in_days: 7,
        default_limit_tv: limit,
        default_limit_movies: limit,
        approval_method: ApprovalMethod::PerQuota,
        set_limit: true,
    }
}

fn alice() -> Requester {
    fixtures::requester("alice", false)
}

#[tokio::test]
async fn test_auto_approved_fast_path_downloads_season() {
    let harness = TestHarness::new().await;
    harness.stage_fast_path_season().await;
    // 2 of 3 used, 1 remaining
    harness.seed_requests("alice", 2);
    harness.prompt.queue_season(Choice::Selected(4)).await;

    let orchestrator = harness.orchestrator(per_quota_settings(3));
    let mut session = SessionState::new();
    let outcome = orchestrator
        .request_media(
            &RequestIntent::series(TMDB_SERIES, alice()),
            &harness.prompt,
            &mut session,
        )
        .await
        .unwrap();

    let record = match outcome {
        RequestOutcome::Approved { record } => record,
        other => panic!("expected approved outcome, got {:?}", other),
    };
    assert!(record.approved);
    assert_eq!(record.tmdb_id, TMDB_SERIES);
    assert_eq!(record.season, Some(4));
    assert_eq!(record.episode, None);

    // The best release was grabbed and no episode prompt was shown.
    assert_eq!(
        harness.indexer.recorded_grabs().await,
        vec![("good".to_string(), 1)]
    );
    assert_eq!(harness.prompt.episode_mode_prompts().await, 0);
    assert_eq!(harness.prompt.episode_prompts().await, 0);

    // Quota summary was rendered into the confirmation dialog.
    let confirms = harness.prompt.confirm_prompts().await;
    assert_eq!(confirms.len(), 1);
    assert_eq!(confirms[0].0, "Confirm Automatic Search");
    assert!(confirms[0].1.contains("1/3"));

    // Exactly one new record on top of the two seeded ones.
    assert_eq!(harness.store.list_for_user("alice").unwrap().len(), 3);
}

#[tokio::test]
async fn test_cancelled_season_selection_creates_no_record() {
    let harness = TestHarness::new().await;
    harness.stage_fast_path_season().await;
    harness.prompt.queue_season(Choice::Cancelled).await;

    let orchestrator = harness.orchestrator(per_quota_settings(3));
    let mut session = SessionState::new();
    let result = orchestrator
        .request_media(
            &RequestIntent::series(TMDB_SERIES, alice()),
            &harness.prompt,
            &mut session,
        )
        .await;

    assert!(matches!(result, Err(RequestError::SelectionCancelled)));
    assert!(harness.store.list_for_user("alice").unwrap().is_empty());
    assert!(harness.indexer.recorded_grabs().await.is_empty());
    // Cancellation is terminal: no retry dialog either.
    assert!(harness.prompt.confirm_prompts().await.is_empty());
}

#[tokio::test]
async fn test_exhausted_quota_creates_pending_record_and_tracks_season() {
    let harness = TestHarness::new().await;
    harness.stage_fast_path_season().await;
    harness.seed_requests("alice", 3);
    harness.prompt.queue_season(Choice::Selected(4)).await;

    let orchestrator = harness.orchestrator(per_quota_settings(3));
    let mut session = SessionState::new();
    let outcome = orchestrator
        .request_media(
            &RequestIntent::series(TMDB_SERIES, alice()),
            &harness.prompt,
            &mut session,
        )
        .await
        .unwrap();

    let record = match outcome {
        RequestOutcome::Pending { record } => record,
        other => panic!("expected pending outcome, got {:?}", other),
    };
    assert!(!record.approved);
    assert_eq!(record.season, Some(4));

    // Season is tracked for this session and excluded from the next run.
    assert!(session.requested_seasons().contains(&4));
    assert!(harness.indexer.recorded_grabs().await.is_empty());

    harness
        .indexer
        .set_episodes(SERIES_ID, 2, vec![fixtures::aired_episode(21, 1, false)])
        .await;
    harness
        .indexer
        .set_season_releases(SERIES_ID, 2, vec![fixtures::release("s2", 50, 2)])
        .await;
    harness.prompt.queue_season(Choice::Selected(2)).await;

    orchestrator
        .request_media(
            &RequestIntent::series(TMDB_SERIES, alice()),
            &harness.prompt,
            &mut session,
        )
        .await
        .unwrap();

    let season_prompts = harness.prompt.season_prompts().await;
    assert_eq!(season_prompts.len(), 2);
    assert_eq!(season_prompts[1].unavailable, vec![4]);
}

#[tokio::test]
async fn test_monitored_selection_issues_indexer_native_search() {
    let harness = TestHarness::new().await;
    // Season 4 partially downloaded, so the mode prompt appears.
    harness
        .indexer
        .set_episodes(
            SERIES_ID,
            4,
            vec![
                fixtures::aired_episode(41, 1, true),
                fixtures::aired_episode(42, 2, false),
            ],
        )
        .await;
    harness.prompt.queue_season(Choice::Selected(4)).await;
    harness
        .prompt
        .queue_episode_mode(Choice::Selected(EpisodeMode::MonitorAll))
        .await;

    let orchestrator = harness.orchestrator(per_quota_settings(3));
    let mut session = SessionState::new();
    let outcome = orchestrator
        .request_media(
            &RequestIntent::series(TMDB_SERIES, alice()),
            &harness.prompt,
            &mut session,
        )
        .await
        .unwrap();

    assert!(matches!(outcome, RequestOutcome::Approved { .. }));

    // Monitored path goes through the indexer, not the release selector.
    assert!(harness.indexer.recorded_grabs().await.is_empty());
    assert_eq!(
        harness.indexer.monitored_series().await,
        vec![(SERIES_ID, true)]
    );
    assert_eq!(
        harness.indexer.monitored_seasons().await,
        vec![(SERIES_ID, 4, true)]
    );
    assert_eq!(
        harness.indexer.searched_seasons().await,
        vec![(SERIES_ID, 4)]
    );
}

#[tokio::test]
async fn test_manual_episode_selection_monitors_one_episode() {
    let harness = TestHarness::new().await;
    let target = fixtures::aired_episode(42, 2, false);
    harness
        .indexer
        .set_episodes(
            SERIES_ID,
            4,
            vec![fixtures::aired_episode(41, 1, true), target.clone()],
        )
        .await;
    harness.prompt.queue_season(Choice::Selected(4)).await;
    harness
        .prompt
        .queue_episode_mode(Choice::Selected(EpisodeMode::PickManually))
        .await;
    harness.prompt.queue_episode(Choice::Selected(target)).await;

    let orchestrator = harness.orchestrator(per_quota_settings(3));
    let mut session = SessionState::new();
    let outcome = orchestrator
        .request_media(
            &RequestIntent::series(TMDB_SERIES, alice()),
            &harness.prompt,
            &mut session,
        )
        .await
        .unwrap();

    let record = match outcome {
        RequestOutcome::Approved { record } => record,
        other => panic!("expected approved outcome, got {:?}", other),
    };
    assert_eq!(record.season, Some(4));
    assert_eq!(record.episode, Some(2));

    assert_eq!(harness.indexer.monitored_episodes().await, vec![42]);
    assert_eq!(harness.indexer.searched_episodes().await, vec![42]);
    assert!(harness.indexer.recorded_grabs().await.is_empty());
}

#[tokio::test]
async fn test_episode_deep_link_skips_picker() {
    let harness = TestHarness::new().await;
    harness
        .indexer
        .set_episodes(
            SERIES_ID,
            4,
            vec![
                fixtures::aired_episode(41, 1, false),
                fixtures::aired_episode(42, 2, false),
            ],
        )
        .await;

    let orchestrator = harness.orchestrator(per_quota_settings(3));
    let mut session = SessionState::new();
    let outcome = orchestrator
        .request_media(
            &RequestIntent::episode(TMDB_SERIES, 4, 2, alice()),
            &harness.prompt,
            &mut session,
        )
        .await
        .unwrap();

    let record = match outcome {
        RequestOutcome::Approved { record } => record,
        other => panic!("expected approved outcome, got {:?}", other),
    };
    assert_eq!(record.season, Some(4));
    assert_eq!(record.episode, Some(2));

    // No picker prompts on the deep link path.
    assert!(harness.prompt.season_prompts().await.is_empty());
    assert_eq!(harness.indexer.monitored_episodes().await, vec![42]);
    assert_eq!(harness.indexer.searched_episodes().await, vec![42]);
}

#[tokio::test]
async fn test_movie_request_downloads_and_persists() {
    let harness = TestHarness::new().await;
    harness
        .indexer
        .set_movie_releases(MOVIE_ID, vec![fixtures::release("movie", 60, 1)])
        .await;

    let orchestrator = harness.orchestrator(per_quota_settings(3));
    let mut session = SessionState::new();
    let outcome = orchestrator
        .request_media(
            &RequestIntent::movie(TMDB_MOVIE, alice()),
            &harness.prompt,
            &mut session,
        )
        .await
        .unwrap();

    let record = match outcome {
        RequestOutcome::Approved { record } => record,
        other => panic!("expected approved outcome, got {:?}", other),
    };
    assert!(record.approved);
    assert_eq!(record.tmdb_id, TMDB_MOVIE);
    assert_eq!(record.season, None);

    assert_eq!(
        harness.indexer.recorded_grabs().await,
        vec![("movie".to_string(), 1)]
    );
}

#[tokio::test]
async fn test_movie_request_without_quota_is_pending() {
    let harness = TestHarness::new().await;
    harness.seed_requests("alice", 3);

    let orchestrator = harness.orchestrator(per_quota_settings(3));
    let mut session = SessionState::new();
    let outcome = orchestrator
        .request_media(
            &RequestIntent::movie(TMDB_MOVIE, alice()),
            &harness.prompt,
            &mut session,
        )
        .await
        .unwrap();

    let record = match outcome {
        RequestOutcome::Pending { record } => record,
        other => panic!("expected pending outcome, got {:?}", other),
    };
    assert!(!record.approved);

    let confirms = harness.prompt.confirm_prompts().await;
    assert_eq!(confirms[0].0, "Confirm Request");
    assert!(confirms[0].1.contains("administrator"));
    assert!(harness.indexer.recorded_grabs().await.is_empty());
}

#[tokio::test]
async fn test_admin_bypasses_exhausted_quota() {
    let harness = TestHarness::new().await;
    harness.stage_fast_path_season().await;
    harness.seed_requests("root", 10);
    harness.prompt.queue_season(Choice::Selected(4)).await;

    let orchestrator = harness.orchestrator(per_quota_settings(3));
    let mut session = SessionState::new();
    let outcome = orchestrator
        .request_media(
            &RequestIntent::series(TMDB_SERIES, fixtures::requester("root", true)),
            &harness.prompt,
            &mut session,
        )
        .await
        .unwrap();

    assert!(matches!(outcome, RequestOutcome::Approved { .. }));
    let confirms = harness.prompt.confirm_prompts().await;
    assert!(confirms[0].1.contains("administrator"));
}

#[tokio::test]
async fn test_declined_confirmation_creates_nothing() {
    let harness = TestHarness::new().await;
    harness.stage_fast_path_season().await;
    harness.prompt.queue_season(Choice::Selected(4)).await;
    harness.prompt.queue_confirm(Confirmation::Declined).await;

    let orchestrator = harness.orchestrator(per_quota_settings(3));
    let mut session = SessionState::new();
    let outcome = orchestrator
        .request_media(
            &RequestIntent::series(TMDB_SERIES, alice()),
            &harness.prompt,
            &mut session,
        )
        .await
        .unwrap();

    assert_eq!(outcome, RequestOutcome::Declined);
    assert!(harness.store.list_for_user("alice").unwrap().is_empty());
    assert!(harness.indexer.recorded_grabs().await.is_empty());
}

#[tokio::test]
async fn test_failed_branch_retries_on_confirm() {
    let harness = TestHarness::new().await;
    harness.stage_fast_path_season().await;
    harness
        .indexer
        .fail_next_series_lookup(IndexerError::ApiError("boom".to_string()))
        .await;
    harness.prompt.queue_season(Choice::Selected(4)).await;

    let orchestrator = harness.orchestrator(per_quota_settings(3));
    let mut session = SessionState::new();
    // Error dialog defaults to Confirmed, so the branch re-runs and succeeds.
    let outcome = orchestrator
        .request_media(
            &RequestIntent::series(TMDB_SERIES, alice()),
            &harness.prompt,
            &mut session,
        )
        .await
        .unwrap();

    assert!(matches!(outcome, RequestOutcome::Approved { .. }));

    let confirms = harness.prompt.confirm_prompts().await;
    assert_eq!(confirms[0].0, "Error Occurred");
    assert!(confirms[0].1.contains("retry"));
}

#[tokio::test]
async fn test_declined_retry_abandons_attempt() {
    let harness = TestHarness::new().await;
    harness
        .indexer
        .fail_next_series_lookup(IndexerError::ConnectionFailed("down".to_string()))
        .await;
    harness.prompt.queue_confirm(Confirmation::Declined).await;

    let orchestrator = harness.orchestrator(per_quota_settings(3));
    let mut session = SessionState::new();
    let outcome = orchestrator
        .request_media(
            &RequestIntent::series(TMDB_SERIES, alice()),
            &harness.prompt,
            &mut session,
        )
        .await
        .unwrap();

    match outcome {
        RequestOutcome::Abandoned { reason } => assert!(reason.contains("down")),
        other => panic!("expected abandoned outcome, got {:?}", other),
    }
    assert!(harness.store.list_for_user("alice").unwrap().is_empty());
}

#[tokio::test]
async fn test_no_releases_after_retries_surfaces_error_dialog() {
    let harness = TestHarness::new().await;
    harness
        .indexer
        .set_episodes(SERIES_ID, 4, vec![fixtures::aired_episode(41, 1, false)])
        .await;
    // No releases configured at all.
    harness.prompt.queue_season(Choice::Selected(4)).await;
    harness.prompt.queue_confirm(Confirmation::Confirmed).await; // auto search
    harness.prompt.queue_confirm(Confirmation::Declined).await; // retry dialog

    let orchestrator = harness.orchestrator(per_quota_settings(3));
    let mut session = SessionState::new();
    let outcome = orchestrator
        .request_media(
            &RequestIntent::series(TMDB_SERIES, alice()),
            &harness.prompt,
            &mut session,
        )
        .await
        .unwrap();

    match outcome {
        RequestOutcome::Abandoned { reason } => assert!(reason.contains("no releases found")),
        other => panic!("expected abandoned outcome, got {:?}", other),
    }

    // Initial fetch plus the two bounded retries.
    assert_eq!(harness.indexer.season_release_fetches().await, 3);
    assert!(harness.store.list_for_user("alice").unwrap().is_empty());
}

#[tokio::test]
async fn test_persistence_failure_surfaces_error_dialog() {
    let harness = TestHarness::new().await;
    harness.stage_fast_path_season().await;
    harness.prompt.queue_season(Choice::Selected(4)).await;
    harness.prompt.queue_confirm(Confirmation::Confirmed).await; // auto search
    harness.prompt.queue_confirm(Confirmation::Declined).await; // retry dialog

    let store = Arc::new(MockRequestStore::new());
    store.set_fail_create(true);
    let orchestrator = RequestOrchestrator::new(
        Arc::clone(&harness.indexer) as Arc<dyn IndexerClient>,
        Arc::clone(&harness.metadata) as Arc<dyn MetadataClient>,
        Arc::clone(&store) as Arc<dyn RequestStore>,
        Arc::new(StaticSettings(per_quota_settings(3))),
    );

    let mut session = SessionState::new();
    let outcome = orchestrator
        .request_media(
            &RequestIntent::series(TMDB_SERIES, alice()),
            &harness.prompt,
            &mut session,
        )
        .await
        .unwrap();

    match outcome {
        RequestOutcome::Abandoned { reason } => assert!(reason.contains("persistence failure")),
        other => panic!("expected abandoned outcome, got {:?}", other),
    }
    assert!(store.records().is_empty());
}
