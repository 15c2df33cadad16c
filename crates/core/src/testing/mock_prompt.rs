//! Mock prompt surface for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::indexer::Episode;
use crate::prompt::{Choice, Confirmation, EpisodeMode, PromptSurface};

/// A season prompt as seen by the user, recorded for assertions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonPromptRecord {
    /// Seasons offered.
    pub seasons: Vec<u32>,
    /// Seasons shown as unavailable.
    pub unavailable: Vec<u32>,
}

/// Mock implementation of the [`PromptSurface`] trait.
///
/// Answers are scripted through queues; each prompt pops its queue. An
/// empty confirmation queue answers `Confirmed` (most flows confirm their
/// way through), an empty selection queue answers `Cancelled`. Every prompt
/// and progress message is recorded.
#[derive(Default)]
pub struct MockPrompt {
    confirmations: Arc<RwLock<VecDeque<Confirmation>>>,
    confirm_log: Arc<RwLock<Vec<(String, String)>>>,
    seasons: Arc<RwLock<VecDeque<Choice<u32>>>>,
    season_log: Arc<RwLock<Vec<SeasonPromptRecord>>>,
    modes: Arc<RwLock<VecDeque<Choice<EpisodeMode>>>>,
    mode_count: Arc<RwLock<usize>>,
    episodes: Arc<RwLock<VecDeque<Choice<Episode>>>>,
    episode_count: Arc<RwLock<usize>>,
    progress: Arc<RwLock<Vec<String>>>,
}

impl MockPrompt {
    /// Create a new mock prompt with empty queues.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an answer for the next confirmation dialog.
    pub async fn queue_confirm(&self, answer: Confirmation) {
        self.confirmations.write().await.push_back(answer);
    }

    /// Queue an answer for the next season selection.
    pub async fn queue_season(&self, choice: Choice<u32>) {
        self.seasons.write().await.push_back(choice);
    }

    /// Queue an answer for the next episode-mode prompt.
    pub async fn queue_episode_mode(&self, choice: Choice<EpisodeMode>) {
        self.modes.write().await.push_back(choice);
    }

    /// Queue an answer for the next episode selection.
    pub async fn queue_episode(&self, choice: Choice<Episode>) {
        self.episodes.write().await.push_back(choice);
    }

    /// Confirmation dialogs shown, as (header, body) pairs.
    pub async fn confirm_prompts(&self) -> Vec<(String, String)> {
        self.confirm_log.read().await.clone()
    }

    /// Season prompts shown.
    pub async fn season_prompts(&self) -> Vec<SeasonPromptRecord> {
        self.season_log.read().await.clone()
    }

    /// How many episode-mode prompts were shown.
    pub async fn episode_mode_prompts(&self) -> usize {
        *self.mode_count.read().await
    }

    /// How many episode selection prompts were shown.
    pub async fn episode_prompts(&self) -> usize {
        *self.episode_count.read().await
    }

    /// Progress messages reported so far.
    pub async fn progress_messages(&self) -> Vec<String> {
        self.progress.read().await.clone()
    }
}

#[async_trait]
impl PromptSurface for MockPrompt {
    async fn confirm(&self, header: &str, body: &str) -> Confirmation {
        self.confirm_log
            .write()
            .await
            .push((header.to_string(), body.to_string()));
        self.confirmations
            .write()
            .await
            .pop_front()
            .unwrap_or(Confirmation::Confirmed)
    }

    async fn select_season(&self, seasons: &[u32], unavailable: &[u32]) -> Choice<u32> {
        self.season_log.write().await.push(SeasonPromptRecord {
            seasons: seasons.to_vec(),
            unavailable: unavailable.to_vec(),
        });
        self.seasons
            .write()
            .await
            .pop_front()
            .unwrap_or(Choice::Cancelled)
    }

    async fn select_episode_mode(&self) -> Choice<EpisodeMode> {
        *self.mode_count.write().await += 1;
        self.modes
            .write()
            .await
            .pop_front()
            .unwrap_or(Choice::Cancelled)
    }

    async fn select_episode(&self, _episodes: &[Episode]) -> Choice<Episode> {
        *self.episode_count.write().await += 1;
        self.episodes
            .write()
            .await
            .pop_front()
            .unwrap_or(Choice::Cancelled)
    }

    async fn report_progress(&self, message: &str) {
        self.progress.write().await.push(message.to_string());
    }
}
