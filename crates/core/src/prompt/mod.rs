//! User interaction surface.
//!
//! The surrounding UI renders confirmation dialogs, pickers and progress
//! indicators; the core only sees this trait. Prompt resolution is
//! asynchronous and cooperative: a cancelled dialog resolves to a distinct
//! outcome, it never raises an error.

use async_trait::async_trait;

use crate::indexer::Episode;

/// Outcome of a yes/no confirmation dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl Confirmation {
    pub fn is_confirmed(self) -> bool {
        matches!(self, Confirmation::Confirmed)
    }
}

/// Outcome of a selection prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice<T> {
    Selected(T),
    Cancelled,
}

/// How to resolve episodes within a partially available season.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeMode {
    /// Monitor every episode of the season and let the indexer search.
    MonitorAll,
    /// Pick a single episode by hand.
    PickManually,
}

/// Surface through which the core talks to the user.
#[async_trait]
pub trait PromptSurface: Send + Sync {
    /// Show a confirmation dialog and wait for the user's answer.
    async fn confirm(&self, header: &str, body: &str) -> Confirmation;

    /// Ask the user to pick one season. Seasons in `unavailable` are shown
    /// but cannot be selected.
    async fn select_season(&self, seasons: &[u32], unavailable: &[u32]) -> Choice<u32>;

    /// Ask whether to auto-monitor the season or pick an episode manually.
    async fn select_episode_mode(&self) -> Choice<EpisodeMode>;

    /// Ask the user to pick one episode from the list.
    async fn select_episode(&self, episodes: &[Episode]) -> Choice<Episode>;

    /// Push a progress message to whatever indicator the UI is showing.
    async fn report_progress(&self, message: &str);
}
