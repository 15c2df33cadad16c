use serde::{Deserialize, Serialize};

use crate::store::MediaType;

/// Request quota and approval settings.
///
/// These are configuration inputs: the core reads whatever values it is
/// handed and never assumes a particular window or limit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RequestSettings {
    /// Rolling window length in days for quota counting.
    #[serde(default = "default_delay_in_days")]
    pub delay_in_days: u32,

    /// Maximum auto-approved series requests within the window.
    #[serde(default)]
    pub default_limit_tv: u32,

    /// Maximum auto-approved movie requests within the window.
    #[serde(default)]
    pub default_limit_movies: u32,

    /// How requests get approved.
    #[serde(default)]
    pub approval_method: ApprovalMethod,

    /// Whether the per-window limit is enforced at all. When false, nothing
    /// auto-approves through the quota path.
    #[serde(default)]
    pub set_limit: bool,
}

fn default_delay_in_days() -> u32 {
    7
}

impl Default for RequestSettings {
    fn default() -> Self {
        Self {
            delay_in_days: default_delay_in_days(),
            default_limit_tv: 0,
            default_limit_movies: 0,
            approval_method: ApprovalMethod::default(),
            set_limit: false,
        }
    }
}

impl RequestSettings {
    /// The per-window request limit for the given media kind.
    pub fn limit_for(&self, media_type: MediaType) -> u32 {
        match media_type {
            MediaType::Movie => self.default_limit_movies,
            MediaType::Series => self.default_limit_tv,
        }
    }
}

/// Approval policy for new requests.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalMethod {
    /// Auto-approve while the user still has quota in the rolling window.
    #[default]
    PerQuota,
    /// Every request is approved without review.
    AutoApprove,
}

/// Synchronous read access to the current request settings.
///
/// The settings store itself (persistence, UI editing) lives outside the
/// core; callers hand in whatever provider fits their deployment.
pub trait SettingsProvider: Send + Sync {
    fn request_settings(&self) -> RequestSettings;
}

/// Fixed in-memory settings, for embedders and tests.
#[derive(Debug, Clone)]
pub struct StaticSettings(pub RequestSettings);

impl SettingsProvider for StaticSettings {
    fn request_settings(&self) -> RequestSettings {
        self.0.clone()
    }
}
