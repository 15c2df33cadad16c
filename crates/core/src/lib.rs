pub mod config;
pub mod download;
pub mod indexer;
pub mod metadata;
pub mod picker;
pub mod prompt;
pub mod quota;
pub mod request;
pub mod selector;
pub mod store;
pub mod testing;

pub use config::{
    load_settings, load_settings_from_str, validate_settings, ApprovalMethod, ConfigError,
    RequestSettings, SettingsProvider, StaticSettings,
};
pub use download::{DownloadError, DownloadOrchestrator, DownloadUnit};
pub use indexer::{Episode, IndexerClient, IndexerError, MovieItem, Release, SeriesItem};
pub use metadata::{CanonicalMovie, CanonicalSeries, MetadataClient, MetadataError};
pub use picker::{select_season_and_episode, PickError, SelectionResult};
pub use prompt::{Choice, Confirmation, EpisodeMode, PromptSurface};
pub use quota::{QuotaState, Requester};
pub use request::{RequestError, RequestIntent, RequestOrchestrator, RequestOutcome, SessionState};
pub use selector::{select_best, SelectionContext};
pub use store::{
    CreateRequestRecord, MediaType, RequestRecord, RequestStore, RequestStoreError,
    SqliteRequestStore,
};
