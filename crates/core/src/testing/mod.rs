//! Testing utilities and mock implementations.
//!
//! Mock implementations of every collaborator trait, so the whole request
//! flow can be exercised without real infrastructure.
//!
//! # Example
//!
//! ```rust,ignore
//! use concierge_core::testing::{MockIndexer, MockMetadata, MockPrompt, fixtures};
//!
//! let indexer = MockIndexer::new();
//! indexer.set_series(fixtures::series_item(7, "Some Show", &[1, 2])).await;
//!
//! let prompt = MockPrompt::new();
//! prompt.queue_season(Choice::Selected(2)).await;
//!
//! // Use with RequestOrchestrator...
//! ```

mod mock_indexer;
mod mock_metadata;
mod mock_prompt;
mod mock_store;

pub use mock_indexer::MockIndexer;
pub use mock_metadata::MockMetadata;
pub use mock_prompt::{MockPrompt, SeasonPromptRecord};
pub use mock_store::MockRequestStore;

/// Test fixtures and helper functions.
pub mod fixtures {
    use chrono::{Duration, Utc};

    use crate::indexer::{Episode, MovieItem, Release, SeasonInfo, SeriesItem};
    use crate::metadata::{CanonicalMovie, CanonicalSeries, ExternalIds};
    use crate::quota::Requester;

    /// Create a test series with the given seasons, ten episodes each.
    pub fn series_item(id: u64, title: &str, seasons: &[u32]) -> SeriesItem {
        SeriesItem {
            id,
            title: title.to_string(),
            tvdb_id: Some(id * 1000),
            seasons: seasons
                .iter()
                .map(|&season_number| SeasonInfo {
                    season_number,
                    monitored: false,
                    episode_count: 10,
                })
                .collect(),
        }
    }

    /// Create a test movie item.
    pub fn movie_item(id: u64, title: &str) -> MovieItem {
        MovieItem {
            id,
            title: title.to_string(),
            tmdb_id: Some(id * 100),
        }
    }

    /// Episode that aired a month ago.
    pub fn aired_episode(id: u64, number: u32, has_file: bool) -> Episode {
        Episode {
            id,
            episode_number: number,
            title: format!("Episode {}", number),
            has_file,
            air_date: Some(Utc::now() - Duration::days(30)),
        }
    }

    /// Episode airing a month from now.
    pub fn unaired_episode(id: u64, number: u32) -> Episode {
        Episode {
            id,
            episode_number: number,
            title: format!("Episode {}", number),
            has_file: false,
            air_date: Some(Utc::now() + Duration::days(30)),
        }
    }

    /// Full-season 1080p release mapped to the given season.
    pub fn release(guid: &str, seeders: u32, season: u32) -> Release {
        Release {
            guid: guid.to_string(),
            indexer_id: 1,
            title: format!("Show.S{:02}.1080p.WEB-DL.{}", season, guid),
            seeders,
            size_bytes: 4 * 1024 * 1024 * 1024,
            quality: Some("1080p".to_string()),
            full_season: true,
            mapped_season: Some(season),
            rejected: false,
        }
    }

    /// Canonical series with a TVDB id.
    pub fn canonical_series(tmdb_id: u64, name: &str, tvdb_id: u64) -> CanonicalSeries {
        CanonicalSeries {
            tmdb_id,
            name: name.to_string(),
            external_ids: ExternalIds {
                tvdb_id: Some(tvdb_id),
            },
        }
    }

    /// Canonical movie.
    pub fn canonical_movie(tmdb_id: u64, title: &str) -> CanonicalMovie {
        CanonicalMovie {
            tmdb_id,
            title: title.to_string(),
        }
    }

    /// A requesting user.
    pub fn requester(id: &str, is_admin: bool) -> Requester {
        Requester {
            id: id.to_string(),
            is_admin,
        }
    }
}
