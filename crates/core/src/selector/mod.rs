//! Release selection.
//!
//! Scores release candidates and picks the best one. Pure functions over
//! their inputs; the download orchestrator decides what to do with the
//! winner.

use crate::indexer::Release;

/// Seeders above this count stop improving the score.
const SEEDER_CAP: u32 = 100;

/// Context a release is scored against.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectionContext {
    /// Season the caller is trying to fill, for season-mapped weighting.
    pub season: Option<u32>,
}

impl SelectionContext {
    /// Context for a whole-season download.
    pub fn for_season(season: u32) -> Self {
        Self {
            season: Some(season),
        }
    }
}

/// Pick the best release by score.
///
/// Linear scan keeping the current best; a candidate replaces it only on a
/// strictly higher score, so ties resolve to the earliest-seen release.
/// Returns `None` on empty input.
pub fn select_best<'a>(releases: &'a [Release], context: &SelectionContext) -> Option<&'a Release> {
    let mut best: Option<(&Release, i64)> = None;

    for release in releases {
        let points = score_release(release, context);
        match best {
            Some((_, best_points)) if points <= best_points => {}
            _ => best = Some((release, points)),
        }
    }

    best.map(|(release, _)| release)
}

/// Score a release for ranking (higher is better).
pub fn score_release(release: &Release, context: &SelectionContext) -> i64 {
    let mut score: i64 = 0;

    // Seeder health, with diminishing value above the cap
    score += i64::from(release.seeders.min(SEEDER_CAP)) * 2;

    if release.full_season {
        score += 50;
    }

    // Season mapping: a release mapped to a different season is almost
    // certainly the wrong grab
    if let Some(wanted) = context.season {
        match release.mapped_season {
            Some(mapped) if mapped == wanted => score += 100,
            Some(_) => score -= 100,
            None => {}
        }
    }

    score += quality_points(release);

    if release.rejected {
        score -= 200;
    }

    score
}

/// Points for the resolution marker, from the indexer's parsed quality
/// label or the raw title.
fn quality_points(release: &Release) -> i64 {
    let haystack = release
        .quality
        .clone()
        .unwrap_or_else(|| release.title.clone())
        .to_lowercase();

    if haystack.contains("2160p") {
        40
    } else if haystack.contains("1080p") {
        30
    } else if haystack.contains("720p") {
        20
    } else if haystack.contains("480p") {
        10
    } else {
        0
    }
}
