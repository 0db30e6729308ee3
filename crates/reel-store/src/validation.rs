//! Boundary validation for catalog writes
//!
//! Malformed records are rejected here so that everything downstream
//! (the entitlement gate in particular) can trust episode numbering.

use crate::error::StoreError;
use crate::types::{Episode, EpisodeId, NewEpisode, NewSeries, NewVipPlan, Series, SeriesId};

/// Validate an episode number (1-based)
#[inline]
pub fn validate_episode_number(number: i32) -> Result<(), StoreError> {
    if number < 1 {
        return Err(StoreError::InvalidEpisodeNumber(number));
    }
    Ok(())
}

/// Validate series insert payload
#[inline]
pub fn validate_new_series(series: &NewSeries) -> Result<(), StoreError> {
    validate_series_fields(&series.title, &series.category)
}

/// Validate a stored series row, as loaded from a seed
#[inline]
pub fn validate_series(series: &Series) -> Result<(), StoreError> {
    validate_series_fields(&series.title, &series.category)
}

fn validate_series_fields(title: &str, category: &str) -> Result<(), StoreError> {
    if title.trim().is_empty() {
        return Err(StoreError::Validation("series title is empty".to_string()));
    }
    if category.trim().is_empty() {
        return Err(StoreError::Validation("series category is empty".to_string()));
    }
    Ok(())
}

/// Validate episode insert payload against the series' existing episodes
pub fn validate_new_episode(episode: &NewEpisode, siblings: &[Episode]) -> Result<(), StoreError> {
    validate_episode_number(episode.episode_number)?;
    validate_video_url(&episode.video_url)?;
    ensure_unique_number(episode.series_id, episode.episode_number, None, siblings)
}

/// Check that `number` is free within the series, ignoring `exclude`
pub fn ensure_unique_number(
    series_id: SeriesId,
    number: i32,
    exclude: Option<EpisodeId>,
    siblings: &[Episode],
) -> Result<(), StoreError> {
    let taken = siblings
        .iter()
        .filter(|e| e.series_id == series_id)
        .filter(|e| Some(e.id) != exclude)
        .any(|e| e.episode_number == number);

    if taken {
        return Err(StoreError::DuplicateEpisodeNumber { series_id, number });
    }
    Ok(())
}

/// Validate a playable video URL
pub fn validate_video_url(url: &str) -> Result<(), StoreError> {
    if url.trim().is_empty() {
        return Err(StoreError::Validation("video url is empty".to_string()));
    }
    Ok(())
}

/// Validate plan insert payload
pub fn validate_new_plan(plan: &NewVipPlan) -> Result<(), StoreError> {
    if plan.name.trim().is_empty() {
        return Err(StoreError::Validation("plan name is empty".to_string()));
    }
    if plan.duration_days == 0 {
        return Err(StoreError::Validation("plan duration must be at least one day".to_string()));
    }
    Ok(())
}
