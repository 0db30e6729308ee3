//! JSON catalog seeds for the in-memory backend

use crate::error::StoreResult;
use crate::types::{Category, Episode, Series, UserProfile, VipPlan};
use serde::{Deserialize, Serialize};

/// Snapshot of backend tables
///
/// Missing tables default to empty; an empty `plans` table is replaced by the
/// standard plans when loaded into a backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSeed {
    #[serde(default)]
    pub series: Vec<Series>,
    #[serde(default)]
    pub episodes: Vec<Episode>,
    #[serde(default)]
    pub plans: Vec<VipPlan>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub profiles: Vec<UserProfile>,
}

impl CatalogSeed {
    /// Parse seed from JSON text
    ///
    /// # Errors
    /// `StoreError::Decode` when the text is not a valid seed
    pub fn from_json(text: &str) -> StoreResult<Self> {
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::memory::MemoryBackend;
    use crate::provider::CatalogProvider;
    use crate::types::UserId;

    const SEED: &str = r#"{
        "series": [{
            "id": "6f1c2f7e-4b7a-4d55-9d43-1a0f3c1d2e01",
            "title": "Crown of Ashes",
            "category": "Drama",
            "is_trending": true,
            "created_at": "2024-05-01T10:00:00Z"
        }],
        "episodes": [
            {
                "id": "0b7d8f1a-2c3e-4f50-8a6b-7c8d9e0f1a01",
                "series_id": "6f1c2f7e-4b7a-4d55-9d43-1a0f3c1d2e01",
                "episode_number": 2,
                "title": "The Oath",
                "video_url": "https://player.example/embed/2",
                "created_at": "2024-05-01T10:00:00Z"
            },
            {
                "id": "0b7d8f1a-2c3e-4f50-8a6b-7c8d9e0f1a02",
                "series_id": "6f1c2f7e-4b7a-4d55-9d43-1a0f3c1d2e01",
                "episode_number": 1,
                "title": "Embers",
                "video_url": "https://player.example/embed/1",
                "duration": 95,
                "created_at": "2024-05-01T10:00:00Z"
            }
        ]
    }"#;

    #[tokio::test]
    async fn seed_loads_into_backend() {
        let seed = CatalogSeed::from_json(SEED).unwrap();
        let series_id = seed.series[0].id;
        let backend = MemoryBackend::from_seed(seed).unwrap();

        let episodes = backend.episodes(series_id).await.unwrap();
        assert_eq!(episodes.len(), 2);
        assert_eq!(episodes[0].title, "Embers");
        assert_eq!(episodes[0].duration_secs, 95);
        assert_eq!(backend.vip_plans().await.unwrap().len(), 3);
    }

    #[test]
    fn seed_rejects_zero_episode_number() {
        let text = SEED.replace("\"episode_number\": 2", "\"episode_number\": 0");
        let seed = CatalogSeed::from_json(&text).unwrap();
        assert!(matches!(
            MemoryBackend::from_seed(seed),
            Err(StoreError::InvalidEpisodeNumber(0))
        ));
    }

    #[tokio::test]
    async fn seed_categories_are_served() {
        let text = SEED.replacen(
            "\"series\"",
            r#""categories": [
                {"id": "a3c1e2d4-5f60-4a7b-8c9d-0e1f2a3b4c01", "name": "Drama", "slug": "drama"},
                {"id": "a3c1e2d4-5f60-4a7b-8c9d-0e1f2a3b4c02", "name": "Sci-Fi", "slug": "sci-fi", "icon": "rocket"}
            ],
            "series""#,
            1,
        );
        let seed = CatalogSeed::from_json(&text).unwrap();
        let expected = seed.categories.clone();
        let backend = MemoryBackend::from_seed(seed).unwrap();

        let categories = backend.categories().await.unwrap();
        assert_eq!(categories, expected);
        assert_eq!(categories[1].slug, "sci-fi");
        assert_eq!(categories[1].icon.as_deref(), Some("rocket"));
    }

    #[test]
    fn seed_rejects_blank_series_title() {
        let text = SEED.replace("\"Crown of Ashes\"", "\"  \"");
        let seed = CatalogSeed::from_json(&text).unwrap();
        assert!(matches!(
            MemoryBackend::from_seed(seed),
            Err(StoreError::Validation(_))
        ));
    }

    #[test]
    fn seed_rejects_repeated_series_id() {
        let mut seed = CatalogSeed::from_json(SEED).unwrap();
        let mut twin = seed.series[0].clone();
        twin.title = "Crown of Ashes II".to_string();
        seed.series.push(twin);

        assert!(matches!(
            MemoryBackend::from_seed(seed),
            Err(StoreError::Validation(_))
        ));
    }

    #[test]
    fn seed_rejects_repeated_profile_id() {
        let mut seed = CatalogSeed::from_json(SEED).unwrap();
        let id = UserId::new();
        seed.profiles.push(UserProfile::new(id, "first@reel.example"));
        seed.profiles.push(UserProfile::new(id, "second@reel.example"));

        assert!(matches!(
            MemoryBackend::from_seed(seed),
            Err(StoreError::DuplicateProfile(dup)) if dup == id
        ));
    }

    #[test]
    fn malformed_seed_is_decode_error() {
        assert!(matches!(
            CatalogSeed::from_json("{\"series\": 3}"),
            Err(StoreError::Decode(_))
        ));
    }
}
