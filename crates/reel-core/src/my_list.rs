//! My list screen

use crate::error::StorefrontResult;
use reel_store::{CatalogProvider, ListStore, Series, UserId};

/// Bookmarked series, in the order they were added
///
/// Bookmarks whose series has since been deleted are skipped.
///
/// # Errors
/// Store failures reading bookmarks or series
pub async fn load_my_list(
    catalog: &dyn CatalogProvider,
    lists: &dyn ListStore,
    user_id: UserId,
) -> StorefrontResult<Vec<Series>> {
    let ids: Vec<_> = lists
        .bookmarks(user_id)
        .await?
        .into_iter()
        .map(|b| b.series_id)
        .collect();
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    Ok(catalog.series_by_ids(&ids).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reel_store::{MemoryBackend, NewSeries};

    #[tokio::test]
    async fn lists_bookmarks_in_insertion_order() {
        let backend = MemoryBackend::new();
        let user = UserId::new();
        let first = backend.insert_series(NewSeries::new("First", "Drama")).await.unwrap();
        let second = backend.insert_series(NewSeries::new("Second", "Action")).await.unwrap();
        backend.add_bookmark(user, second.id).await.unwrap();
        backend.add_bookmark(user, first.id).await.unwrap();

        let titles: Vec<String> = load_my_list(&backend, &backend, user)
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.title)
            .collect();
        assert_eq!(titles, vec!["Second", "First"]);
    }

    #[tokio::test]
    async fn empty_list() {
        let backend = MemoryBackend::new();
        assert!(load_my_list(&backend, &backend, UserId::new())
            .await
            .unwrap()
            .is_empty());
    }
}
