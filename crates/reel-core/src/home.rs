//! Home feed

use crate::config::HomeConfig;
use crate::error::StorefrontResult;
use reel_store::{CatalogProvider, Series, SeriesQuery};
use serde::{Deserialize, Serialize};

/// Label of the chip that disables category filtering
pub const ALL_CATEGORIES: &str = "All";

/// Category chip selection
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    /// Parse a chip label; `All` (any case) disables filtering
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        if label.is_empty() || label.eq_ignore_ascii_case(ALL_CATEGORIES) {
            Self::All
        } else {
            Self::Named(label.to_string())
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Named(name) => name,
        }
    }

    fn query(&self) -> SeriesQuery {
        match self {
            Self::All => SeriesQuery::all(),
            Self::Named(name) => SeriesQuery::all().in_category(name.clone()),
        }
    }
}

/// Home screen contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomeFeed {
    /// Chip labels in display order
    pub categories: Vec<String>,
    pub selected: CategoryFilter,
    /// Series in the selected category, newest first
    pub series: Vec<Series>,
    /// Trending strip, newest first
    pub trending: Vec<Series>,
}

/// Load the home feed
///
/// # Errors
/// Store failures from the catalog
pub async fn load_home(
    catalog: &dyn CatalogProvider,
    config: &HomeConfig,
    filter: CategoryFilter,
) -> StorefrontResult<HomeFeed> {
    let series = catalog.list_series(&filter.query()).await?;
    let mut trending = catalog.list_series(&SeriesQuery::all().trending()).await?;
    trending.truncate(config.trending_limit);

    tracing::debug!(
        category = filter.label(),
        series = series.len(),
        trending = trending.len(),
        "Loaded home feed"
    );

    Ok(HomeFeed {
        categories: config.categories.clone(),
        selected: filter,
        series,
        trending,
    })
}
