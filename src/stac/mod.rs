//! STAC item search
//!
//! One query per search: point intersection, closed date interval and a cloud
//! cover bound. The least cloudy match wins.

pub mod client;
pub mod models;
pub mod select;

use async_trait::async_trait;
use tracing::debug;

use crate::error::{Error, Result};
use crate::geo::Coordinate;
use crate::types::{DateRange, SceneResult};

pub use client::StacClient;
pub use models::{ItemCollection, SearchRequest, StacItem};
pub use select::select_best;

/// Where and when to look
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneQuery {
    pub coordinate: Coordinate,
    pub dates: DateRange,
}

/// A searchable imagery catalog
///
/// Returns every matching item in catalog order. Implementations do not
/// retry.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn search(&self, query: &SceneQuery) -> Result<Vec<StacItem>>;
}

/// Outcome of a successful search
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSearch {
    /// Number of items that matched the query
    pub matched: usize,
    pub best: SceneResult,
}

/// Runs a single catalog query and picks the least cloudy scene
///
/// An empty result yields [`Error::EmptyResultSet`]; catalog failures are
/// passed through unchanged.
pub async fn find_best_scene(catalog: &dyn Catalog, query: &SceneQuery) -> Result<SceneSearch> {
    let items = catalog.search(query).await?;
    debug!(matched = items.len(), "catalog returned items");

    let best = select_best(&items).ok_or(Error::EmptyResultSet)?;

    Ok(SceneSearch {
        matched: items.len(),
        best: best.to_scene(),
    })
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use crate::stac::models::{Asset, ItemProperties};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// In-memory catalog recording every query it receives
    pub struct MockCatalog {
        items: Vec<StacItem>,
        fail: bool,
        calls: AtomicUsize,
        queries: Mutex<Vec<SceneQuery>>,
    }

    impl MockCatalog {
        pub fn with_items(items: Vec<StacItem>) -> Self {
            Self { items, fail: false, calls: AtomicUsize::new(0), queries: Mutex::new(Vec::new()) }
        }

        pub fn failing() -> Self {
            Self { fail: true, ..Self::with_items(Vec::new()) }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn queries(&self) -> Vec<SceneQuery> {
            self.queries.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Catalog for MockCatalog {
        async fn search(&self, query: &SceneQuery) -> Result<Vec<StacItem>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.queries.lock().unwrap().push(*query);
            if self.fail {
                return Err(Error::Catalog { status: 503, message: "service unavailable".to_string() });
            }
            Ok(self.items.clone())
        }
    }

    pub fn item(id: &str, cloud_cover: Option<f64>, thumbnail: Option<&str>) -> StacItem {
        let mut assets = HashMap::new();
        if let Some(href) = thumbnail {
            assets.insert("thumbnail".to_string(), Asset { href: href.to_string() });
        }
        StacItem {
            id: id.to_string(),
            properties: ItemProperties { datetime: None, cloud_cover },
            assets,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::{item, MockCatalog};
    use super::*;

    fn query() -> SceneQuery {
        SceneQuery {
            coordinate: Coordinate::normalized(37.8199, -122.4783),
            dates: DateRange::parse("2024-06-01", "2024-06-30").unwrap(),
        }
    }

    #[tokio::test]
    async fn test_best_scene_first_tie_wins() {
        let catalog = MockCatalog::with_items(vec![
            item("a", Some(22.1), None),
            item("b", Some(5.4), Some("http://t/b.jpg")),
            item("c", Some(5.4), Some("http://t/c.jpg")),
            item("d", Some(30.0), None),
        ]);

        let found = find_best_scene(&catalog, &query()).await.unwrap();
        assert_eq!(found.matched, 4);
        assert_eq!(found.best.id, "b");
        assert_eq!(found.best.cloud_cover, Some(5.4));
        assert_eq!(found.best.thumbnail_url.as_deref(), Some("http://t/b.jpg"));
    }

    #[tokio::test]
    async fn test_empty_result_set() {
        let catalog = MockCatalog::with_items(Vec::new());

        let err = find_best_scene(&catalog, &query()).await.unwrap_err();
        assert!(matches!(err, Error::EmptyResultSet));
        assert_eq!(catalog.calls(), 1);
    }

    #[tokio::test]
    async fn test_missing_thumbnail_is_not_an_error() {
        let catalog = MockCatalog::with_items(vec![item("a", Some(1.0), None)]);

        let found = find_best_scene(&catalog, &query()).await.unwrap();
        assert!(found.best.thumbnail_url.is_none());
    }

    #[tokio::test]
    async fn test_upstream_failure_propagates() {
        let catalog = MockCatalog::failing();

        let err = find_best_scene(&catalog, &query()).await.unwrap_err();
        assert!(err.is_upstream_failure());
    }
}
