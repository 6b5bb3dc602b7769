//! `catalog-cli list`: follows the feed through its search projection until the
//! first terminal state.

use catalog_sync::{CatalogFeed, CatalogState, SearchProjector, SearchQuery};
use tracing::debug;

use crate::render;
use crate::state::AppState;

pub async fn run(state: &AppState, query: Option<String>, json: bool) -> anyhow::Result<()> {
    let feed = CatalogFeed::new(state.service.clone());
    let search = SearchQuery::new();

    if let Some(query) = query {
        search.update(query);
    }

    let mut projector = SearchProjector::new(feed.subscribe(), search.subscribe());
    let view = follow(&mut projector, |view| {
        if !json {
            print!("{}", render::catalog(view));
        }
    })
    .await;

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    }

    Ok(())
}

/// Drives the projector until a terminal state, reporting each distinct view.
///
/// Returns the last view seen; `Loading` only if the feed closed early.
pub async fn follow<F>(projector: &mut SearchProjector, mut report: F) -> CatalogState
where
    F: FnMut(&CatalogState),
{
    let mut view = projector.current();
    report(&view);

    while !view.is_terminal() {
        match projector.next().await {
            Some(next) if next == view => continue,
            Some(next) => {
                debug!(terminal = next.is_terminal(), "Catalog view changed");
                view = next;
                report(&view);
            }
            None => break,
        }
    }

    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::{Product, SyncResult};
    use tokio::sync::watch;

    fn shirt() -> Product {
        Product::new("Red Shirt", "Apparel")
    }

    #[tokio::test]
    async fn test_follow_stops_at_first_terminal_state() {
        let (catalog_tx, catalog_rx) = watch::channel(SyncResult::Loading);
        let (_query_tx, query_rx) = watch::channel(String::new());
        let mut projector = SearchProjector::new(catalog_rx, query_rx);

        let producer = tokio::spawn(async move {
            catalog_tx.send_replace(SyncResult::Loading);
            catalog_tx.send_replace(SyncResult::success(vec![shirt()]));
            catalog_tx
        });

        let mut seen = Vec::new();
        let view = follow(&mut projector, |view| seen.push(view.clone())).await;
        let _catalog_tx = producer.await.unwrap();

        assert_eq!(view, SyncResult::success(vec![shirt()]));
        assert_eq!(seen.first(), Some(&SyncResult::Loading));
        assert_eq!(seen.last(), Some(&view));
        assert!(!seen.windows(2).any(|pair| pair[0] == pair[1]));
    }

    #[tokio::test]
    async fn test_follow_applies_query() {
        let catalog = SyncResult::error(
            "No internet connection",
            Some(vec![shirt(), Product::new("Blue Mug", "Kitchen")]),
        );
        let (_catalog_tx, catalog_rx) = watch::channel(catalog);
        let (_query_tx, query_rx) = watch::channel("mug".to_string());
        let mut projector = SearchProjector::new(catalog_rx, query_rx);

        let view = follow(&mut projector, |_| {}).await;

        assert_eq!(view.error_message(), Some("No internet connection"));
        let cached = view.data().unwrap();
        assert_eq!(cached.len(), 1);
        assert_eq!(cached[0].product_name, "Blue Mug");
    }

    #[tokio::test]
    async fn test_follow_returns_loading_when_feed_closes() {
        let (catalog_tx, catalog_rx) = watch::channel(SyncResult::Loading);
        let (query_tx, query_rx) = watch::channel(String::new());
        let mut projector = SearchProjector::new(catalog_rx, query_rx);
        drop(catalog_tx);
        drop(query_tx);

        let view = follow(&mut projector, |_| {}).await;

        assert!(view.is_loading());
    }
}
