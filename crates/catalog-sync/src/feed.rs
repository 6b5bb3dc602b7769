//! # Catalog Feed & Live Search
//!
//! The shared catalog subscription, the search query holder, and the
//! projector that combines them.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ProductSyncService::fetch_products()                                  │
//! │       │  (one fetch task, started on first subscribe)                   │
//! │       ▼                                                                 │
//! │  CatalogFeed ── watch<CatalogState> ──┐                                 │
//! │                 (replays latest)      │                                 │
//! │                                       ▼                                 │
//! │                              SearchProjector ──► projected view         │
//! │                                       ▲       (recomputed on either)    │
//! │  SearchQuery ── watch<String> ────────┘                                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The feed owns the only fetch task, so at most one fetch is outstanding.
//! The projector runs on the caller's task and never spawns.

use async_stream::stream;
use catalog_core::search::Projection;
use catalog_core::SyncResult;
use futures_util::{Stream, StreamExt};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::service::{CatalogState, ProductSyncService};

// =============================================================================
// Catalog Feed
// =============================================================================

/// Single shared subscription to the catalog.
///
/// ## Lifecycle
/// ```text
/// new()        state = Loading, nothing fetched
/// subscribe()  first call spawns the fetch; every call gets a receiver
///              that sees the latest state immediately
/// refresh()    aborts a running fetch, starts a new one
/// drop         aborts a running fetch
/// ```
///
/// `subscribe` and `refresh` must be called inside a Tokio runtime.
pub struct CatalogFeed {
    service: ProductSyncService,
    state: Arc<watch::Sender<CatalogState>>,
    started: AtomicBool,
    generation: Arc<AtomicU64>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl CatalogFeed {
    pub fn new(service: ProductSyncService) -> Self {
        let (state, _) = watch::channel(SyncResult::Loading);

        CatalogFeed {
            service,
            state: Arc::new(state),
            started: AtomicBool::new(false),
            generation: Arc::new(AtomicU64::new(0)),
            task: Mutex::new(None),
        }
    }

    /// Returns a receiver of catalog states, starting the fetch on first use.
    pub fn subscribe(&self) -> watch::Receiver<CatalogState> {
        let receiver = self.state.subscribe();

        if !self.started.swap(true, Ordering::SeqCst) {
            self.start_fetch();
        }

        receiver
    }

    /// Latest catalog state.
    pub fn current(&self) -> CatalogState {
        self.state.borrow().clone()
    }

    /// Runs a fresh fetch, abandoning one still in flight.
    pub fn refresh(&self) {
        self.started.store(true, Ordering::SeqCst);
        self.start_fetch();
    }

    fn start_fetch(&self) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let latest = Arc::clone(&self.generation);
        let state = Arc::clone(&self.state);
        let fetch = self.service.fetch_products();

        debug!(generation, "Starting catalog fetch");

        let handle = tokio::spawn(async move {
            futures_util::pin_mut!(fetch);

            while let Some(next) = fetch.next().await {
                let published = state.send_if_modified(|current| {
                    if latest.load(Ordering::SeqCst) != generation {
                        return false;
                    }
                    *current = next;
                    true
                });

                if !published {
                    debug!(generation, "Superseded catalog fetch stopped");
                    return;
                }
            }
        });

        let mut task = self.task.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = task.replace(handle) {
            previous.abort();
        }
    }
}

impl Drop for CatalogFeed {
    fn drop(&mut self) {
        let task = self.task.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = task.take() {
            handle.abort();
        }
    }
}

// =============================================================================
// Search Query
// =============================================================================

/// Live search query string, initially empty.
#[derive(Debug)]
pub struct SearchQuery {
    query: watch::Sender<String>,
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchQuery {
    pub fn new() -> Self {
        let (query, _) = watch::channel(String::new());
        SearchQuery { query }
    }

    /// Replaces the query.
    pub fn update(&self, query: impl Into<String>) {
        self.query.send_replace(query.into());
    }

    /// Re-publishes the current query so projections recompute.
    pub fn perform_search(&self) {
        self.query.send_modify(|_| {});
    }

    pub fn current(&self) -> String {
        self.query.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.query.subscribe()
    }
}

// =============================================================================
// Search Projector
// =============================================================================

/// Catalog state filtered by the live query.
///
/// Holds the latest value of each input and recomputes whenever either
/// changes. Ends once both inputs are closed.
pub struct SearchProjector {
    catalog: watch::Receiver<CatalogState>,
    query: watch::Receiver<String>,
    catalog_open: bool,
    query_open: bool,
    projection: Projection,
}

impl SearchProjector {
    pub fn new(catalog: watch::Receiver<CatalogState>, query: watch::Receiver<String>) -> Self {
        SearchProjector {
            catalog,
            query,
            catalog_open: true,
            query_open: true,
            projection: Projection::new(),
        }
    }

    /// Projection of the latest catalog and query, computed now.
    pub fn current(&mut self) -> CatalogState {
        let catalog = self.catalog.borrow_and_update().clone();
        let query = self.query.borrow_and_update().clone();

        self.projection.set_catalog(catalog);
        self.projection.set_query(query).clone()
    }

    /// Waits for either input to change and returns the recomputed view.
    ///
    /// Returns `None` once both inputs are closed.
    pub async fn next(&mut self) -> Option<CatalogState> {
        loop {
            if !self.catalog_open && !self.query_open {
                return None;
            }

            tokio::select! {
                changed = self.catalog.changed(), if self.catalog_open => {
                    if changed.is_err() {
                        self.catalog_open = false;
                        continue;
                    }
                    let catalog = self.catalog.borrow_and_update().clone();
                    return Some(self.projection.set_catalog(catalog).clone());
                }
                changed = self.query.changed(), if self.query_open => {
                    if changed.is_err() {
                        self.query_open = false;
                        continue;
                    }
                    let query = self.query.borrow_and_update().clone();
                    return Some(self.projection.set_query(query).clone());
                }
            }
        }
    }

    /// The current view followed by every recomputation.
    pub fn into_stream(mut self) -> impl Stream<Item = CatalogState> + Send {
        stream! {
            yield self.current();
            while let Some(view) = self.next().await {
                yield view;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{TransportError, TransportResult};
    use crate::files::FileProvider;
    use crate::protocol::{ProductSubmission, TransportResponse};
    use crate::service::tests::{raw, repository, FakeFiles, FakeTransport, Reply};
    use crate::transport::CatalogTransport;
    use async_trait::async_trait;
    use catalog_core::{AddProductResponse, Product, RawProduct};
    use std::future::pending;
    use std::sync::atomic::AtomicUsize;

    async fn feed(transport: Arc<dyn CatalogTransport>) -> CatalogFeed {
        let files: Arc<dyn FileProvider> = Arc::new(FakeFiles);
        CatalogFeed::new(ProductSyncService::new(
            transport,
            Arc::new(repository().await),
            files,
        ))
    }

    async fn terminal(receiver: &mut watch::Receiver<CatalogState>) -> CatalogState {
        receiver
            .wait_for(|state| state.is_terminal())
            .await
            .unwrap()
            .clone()
    }

    fn shirt_and_mug() -> Vec<Product> {
        vec![
            Product::new("Red Shirt", "Apparel"),
            Product::new("Blue Mug", "Kitchen"),
        ]
    }

    // =========================================================================
    // CatalogFeed
    // =========================================================================

    #[tokio::test]
    async fn test_feed_starts_on_first_subscribe() {
        let transport = Arc::new(FakeTransport::new(Reply::Body(vec![raw("Red Shirt", "Apparel")])));
        let feed = feed(transport.clone()).await;

        assert!(feed.current().is_loading());
        assert_eq!(transport.list_calls.load(Ordering::SeqCst), 0);

        let mut receiver = feed.subscribe();
        let state = terminal(&mut receiver).await;

        assert_eq!(state.data().map(Vec::len), Some(1));
        assert_eq!(transport.list_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_late_subscriber_sees_latest_state() {
        let transport = Arc::new(FakeTransport::new(Reply::Status(503)));
        let feed = feed(transport.clone()).await;

        let mut first = feed.subscribe();
        terminal(&mut first).await;

        let second = feed.subscribe();
        assert_eq!(*second.borrow(), SyncResult::error("Server error", None));
        assert_eq!(transport.list_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_refresh_runs_a_new_fetch() {
        let transport = Arc::new(FakeTransport::new(Reply::Network));
        let feed = feed(transport.clone()).await;

        let mut receiver = feed.subscribe();
        assert_eq!(
            terminal(&mut receiver).await.error_message(),
            Some("Network error")
        );

        transport.set_list(Reply::Body(vec![raw("Blue Mug", "Kitchen")]));
        feed.refresh();

        let state = receiver
            .wait_for(|state| matches!(state, SyncResult::Success { .. }))
            .await
            .unwrap()
            .clone();
        assert_eq!(state.data().unwrap()[0].product_name, "Blue Mug");
        assert_eq!(transport.list_calls.load(Ordering::SeqCst), 2);
    }

    /// First call never completes; later calls succeed.
    struct StuckOnce {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CatalogTransport for StuckOnce {
        async fn get_products(&self) -> TransportResult<TransportResponse<Vec<RawProduct>>> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                pending::<()>().await;
            }
            Ok(TransportResponse::ok(vec![raw("Green Pen", "Stationery")]))
        }

        async fn add_product(
            &self,
            _submission: ProductSubmission,
        ) -> TransportResult<TransportResponse<AddProductResponse>> {
            Err(TransportError::Other("unused".into()))
        }
    }

    #[tokio::test]
    async fn test_refresh_replaces_stuck_fetch() {
        let transport = Arc::new(StuckOnce {
            calls: AtomicUsize::new(0),
        });
        let feed = feed(transport.clone()).await;

        let mut receiver = feed.subscribe();
        while transport.calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }

        feed.refresh();
        let state = terminal(&mut receiver).await;

        assert_eq!(state.data().unwrap()[0].product_name, "Green Pen");
        assert_eq!(transport.calls.load(Ordering::SeqCst), 2);
    }

    // =========================================================================
    // SearchQuery
    // =========================================================================

    #[tokio::test]
    async fn test_search_query_updates() {
        let query = SearchQuery::new();
        let mut receiver = query.subscribe();
        assert_eq!(query.current(), "");

        query.update("mug");
        assert!(receiver.has_changed().unwrap());
        assert_eq!(*receiver.borrow_and_update(), "mug");

        query.perform_search();
        assert!(receiver.has_changed().unwrap());
        assert_eq!(*receiver.borrow_and_update(), "mug");
    }

    // =========================================================================
    // SearchProjector
    // =========================================================================

    #[tokio::test]
    async fn test_projector_current() {
        let (catalog_tx, catalog_rx) = watch::channel(SyncResult::Loading);
        let query = SearchQuery::new();
        let mut projector = SearchProjector::new(catalog_rx, query.subscribe());

        assert!(projector.current().is_loading());

        catalog_tx.send_replace(SyncResult::success(shirt_and_mug()));
        query.update("MUG");

        let view = projector.current();
        assert_eq!(view.data().unwrap().len(), 1);
        assert_eq!(view.data().unwrap()[0].product_name, "Blue Mug");
    }

    #[tokio::test]
    async fn test_projector_recomputes_on_either_input() {
        let (catalog_tx, catalog_rx) = watch::channel(SyncResult::Loading);
        let query = SearchQuery::new();
        let mut projector = SearchProjector::new(catalog_rx, query.subscribe());
        projector.current();

        query.update("shirt");
        assert!(projector.next().await.unwrap().is_loading());

        catalog_tx.send_replace(SyncResult::error("Network error", Some(shirt_and_mug())));
        let view = projector.next().await.unwrap();
        assert_eq!(
            view,
            SyncResult::error("Network error", Some(vec![Product::new("Red Shirt", "Apparel")]))
        );

        query.update("  ");
        let view = projector.next().await.unwrap();
        assert_eq!(view.data().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_projector_ends_when_inputs_close() {
        let (catalog_tx, catalog_rx) = watch::channel(SyncResult::Loading);
        let query = SearchQuery::new();
        let mut projector = SearchProjector::new(catalog_rx, query.subscribe());
        projector.current();

        drop(catalog_tx);
        drop(query);

        assert!(projector.next().await.is_none());
    }

    #[tokio::test]
    async fn test_projector_stream_over_feed() {
        let transport = Arc::new(FakeTransport::new(Reply::Body(vec![
            raw("Red Shirt", "Apparel"),
            raw("Blue Mug", "Kitchen"),
        ])));
        let feed = feed(transport).await;
        let query = SearchQuery::new();
        query.update("kitchen");

        let stream = SearchProjector::new(feed.subscribe(), query.subscribe()).into_stream();
        futures_util::pin_mut!(stream);

        let mut view = stream.next().await.unwrap();
        while view.is_loading() {
            view = stream.next().await.unwrap();
        }

        let data = view.data().unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data[0].product_name, "Blue Mug");
    }
}
