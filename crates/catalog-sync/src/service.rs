//! # Product Sync Service
//!
//! Network first, cache as last-known-good.
//!
//! ## Fetch State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        fetch_products()                                 │
//! │                                                                         │
//! │  subscribe ──► Loading                                                 │
//! │                   │                                                     │
//! │                   ▼                                                     │
//! │           transport.get_products()                                     │
//! │                   │                                                     │
//! │     ┌─────────────┼──────────────────┬──────────────────┐              │
//! │     ▼             ▼                  ▼                  ▼              │
//! │  2xx + body    2xx, no body     failure status     transport error     │
//! │     │             │                  │                  │              │
//! │     ▼             │                  │                  │              │
//! │  map + cache      │                  │                  │              │
//! │  replace_all      │                  │                  │              │
//! │   │       │       │                  │                  │              │
//! │   ok     err      │                  │                  │              │
//! │   │       │       ▼                  ▼                  ▼              │
//! │   │   Unknown  EmptyBody           Server       Network / EmptyBody    │
//! │   │       └───────┴─────────┬────────┴──────────────────┘   / Unknown  │
//! │   ▼                         ▼                                          │
//! │  Success(products)   Error(message, cache.get_all() or None)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! One network attempt per subscription, no retries. Dropping the stream
//! abandons the call; an unfinished cache transaction rolls back.

use async_stream::stream;
use catalog_core::error::{submission_message, submission_rejected};
use catalog_core::{AddProductResponse, FailureKind, Product, RawProduct, SyncResult};
use futures_util::Stream;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::cache::ProductCache;
use crate::files::{FileProvider, ImageRef};
use crate::protocol::ProductSubmission;
use crate::transport::CatalogTransport;

/// The catalog as best known.
pub type CatalogState = SyncResult<Vec<Product>>;

/// Orchestrates the transport, the cache and the file provider.
///
/// Cheap to clone; clones share the same collaborators.
#[derive(Clone)]
pub struct ProductSyncService {
    transport: Arc<dyn CatalogTransport>,
    cache: Arc<dyn ProductCache>,
    files: Arc<dyn FileProvider>,
}

impl ProductSyncService {
    pub fn new(
        transport: Arc<dyn CatalogTransport>,
        cache: Arc<dyn ProductCache>,
        files: Arc<dyn FileProvider>,
    ) -> Self {
        ProductSyncService {
            transport,
            cache,
            files,
        }
    }

    /// Fetches the catalog once: `Loading`, then one terminal state.
    ///
    /// Nothing runs until the stream is polled.
    pub fn fetch_products(&self) -> impl Stream<Item = CatalogState> + Send + 'static {
        let transport = Arc::clone(&self.transport);
        let cache = Arc::clone(&self.cache);

        stream! {
            yield SyncResult::Loading;
            yield fetch_once(transport.as_ref(), cache.as_ref()).await;
        }
    }

    /// Submits a product once and yields a single terminal state.
    ///
    /// The cache is not touched; a later fetch picks the product up.
    pub fn add_product(
        &self,
        product: Product,
        image: Option<ImageRef>,
    ) -> impl Stream<Item = SyncResult<AddProductResponse>> + Send + 'static {
        let transport = Arc::clone(&self.transport);
        let files = Arc::clone(&self.files);

        stream! {
            yield submit_once(transport.as_ref(), files.as_ref(), product, image).await;
        }
    }
}

async fn fetch_once(transport: &dyn CatalogTransport, cache: &dyn ProductCache) -> CatalogState {
    info!("Fetching product catalog");

    let failure = match transport.get_products().await {
        Ok(response) if !response.is_success() => {
            warn!(status = response.status, "Catalog fetch rejected by server");
            FailureKind::Server
        }
        Ok(response) => match response.body {
            Some(raw) => {
                let products: Vec<Product> =
                    raw.into_iter().map(RawProduct::into_product).collect();

                match cache.replace_all(&products).await {
                    Ok(()) => {
                        info!(count = products.len(), "Catalog refreshed from server");
                        return SyncResult::success(products);
                    }
                    Err(e) => {
                        warn!(error = %e, "Failed to replace cached catalog");
                        FailureKind::Unknown
                    }
                }
            }
            None => {
                warn!(status = response.status, "Catalog response had no body");
                FailureKind::EmptyBody
            }
        },
        Err(e) => {
            warn!(error = %e, "Catalog fetch failed");
            e.failure_kind()
        }
    };

    let cached = cached_products(cache).await;
    info!(
        message = failure.message(),
        cached = cached.as_ref().map_or(0, Vec::len),
        "Falling back to cached catalog"
    );

    SyncResult::error(failure.message(), cached)
}

/// Best-effort cache read: errors and an empty cache both yield `None`.
async fn cached_products(cache: &dyn ProductCache) -> Option<Vec<Product>> {
    match cache.get_all().await {
        Ok(products) if !products.is_empty() => Some(products),
        Ok(_) => None,
        Err(e) => {
            warn!(error = %e, "Cached catalog unreadable");
            None
        }
    }
}

async fn submit_once(
    transport: &dyn CatalogTransport,
    files: &dyn FileProvider,
    product: Product,
    image: Option<ImageRef>,
) -> SyncResult<AddProductResponse> {
    let file = match &image {
        Some(image) => files.materialize(image).await,
        None => None,
    };
    debug!(with_image = file.is_some(), "Prepared product submission");

    let submission = ProductSubmission::new(&product, file);

    match transport.add_product(submission).await {
        Ok(response) if response.is_success() => match response.body {
            Some(body) => {
                info!(
                    product_id = body.product_id,
                    message = %body.message,
                    "Product submitted"
                );
                SyncResult::success(body)
            }
            None => {
                warn!("Add-product response had no body");
                SyncResult::error(submission_rejected(), None)
            }
        },
        Ok(response) => {
            warn!(status = response.status, "Add-product rejected by server");
            SyncResult::error(submission_rejected(), None)
        }
        Err(e) => {
            warn!(error = %e, "Add-product call failed");
            SyncResult::error(submission_message(Some(&e.to_string())), None)
        }
    }
}
