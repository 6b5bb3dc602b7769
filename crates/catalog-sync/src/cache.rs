//! # Product Cache Seam
//!
//! The service only needs two things from the local store: read everything,
//! and replace everything atomically. `ProductCacheRepository` provides both.

use async_trait::async_trait;
use catalog_core::Product;
use catalog_db::ProductCacheRepository;

use crate::error::CacheResult;

/// Last-known-good catalog storage.
#[async_trait]
pub trait ProductCache: Send + Sync {
    /// Snapshot of every cached product, in insertion order.
    async fn get_all(&self) -> CacheResult<Vec<Product>>;

    /// Clears the cache and stores `products` as one indivisible unit.
    async fn replace_all(&self, products: &[Product]) -> CacheResult<()>;
}

#[async_trait]
impl ProductCache for ProductCacheRepository {
    async fn get_all(&self) -> CacheResult<Vec<Product>> {
        Ok(ProductCacheRepository::get_all(self).await?)
    }

    async fn replace_all(&self, products: &[Product]) -> CacheResult<()> {
        ProductCacheRepository::replace_all(self, products).await?;
        Ok(())
    }
}
