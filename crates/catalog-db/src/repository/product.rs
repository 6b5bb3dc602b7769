//! # Product Cache Repository
//!
//! The last successfully fetched catalog, persisted locally.
//!
//! ## Wholesale Replace
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    replace_all(products)                                │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    DELETE FROM products                                                 │
//! │    INSERT product[0]   → id 1                                           │
//! │    INSERT product[1]   → id 2                                           │
//! │    ...                                                                  │
//! │  COMMIT                                                                 │
//! │                                                                         │
//! │  A concurrent get_all() sees either the previous catalog or the new    │
//! │  one. Any failure before COMMIT rolls the whole unit back.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rows are never merged or updated in place.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use catalog_core::Product;

/// A row of the `products` table.
#[derive(Debug, Clone, FromRow)]
struct ProductRow {
    id: i64,
    image: String,
    price: f64,
    product_name: String,
    product_type: String,
    tax: f64,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            image: row.image,
            price: Some(row.price),
            product_name: row.product_name,
            product_type: row.product_type,
            tax: Some(row.tax),
        }
    }
}

/// Repository for the cached catalog.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductCacheRepository::new(pool);
///
/// repo.replace_all(&fresh).await?;
/// let cached = repo.get_all().await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductCacheRepository {
    pool: SqlitePool,
}

impl ProductCacheRepository {
    /// Creates a new ProductCacheRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductCacheRepository { pool }
    }

    /// Returns every cached product in insertion order.
    ///
    /// An empty cache yields an empty vector, not an error.
    pub async fn get_all(&self) -> DbResult<Vec<Product>> {
        let rows: Vec<ProductRow> = sqlx::query_as(
            r#"
            SELECT id, image, price, product_name, product_type, tax
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "Read cached products");

        Ok(rows.into_iter().map(Product::from).collect())
    }

    /// Clears the cache and stores `products` in one transaction.
    ///
    /// Absent prices and taxes are stored as `0.0`. Incoming ids are
    /// ignored; rows are numbered from 1 in the order given.
    ///
    /// Returns the number of rows written.
    pub async fn replace_all(&self, products: &[Product]) -> DbResult<usize> {
        let cached_at = Utc::now();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        sqlx::query("DELETE FROM products")
            .execute(&mut *tx)
            .await?;

        for product in products {
            sqlx::query(
                r#"
                INSERT INTO products (image, price, product_name, product_type, tax, cached_at)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&product.image)
            .bind(product.price.unwrap_or(0.0))
            .bind(&product.product_name)
            .bind(&product.product_type)
            .bind(product.tax.unwrap_or(0.0))
            .bind(cached_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        debug!(count = products.len(), "Replaced cached catalog");

        Ok(products.len())
    }

    /// Counts cached products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// When the cache was last replaced, or `None` if it is empty.
    pub async fn last_refreshed(&self) -> DbResult<Option<DateTime<Utc>>> {
        let cached_at: Option<DateTime<Utc>> = sqlx::query_scalar(
            "SELECT cached_at FROM products ORDER BY cached_at DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(cached_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn repo() -> ProductCacheRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().products()
    }

    fn catalog() -> Vec<Product> {
        vec![
            Product::new("Red Shirt", "Apparel")
                .with_price(10.0)
                .with_tax(5.0)
                .with_image("https://img.example/shirt.png"),
            Product::new("Blue Mug", "Kitchen")
                .with_price(4.5)
                .with_tax(12.0),
        ]
    }

    #[tokio::test]
    async fn test_empty_cache() {
        let repo = repo().await;

        assert!(repo.get_all().await.unwrap().is_empty());
        assert_eq!(repo.count().await.unwrap(), 0);
        assert!(repo.last_refreshed().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_replace_all_preserves_order() {
        let repo = repo().await;

        let written = repo.replace_all(&catalog()).await.unwrap();
        assert_eq!(written, 2);

        let cached = repo.get_all().await.unwrap();
        assert_eq!(cached.len(), 2);
        assert_eq!(cached[0].id, 1);
        assert_eq!(cached[0].product_name, "Red Shirt");
        assert_eq!(cached[0].image, "https://img.example/shirt.png");
        assert_eq!(cached[0].price, Some(10.0));
        assert_eq!(cached[1].id, 2);
        assert_eq!(cached[1].product_name, "Blue Mug");
        assert_eq!(cached[1].tax, Some(12.0));
        assert!(repo.last_refreshed().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_replace_all_leaves_no_old_rows() {
        let repo = repo().await;
        repo.replace_all(&catalog()).await.unwrap();

        let fresh = vec![Product::new("Green Pen", "Stationery").with_price(1.0)];
        repo.replace_all(&fresh).await.unwrap();

        let cached = repo.get_all().await.unwrap();
        assert_eq!(cached.len(), 1);
        assert_eq!(cached[0].id, 1);
        assert_eq!(cached[0].product_name, "Green Pen");
    }

    #[tokio::test]
    async fn test_replace_all_is_idempotent() {
        let repo = repo().await;

        repo.replace_all(&catalog()).await.unwrap();
        let first = repo.get_all().await.unwrap();

        repo.replace_all(&catalog()).await.unwrap();
        let second = repo.get_all().await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_missing_amounts_stored_as_zero() {
        let repo = repo().await;
        repo.replace_all(&[Product::new("Loose Tea", "Grocery")])
            .await
            .unwrap();

        let cached = repo.get_all().await.unwrap();
        assert_eq!(cached[0].price, Some(0.0));
        assert_eq!(cached[0].tax, Some(0.0));
    }

    #[tokio::test]
    async fn test_replace_with_empty_list_clears_cache() {
        let repo = repo().await;
        repo.replace_all(&catalog()).await.unwrap();

        repo.replace_all(&[]).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
