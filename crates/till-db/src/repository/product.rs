//! # Product Repository
//!
//! Database operations for the catalog.
//!
//! ## Key Operations
//! - Catalog listing for the product grid
//! - Lookup by id
//! - Inserts (seed tool, tests)
//!
//! Stock is never changed here: the order transaction is the only writer
//! of `stock_quantity` (see [`crate::repository::order`]).

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use till_core::validation::{validate_price_cents, validate_product_name};
use till_core::{NewProduct, Product};

/// Column list shared by every product SELECT.
pub(crate) const PRODUCT_COLUMNS: &str =
    "id, name, price_cents, cost_cents, stock_quantity, created_at, updated_at";

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let catalog = repo.list_by_name().await?;
/// let product = repo.get_by_id(3).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists the whole catalog, sorted by name (ties by id).
    ///
    /// ## User Workflow
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  Cashier logs in                                                    │
    /// │       │                                                             │
    /// │       ▼                                                             │
    /// │  GET /api/products ──► list_by_name() ← THIS FUNCTION              │
    /// │       │                                                             │
    /// │       ▼                                                             │
    /// │  Product grid: Bagel, Cappuccino, Chocolate, Croissant, ...        │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    pub async fn list_by_name(&self) -> DbResult<Vec<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products ORDER BY name ASC, id ASC");

        let products = sqlx::query_as::<_, Product>(&sql)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = products.len(), "Listed catalog");
        Ok(products)
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1");

        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Inserts a new product and returns it with its generated id.
    pub async fn insert(&self, product: &NewProduct) -> DbResult<Product> {
        validate_product_name(&product.name).map_err(till_core::CoreError::from)?;
        validate_price_cents(product.price_cents).map_err(till_core::CoreError::from)?;
        validate_price_cents(product.cost_cents).map_err(till_core::CoreError::from)?;

        debug!(name = %product.name, "Inserting product");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO products (
                name, price_cents, cost_cents, stock_quantity, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?5)
            "#,
        )
        .bind(product.name.trim())
        .bind(product.price_cents)
        .bind(product.cost_cents)
        .bind(product.stock_quantity)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Changes the catalog price and cost of a product.
    ///
    /// Recorded sales keep the values they were sold at.
    pub async fn set_price(&self, id: i64, price_cents: i64, cost_cents: i64) -> DbResult<()> {
        validate_price_cents(price_cents).map_err(till_core::CoreError::from)?;
        validate_price_cents(cost_cents).map_err(till_core::CoreError::from)?;

        debug!(id = %id, price_cents, cost_cents, "Updating price");

        let result = sqlx::query(
            r#"
            UPDATE products
            SET price_cents = ?2, cost_cents = ?3, updated_at = ?4
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(price_cents)
        .bind(cost_cents)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts catalog products (seed tool, diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};

    fn new_product(name: &str, price_cents: i64, stock: i64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            price_cents,
            cost_cents: price_cents / 3,
            stock_quantity: stock,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        let inserted = repo.insert(&new_product("Espresso", 250, 40)).await.unwrap();
        assert!(inserted.id > 0);

        let fetched = repo.get_by_id(inserted.id).await.unwrap().unwrap();
        assert_eq!(fetched, inserted);
        assert_eq!(fetched.price_cents, 250);
        assert_eq!(fetched.stock_quantity, 40);

        assert!(repo.get_by_id(9999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_sorted_by_name() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();

        for name in ["Muffin", "Bagel", "Croissant", "Bagel"] {
            repo.insert(&new_product(name, 300, 5)).await.unwrap();
        }

        let names: Vec<String> = repo
            .list_by_name()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Bagel", "Bagel", "Croissant", "Muffin"]);

        let listed = repo.list_by_name().await.unwrap();
        assert!(listed[0].id < listed[1].id);
        assert_eq!(repo.count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_empty_catalog() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db.products().list_by_name().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_rejects_invalid_product() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let err = db.products().insert(&new_product(" ", 300, 1)).await.unwrap_err();
        assert!(matches!(err, DbError::Rejected(_)));

        let err = db.products().insert(&new_product("Salad", -1, 1)).await.unwrap_err();
        assert!(matches!(err, DbError::Rejected(_)));

        let err = db
            .products()
            .insert(&new_product("Gold Bar", i64::MAX / 2, 10))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Rejected(_)));
        assert_eq!(db.products().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_set_price() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.products();
        let p = repo.insert(&new_product("Sandwich", 650, 10)).await.unwrap();

        repo.set_price(p.id, 700, 300).await.unwrap();
        let updated = repo.get_by_id(p.id).await.unwrap().unwrap();
        assert_eq!(updated.price_cents, 700);
        assert_eq!(updated.cost_cents, 300);

        assert!(matches!(
            repo.set_price(4242, 1, 1).await,
            Err(DbError::NotFound { .. })
        ));
    }
}
