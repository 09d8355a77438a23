//! # Order Repository
//!
//! The order transaction: the only code that writes orders, order items and
//! stock levels.
//!
//! ## Transaction Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  create_order (one sqlx Transaction)                    │
//! │                                                                         │
//! │  request.validate()           ← before BEGIN, 400 on failure           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN                                                                 │
//! │  INSERT orders (total, created_at, business_date)   ← takes write lock │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  for each line, in order:                                              │
//! │    SELECT product ──── missing? ──► warn!, skip, remember id           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │    INSERT order_items (qty, price/cost snapshot)                       │
//! │    UPDATE products SET stock = stock - qty                             │
//! │           [Enforce: AND stock >= qty, 0 rows ► InsufficientStock]      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  reconcile declared total vs Σ qty × price_at_sale                     │
//! │       │        [Trust: warn!]  [Verify: TotalMismatch]                 │
//! │       ▼                                                                 │
//! │  COMMIT ──► OrderReceipt                                               │
//! │                                                                         │
//! │  Any error on the way: ROLLBACK, nothing written survives.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! The first statement is a write, so the transaction holds SQLite's write
//! lock from its start to COMMIT; concurrent orders queue on the busy
//! timeout. Stock updates are relative, so no decrement is ever lost.

use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use crate::repository::product::PRODUCT_COLUMNS;
use till_core::order::{reconcile_total, TotalCheck};
use till_core::{
    CoreError, Money, Order, OrderItem, OrderPolicy, OrderReceipt, OrderRequest, OrderStamp,
    Product, StockPolicy,
};

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Records an order and decrements stock, all or nothing.
    ///
    /// ## Arguments
    /// * `request` - lines and the client-declared total
    /// * `stamp` - placement instant and business date
    /// * `policy` - stock floor and total reconciliation rules
    ///
    /// ## Returns
    /// * `Ok(OrderReceipt)` - committed; carries skipped product ids
    /// * `Err(DbError::Rejected(_))` - validation or business rule, rolled back
    /// * `Err(DbError::TransactionFailed(_))` - storage fault, rolled back
    pub async fn create_order(
        &self,
        request: &OrderRequest,
        stamp: OrderStamp,
        policy: OrderPolicy,
    ) -> DbResult<OrderReceipt> {
        request.validate()?;

        debug!(
            lines = request.lines.len(),
            declared_total = %request.declared_total,
            business_date = %stamp.business_date,
            "Creating order"
        );

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::from(e).into_transaction_failure())?;

        match record_order(&mut tx, request, stamp, policy).await {
            Ok(receipt) => {
                tx.commit()
                    .await
                    .map_err(|e| DbError::from(e).into_transaction_failure())?;

                info!(
                    order_id = receipt.order_id,
                    items = receipt.items_recorded,
                    skipped = receipt.skipped_product_ids.len(),
                    "Order committed"
                );
                Ok(receipt)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(error = %rollback_err, "Rollback failed; connection discards the transaction");
                }

                let err = err.into_transaction_failure();
                warn!(error = %err, "Order rolled back");
                Err(err)
            }
        }
    }

    /// Gets an order header by ID.
    pub async fn get_order(&self, id: i64) -> DbResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, total_cents, created_at, business_date
            FROM orders
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    /// Gets all items of an order, in the order they were recorded.
    pub async fn get_items(&self, order_id: i64) -> DbResult<Vec<OrderItem>> {
        let items = sqlx::query_as::<_, OrderItem>(
            r#"
            SELECT id, order_id, product_id, quantity, price_at_sale_cents, cost_at_sale_cents
            FROM order_items
            WHERE order_id = ?1
            ORDER BY id
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Counts recorded orders (diagnostics, tests).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Transaction Body
// =============================================================================

/// Everything between BEGIN and COMMIT. Any `Err` makes the caller roll back.
async fn record_order(
    tx: &mut Transaction<'_, Sqlite>,
    request: &OrderRequest,
    stamp: OrderStamp,
    policy: OrderPolicy,
) -> DbResult<OrderReceipt> {
    let result = sqlx::query(
        r#"
        INSERT INTO orders (total_cents, created_at, business_date)
        VALUES (?1, ?2, ?3)
        "#,
    )
    .bind(request.declared_total.cents())
    .bind(stamp.placed_at)
    .bind(stamp.business_date)
    .execute(&mut **tx)
    .await?;

    let order_id = result.last_insert_rowid();

    let mut skipped_product_ids = Vec::new();
    let mut items_recorded = 0usize;
    let mut computed_total = Money::zero();

    for line in &request.lines {
        let sql = format!("SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?1");
        let product = sqlx::query_as::<_, Product>(&sql)
            .bind(line.product_id)
            .fetch_optional(&mut **tx)
            .await?;

        let Some(product) = product else {
            warn!(
                order_id,
                product_id = line.product_id,
                "Skipping order line for unknown product"
            );
            skipped_product_ids.push(line.product_id);
            continue;
        };

        computed_total = product
            .price()
            .checked_multiply_quantity(line.quantity)
            .and_then(|line_total| computed_total.checked_add(line_total))
            .ok_or(CoreError::AmountOverflow {
                product_id: product.id,
            })?;

        sqlx::query(
            r#"
            INSERT INTO order_items (
                order_id, product_id, quantity, price_at_sale_cents, cost_at_sale_cents
            ) VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(order_id)
        .bind(product.id)
        .bind(line.quantity)
        .bind(product.price_cents)
        .bind(product.cost_cents)
        .execute(&mut **tx)
        .await?;

        decrement_stock(tx, &product, line.quantity, policy.stock).await?;

        items_recorded += 1;
    }

    match reconcile_total(request.declared_total, computed_total, policy.total)? {
        TotalCheck::Matches => {}
        TotalCheck::Tolerated { declared, computed } => {
            warn!(
                order_id,
                declared = %declared,
                computed = %computed,
                "Declared total differs from line items; storing declared total"
            );
        }
    }

    Ok(OrderReceipt {
        order_id,
        items_recorded,
        skipped_product_ids,
        computed_total,
    })
}

/// Relative stock decrement; conditional on the floor under `Enforce`.
async fn decrement_stock(
    tx: &mut Transaction<'_, Sqlite>,
    product: &Product,
    quantity: i64,
    policy: StockPolicy,
) -> DbResult<()> {
    let now = chrono::Utc::now();

    let result = match policy {
        StockPolicy::Enforce => {
            sqlx::query(
                r#"
                UPDATE products
                SET stock_quantity = stock_quantity - ?2, updated_at = ?3
                WHERE id = ?1 AND stock_quantity >= ?2
                "#,
            )
            .bind(product.id)
            .bind(quantity)
            .bind(now)
            .execute(&mut **tx)
            .await?
        }
        StockPolicy::AllowNegative => {
            sqlx::query(
                r#"
                UPDATE products
                SET stock_quantity = stock_quantity - ?2, updated_at = ?3
                WHERE id = ?1
                "#,
            )
            .bind(product.id)
            .bind(quantity)
            .bind(now)
            .execute(&mut **tx)
            .await?
        }
    };

    if result.rows_affected() == 0 {
        let available: i64 = sqlx::query_scalar("SELECT stock_quantity FROM products WHERE id = ?1")
            .bind(product.id)
            .fetch_optional(&mut **tx)
            .await?
            .unwrap_or(0);

        return Err(CoreError::InsufficientStock {
            product_id: product.id,
            name: product.name.clone(),
            available,
            requested: quantity,
        }
        .into());
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
