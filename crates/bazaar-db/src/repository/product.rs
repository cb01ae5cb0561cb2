//! # Product Repository
//!
//! Database operations for the storefront catalog.
//!
//! ## Filtering
//! The catalog is small (tens to hundreds of rows), so `list` loads every
//! row and hands it to [`ProductFilter::apply`]. Filter and sort semantics
//! then match the in-memory [`bazaar_core::StaticCatalog`] exactly.
//!
//! ## Column Mapping
//! ```text
//! ┌──────────────────┬───────────────────────┬──────────────────────────┐
//! │ Column           │ SQLite type           │ Product field            │
//! ├──────────────────┼───────────────────────┼──────────────────────────┤
//! │ price_minor      │ INTEGER               │ price: Money             │
//! │ images           │ TEXT (JSON array)     │ images: Vec<String>      │
//! │ stock            │ INTEGER (>= 0)        │ stock: u32               │
//! │ created_at       │ TEXT (RFC 3339)       │ created_at: DateTime     │
//! └──────────────────┴───────────────────────┴──────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use bazaar_core::{Money, Product, ProductFilter};

const SELECT_PRODUCTS: &str = r#"
    SELECT
        id,
        name,
        description,
        price_minor,
        images,
        category,
        stock,
        created_at,
        updated_at
    FROM products
"#;

/// Raw `products` row before JSON/range conversion.
#[derive(Debug, FromRow)]
struct ProductRow {
    id: String,
    name: String,
    description: String,
    price_minor: Money,
    images: String,
    category: String,
    stock: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = DbError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let images: Vec<String> = serde_json::from_str(&row.images)?;
        let stock = u32::try_from(row.stock).map_err(|_| {
            DbError::Serialization(format!("product {} has invalid stock {}", row.id, row.stock))
        })?;

        Ok(Product {
            id: row.id,
            name: row.name,
            description: row.description,
            price: row.price_minor,
            images,
            category: row.category,
            stock,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let shoes = repo.list(&ProductFilter::default().search("shoe")).await?;
/// let product = repo.get_by_id("3").await?;
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

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Product>> {
        let row: Option<ProductRow> = sqlx::query_as(&format!("{SELECT_PRODUCTS} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Product::try_from).transpose()
    }

    /// Lists products matching `filter`, in the filter's sort order.
    pub async fn list(&self, filter: &ProductFilter) -> DbResult<Vec<Product>> {
        let products = self.list_all().await?;
        let matched = filter.apply(products);

        debug!(count = matched.len(), "Product list filtered");
        Ok(matched)
    }

    /// Lists every product in insertion order (by id).
    pub async fn list_all(&self) -> DbResult<Vec<Product>> {
        let rows: Vec<ProductRow> = sqlx::query_as(&format!("{SELECT_PRODUCTS} ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Product::try_from).collect()
    }

    /// Inserts a product, or replaces the stored one with the same id.
    ///
    /// `created_at` is kept from the first insert; `updated_at` is set to now.
    pub async fn upsert(&self, product: &Product) -> DbResult<()> {
        debug!(id = %product.id, "Upserting product");

        let images = serde_json::to_string(&product.images)?;
        let now = Utc::now();

        sqlx::query(
            r#"
            INSERT INTO products (
                id, name, description, price_minor, images,
                category, stock, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                description = excluded.description,
                price_minor = excluded.price_minor,
                images = excluded.images,
                category = excluded.category,
                stock = excluded.stock,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price)
        .bind(images)
        .bind(&product.category)
        .bind(i64::from(product.stock))
        .bind(product.created_at)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Deletes a product.
    ///
    /// ## Returns
    /// `true` if a row was removed, `false` if the id was unknown.
    ///
    /// Carts holding this product keep their embedded copy; deletion never
    /// reaches into snapshots.
    pub async fn delete(&self, id: &str) -> DbResult<bool> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Counts products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Inserts `products` that aren't stored yet, in one transaction.
    ///
    /// Existing rows are left untouched, so re-seeding never clobbers admin
    /// edits. Returns the number of rows actually inserted.
    pub async fn seed(&self, products: &[Product]) -> DbResult<usize> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0usize;

        for product in products {
            let images = serde_json::to_string(&product.images)?;

            let result = sqlx::query(
                r#"
                INSERT OR IGNORE INTO products (
                    id, name, description, price_minor, images,
                    category, stock, created_at, updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                "#,
            )
            .bind(&product.id)
            .bind(&product.name)
            .bind(&product.description)
            .bind(product.price)
            .bind(images)
            .bind(&product.category)
            .bind(i64::from(product.stock))
            .bind(product.created_at)
            .bind(product.updated_at)
            .execute(&mut *tx)
            .await?;

            inserted += result.rows_affected() as usize;
        }

        tx.commit().await?;

        info!(inserted, offered = products.len(), "Catalog seeded");
        Ok(inserted)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
