//! # Admin Commands
//!
//! Direct management of the `products` table. These always operate on the
//! database, never on the built-in launch catalog.

use bazaar_core::catalog::mock_products;
use bazaar_core::validation::validate_product;
use bazaar_core::{Product, ProductFilter};
use serde::Serialize;
use tracing::{debug, info};

use super::product::{ProductList, ProductView};
use super::Render;
use crate::cli::UpsertArgs;
use crate::config::StoreSettings;
use crate::error::{AppError, AppResult};
use crate::state::AppContext;

#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub id: String,
    pub deleted: bool,
}

impl Render for DeleteResponse {
    fn render(&self, _store: &StoreSettings) -> String {
        format!("Deleted product {}.", self.id)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SeedResponse {
    pub inserted: usize,
    pub total: i64,
}

impl Render for SeedResponse {
    fn render(&self, _store: &StoreSettings) -> String {
        format!(
            "Inserted {} product(s); catalog now has {}.",
            self.inserted, self.total
        )
    }
}

/// Lists every stored product in id order.
pub async fn list_all(ctx: &AppContext) -> AppResult<ProductList> {
    debug!("admin list");

    let products = ctx.db.products().list_all().await?;
    let views: Vec<ProductView> = products
        .iter()
        .map(|p| ProductView::new(p, &ctx.config.store))
        .collect();

    Ok(ProductList {
        count: views.len(),
        filter: ProductFilter::default(),
        products: views,
    })
}

/// Deletes a product. Carts that already hold it keep their copy.
pub async fn delete_product(ctx: &AppContext, id: &str) -> AppResult<DeleteResponse> {
    debug!(id = %id, "admin delete");

    if !ctx.db.products().delete(id).await? {
        return Err(AppError::not_found("Product", id));
    }

    info!(id = %id, "Product deleted");
    Ok(DeleteResponse {
        id: id.to_string(),
        deleted: true,
    })
}

/// Inserts the launch catalog, keeping rows that already exist.
pub async fn seed_catalog(ctx: &AppContext) -> AppResult<SeedResponse> {
    debug!("admin seed");

    let repo = ctx.db.products();
    let inserted = repo.seed(&mock_products()).await?;
    let total = repo.count().await?;

    Ok(SeedResponse { inserted, total })
}

/// Validates and stores a product.
pub async fn upsert_product(ctx: &AppContext, args: UpsertArgs) -> AppResult<ProductView> {
    debug!(id = %args.id, "admin upsert");

    let product = Product::new(args.id.trim(), args.name.trim(), args.price)
        .with_description(args.description)
        .with_category(args.category)
        .with_stock(args.stock)
        .with_images(args.images);

    validate_product(&product)?;

    let repo = ctx.db.products();
    repo.upsert(&product).await?;

    let stored = repo
        .get_by_id(&product.id)
        .await?
        .ok_or_else(|| AppError::internal("Product vanished after upsert"))?;

    info!(id = %stored.id, price = %stored.price, "Product saved");
    Ok(ProductView::new(&stored, &ctx.config.store))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::context;
    use crate::error::ErrorCode;
    use bazaar_core::Money;

    fn lamp() -> UpsertArgs {
        UpsertArgs {
            id: "lamp".into(),
            name: "Desk Lamp".into(),
            price: Money::from_major(1299),
            category: "Home & Living".into(),
            description: "Warm light".into(),
            stock: 3,
            images: vec![],
        }
    }

    #[tokio::test]
    async fn test_seed_then_list() {
        let ctx = context().await;

        let first = seed_catalog(&ctx).await.unwrap();
        assert_eq!(first.inserted, 6);
        let again = seed_catalog(&ctx).await.unwrap();
        assert_eq!(again.inserted, 0);
        assert_eq!(again.total, 6);

        let list = list_all(&ctx).await.unwrap();
        assert_eq!(list.count, 6);
        assert_eq!(list.products[0].id, "1");
    }

    #[tokio::test]
    async fn test_delete() {
        let ctx = context().await;
        seed_catalog(&ctx).await.unwrap();

        assert!(delete_product(&ctx, "4").await.unwrap().deleted);
        let err = delete_product(&ctx, "4").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_upsert_validates() {
        let ctx = context().await;

        let view = upsert_product(&ctx, lamp()).await.unwrap();
        assert_eq!(view.price_display, "₹1,299.00");
        assert_eq!(view.image, "/placeholder-product.jpg");

        let mut bad = lamp();
        bad.category = "Groceries".into();
        let err = upsert_product(&ctx, bad).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }
}
