//! # Product Commands
//!
//! Catalog browsing.
//!
//! ## Filter Flow
//! ```text
//! storefront products list --search shoe --category Sports --sort price-low
//!      │
//!      ▼
//! validate_search_query / validate_category
//!      │
//!      ▼
//! ProductFilter { search, category, sort }
//!      │
//!      ▼
//! CatalogSource::list_products ──► Vec<ProductView>
//! ```

use std::fmt::Write as _;

use bazaar_core::validation::{validate_category, validate_search_query};
use bazaar_core::{catalog::ALL_CATEGORIES, Money, Product, ProductFilter, ProductSort};
use serde::Serialize;
use tracing::debug;

use super::Render;
use crate::config::StoreSettings;
use crate::error::{AppError, AppResult};
use crate::state::AppContext;

/// Product as shown to shoppers.
#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: Money,
    pub price_display: String,
    pub image: String,
    pub category: String,
    pub stock: u32,
    pub in_stock: bool,
}

impl ProductView {
    pub fn new(product: &Product, store: &StoreSettings) -> Self {
        ProductView {
            id: product.id.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            price_display: store.format_price(product.price),
            image: product.primary_image(&store.placeholder_image).to_string(),
            category: product.category.clone(),
            stock: product.stock,
            in_stock: product.in_stock(),
        }
    }
}

impl Render for ProductView {
    fn render(&self, _store: &StoreSettings) -> String {
        let stock = if self.in_stock {
            format!("{} in stock", self.stock)
        } else {
            "out of stock".to_string()
        };

        let mut out = String::new();
        let _ = writeln!(out, "{}  [{}]", self.name, self.id);
        let _ = writeln!(out, "  {}  ·  {}  ·  {}", self.price_display, self.category, stock);
        if !self.description.is_empty() {
            let _ = writeln!(out, "  {}", self.description);
        }
        let _ = write!(out, "  image: {}", self.image);
        out
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductList {
    pub count: usize,
    pub filter: ProductFilter,
    pub products: Vec<ProductView>,
}

impl Render for ProductList {
    fn render(&self, _store: &StoreSettings) -> String {
        if self.products.is_empty() {
            return "No products found.".to_string();
        }

        let mut out = String::new();
        for p in &self.products {
            let _ = writeln!(
                out,
                "{:<6} {:<32} {:>14}  {}",
                p.id, p.name, p.price_display, p.category
            );
        }
        let _ = write!(out, "{} product(s)", self.count);
        out
    }
}

/// Lists products matching the given criteria.
pub async fn list_products(
    ctx: &AppContext,
    search: Option<String>,
    category: Option<String>,
    sort: ProductSort,
) -> AppResult<ProductList> {
    debug!(?search, ?category, %sort, "products list");

    let mut filter = ProductFilter::default().sort(sort);

    if let Some(term) = search {
        let term = validate_search_query(&term)?;
        if !term.is_empty() {
            filter = filter.search(term);
        }
    }

    if let Some(category) = category {
        if category != ALL_CATEGORIES {
            validate_category(&category)?;
        }
        filter = filter.category(category);
    }

    let products = ctx.catalog.list_products(&filter).await?;
    let views: Vec<ProductView> = products
        .iter()
        .map(|p| ProductView::new(p, &ctx.config.store))
        .collect();

    Ok(ProductList {
        count: views.len(),
        filter,
        products: views,
    })
}

/// Shows a single product.
pub async fn show_product(ctx: &AppContext, id: &str) -> AppResult<ProductView> {
    debug!(id = %id, "products show");

    let product = ctx
        .catalog
        .get_product(id)
        .await?
        .ok_or_else(|| AppError::not_found("Product", id))?;

    Ok(ProductView::new(&product, &ctx.config.store))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::context;
    use crate::error::ErrorCode;

    #[tokio::test]
    async fn test_list_sorted_by_price() {
        let ctx = context().await;
        let list = list_products(&ctx, None, None, ProductSort::PriceHigh)
            .await
            .unwrap();

        assert_eq!(list.count, 6);
        assert_eq!(list.products[0].name, "Smart Fitness Watch");
        assert_eq!(list.products[0].price_display, "₹3,999.00");
    }

    #[tokio::test]
    async fn test_list_filters_by_search_and_category() {
        let ctx = context().await;

        let list = list_products(&ctx, Some("WIRELESS".into()), None, ProductSort::Name)
            .await
            .unwrap();
        assert_eq!(list.count, 2);

        let list = list_products(&ctx, None, Some("Fashion".into()), ProductSort::Name)
            .await
            .unwrap();
        assert!(list.products.iter().all(|p| p.category == "Fashion"));
        assert_eq!(list.count, 2);

        let list = list_products(&ctx, None, Some("All".into()), ProductSort::Name)
            .await
            .unwrap();
        assert_eq!(list.count, 6);
    }

    #[tokio::test]
    async fn test_unknown_category_is_rejected() {
        let ctx = context().await;
        let err = list_products(&ctx, None, Some("Groceries".into()), ProductSort::Name)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_show_product() {
        let ctx = context().await;

        let view = show_product(&ctx, "3").await.unwrap();
        assert_eq!(view.name, "Organic Cotton T-Shirt");
        assert_eq!(view.image, "/placeholder-product.jpg");
        assert!(view.render(&ctx.config.store).contains("₹899.00"));

        let err = show_product(&ctx, "404").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
