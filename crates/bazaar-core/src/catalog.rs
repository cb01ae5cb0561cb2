//! # Catalog
//!
//! Product filtering and sorting, plus the seed catalog the storefront ships
//! with.
//!
//! ## Filter Pipeline
//! ```text
//! all products
//!      │
//!      ▼
//! search term? ──► keep if name or description contains it (case-insensitive)
//!      │
//!      ▼
//! category?    ──► keep if category matches ("All" keeps everything)
//!      │
//!      ▼
//! sort         ──► name (A→Z) | price-low | price-high
//! ```

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Product;
use crate::DEFAULT_PLACEHOLDER_IMAGE;

/// Category value that disables category filtering.
pub const ALL_CATEGORIES: &str = "All";

/// Categories offered by the storefront, in display order.
pub const CATEGORIES: [&str; 7] = [
    ALL_CATEGORIES,
    "Electronics",
    "Fashion",
    "Sports",
    "Home & Living",
    "Beauty",
    "Books",
];

// =============================================================================
// Sort Order
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductSort {
    /// Alphabetical by name.
    #[default]
    Name,
    /// Cheapest first.
    PriceLow,
    /// Most expensive first.
    PriceHigh,
}

impl fmt::Display for ProductSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductSort::Name => write!(f, "name"),
            ProductSort::PriceLow => write!(f, "price-low"),
            ProductSort::PriceHigh => write!(f, "price-high"),
        }
    }
}

impl FromStr for ProductSort {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" => Ok(ProductSort::Name),
            "price-low" | "price_low" => Ok(ProductSort::PriceLow),
            "price-high" | "price_high" => Ok(ProductSort::PriceHigh),
            _ => Err(ValidationError::NotAllowed {
                field: "sort".to_string(),
                allowed: vec!["name".into(), "price-low".into(), "price-high".into()],
            }),
        }
    }
}

// =============================================================================
// Product Filter
// =============================================================================

/// Criteria for listing products.
///
/// ## Example
/// ```rust
/// use bazaar_core::catalog::{mock_products, ProductFilter, ProductSort};
///
/// let filter = ProductFilter::default()
///     .category("Electronics")
///     .sort(ProductSort::PriceLow);
///
/// let names: Vec<String> = filter
///     .apply(mock_products())
///     .into_iter()
///     .map(|p| p.name)
///     .collect();
///
/// assert_eq!(names[0], "Wireless Bluetooth Speaker");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub sort: ProductSort,
}

impl ProductFilter {
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn sort(mut self, sort: ProductSort) -> Self {
        self.sort = sort;
        self
    }

    /// Checks the search and category criteria against one product.
    pub fn matches(&self, product: &Product) -> bool {
        let search_ok = match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                product.name.to_lowercase().contains(&term)
                    || product.description.to_lowercase().contains(&term)
            }
        };

        let category_ok = match self.category.as_deref() {
            None | Some(ALL_CATEGORIES) | Some("") => true,
            Some(category) => product.category == category,
        };

        search_ok && category_ok
    }

    /// Filters and sorts `products`.
    ///
    /// Sorting is stable, so products that compare equal (e.g. same price)
    /// keep their catalog order.
    pub fn apply(&self, products: impl IntoIterator<Item = Product>) -> Vec<Product> {
        let mut result: Vec<Product> = products.into_iter().filter(|p| self.matches(p)).collect();

        match self.sort {
            ProductSort::Name => {
                result.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            }
            ProductSort::PriceLow => result.sort_by_key(|p| p.price),
            ProductSort::PriceHigh => result.sort_by(|a, b| b.price.cmp(&a.price)),
        }

        result
    }
}

// =============================================================================
// Static Catalog
// =============================================================================

/// In-memory catalog, used when no database is configured and in tests.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Vec<Product>,
}

impl StaticCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        StaticCatalog { products }
    }

    /// Catalog preloaded with [`mock_products`].
    pub fn seeded() -> Self {
        StaticCatalog::new(mock_products())
    }

    pub fn get_product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn list_products(&self, filter: &ProductFilter) -> Vec<Product> {
        filter.apply(self.products.iter().cloned())
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

// =============================================================================
// Seed Data
// =============================================================================

/// The launch catalog.
///
/// All seed products share the 2024-01-01 launch timestamp and the
/// placeholder image.
pub fn mock_products() -> Vec<Product> {
    let launched = DateTime::<Utc>::from_timestamp(1_704_067_200, 0).unwrap_or_default();

    let seed = [
        ("1", "Premium Wireless Headphones", "High-quality wireless headphones with noise cancellation", 2499, "Electronics", 15),
        ("2", "Smart Fitness Watch", "Advanced fitness tracking with heart rate monitoring", 3999, "Electronics", 8),
        ("3", "Organic Cotton T-Shirt", "Comfortable and sustainable cotton t-shirt", 899, "Fashion", 25),
        ("4", "Designer Sunglasses", "Stylish sunglasses with UV protection", 1599, "Fashion", 12),
        ("5", "Wireless Bluetooth Speaker", "Portable speaker with amazing sound quality", 1299, "Electronics", 20),
        ("6", "Running Shoes", "Comfortable running shoes for all terrains", 2499, "Sports", 10),
    ];

    seed.into_iter()
        .map(|(id, name, description, rupees, category, stock)| Product {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            price: Money::from_major(rupees),
            images: vec![DEFAULT_PLACEHOLDER_IMAGE.to_string()],
            category: category.to_string(),
            stock,
            created_at: launched,
            updated_at: launched,
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
