//! # Domain Types
//!
//! Core domain types used throughout the storefront.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │     Order       │   │  OrderStatus    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  Pending        │       │
//! │  │  name, category │   │  user_id        │   │  Processing     │       │
//! │  │  price (Money)  │   │  products[]     │   │  Shipped        │       │
//! │  │  stock, images  │   │  total, status  │   │  Delivered      │       │
//! │  └─────────────────┘   └─────────────────┘   │  Cancelled      │       │
//! │                                              └─────────────────┘       │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    TaxRate      │   │      User       │   │ ContactMessage  │       │
//! │  │  bps (u32)      │   │  id, email      │   │  name, email    │       │
//! │  │  1800 = 18%     │   │  full_name?     │   │  subject, body  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Orders and users are owned by the hosted backend; they exist here only
//! as shapes so checkout can hand data off to it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1800 bps = 18% (GST slab applied at checkout)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage, rounded to the nearest basis
    /// point.
    ///
    /// Returns `None` unless `pct` is a finite value in `0.0..=100.0`.
    pub fn from_percentage(pct: f64) -> Option<Self> {
        if !pct.is_finite() || !(0.0..=100.0).contains(&pct) {
            return None;
        }
        Some(TaxRate((pct * 100.0).round() as u32))
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::from_bps(crate::DEFAULT_TAX_RATE_BPS)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available in the catalog.
///
/// The cart stores a full copy of this record per line, so later catalog
/// edits never leak into an existing cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Unique identifier, stable across the product's lifetime.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Longer description shown on the detail view.
    #[serde(default)]
    pub description: String,

    /// Unit price in minor units.
    #[serde(rename = "price_minor")]
    pub price: Money,

    /// Image URIs, in display order. May be empty.
    #[serde(default)]
    pub images: Vec<String>,

    /// Catalog category (e.g. "Electronics").
    #[serde(default)]
    pub category: String,

    /// Units available. Informational unless stock enforcement is on.
    #[serde(default)]
    pub stock: u32,

    #[serde(default)]
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[serde(default)]
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Creates a product with the required fields; everything else empty.
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Money) -> Self {
        let now = Utc::now();
        Product {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price,
            images: Vec::new(),
            category: String::new(),
            stock: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_stock(mut self, stock: u32) -> Self {
        self.stock = stock;
        self
    }

    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self
    }

    /// Returns the first image, or `placeholder` when there is none.
    pub fn primary_image<'a>(&'a self, placeholder: &'a str) -> &'a str {
        self.images
            .first()
            .map(String::as_str)
            .filter(|uri| !uri.is_empty())
            .unwrap_or(placeholder)
    }

    /// Checks whether `quantity` units can be taken from stock.
    pub fn has_stock_for(&self, quantity: i64) -> bool {
        quantity <= i64::from(self.stock)
    }

    #[inline]
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

// =============================================================================
// Orders & Users (backend shapes)
// =============================================================================

/// Lifecycle of an order on the hosted backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

/// A line of an order, with the unit price frozen at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderItem {
    pub product_id: String,
    pub quantity: i64,
    #[serde(rename = "price_minor")]
    pub price: Money,
}

/// An order record as stored by the hosted backend.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub products: Vec<OrderItem>,
    #[serde(rename = "total_minor")]
    pub total: Money,
    pub status: OrderStatus,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// A customer account as stored by the hosted auth backend.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct User {
    pub id: String,
    pub email: String,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Contact Form
// =============================================================================

/// A message submitted through the contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(1800);
        assert_eq!(rate.bps(), 1800);
        assert!((rate.percentage() - 18.0).abs() < 0.001);
    }

    #[test]
    fn test_tax_rate_from_percentage() {
        assert_eq!(TaxRate::from_percentage(18.0).map(|r| r.bps()), Some(1800));
        assert_eq!(TaxRate::from_percentage(12.5).map(|r| r.bps()), Some(1250));
        assert_eq!(TaxRate::from_percentage(0.0).map(|r| r.bps()), Some(0));
        assert_eq!(TaxRate::default().bps(), 1800);
    }

    #[test]
    fn test_tax_rate_from_percentage_rejects_out_of_range() {
        assert_eq!(TaxRate::from_percentage(-5.0), None);
        assert_eq!(TaxRate::from_percentage(100.01), None);
        assert_eq!(TaxRate::from_percentage(f64::NAN), None);
        assert_eq!(TaxRate::from_percentage(f64::INFINITY), None);
    }

    #[test]
    fn test_primary_image_falls_back_to_placeholder() {
        let product = Product::new("1", "Headphones", Money::from_major(2499));
        assert_eq!(product.primary_image("/placeholder.jpg"), "/placeholder.jpg");

        let product = product.with_images(vec!["/a.jpg".into(), "/b.jpg".into()]);
        assert_eq!(product.primary_image("/placeholder.jpg"), "/a.jpg");
    }

    #[test]
    fn test_stock_checks() {
        let product = Product::new("2", "Watch", Money::from_major(3999)).with_stock(8);
        assert!(product.in_stock());
        assert!(product.has_stock_for(8));
        assert!(!product.has_stock_for(9));
    }

    #[test]
    fn test_product_json_uses_minor_price_field() {
        let product = Product::new("3", "T-Shirt", Money::from_major(899));
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["price_minor"], 89900);
        assert!(json.get("price").is_none());
    }

    #[test]
    fn test_order_status_serialization() {
        let json = serde_json::to_string(&OrderStatus::Shipped).unwrap();
        assert_eq!(json, "\"shipped\"");
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
    }
}
