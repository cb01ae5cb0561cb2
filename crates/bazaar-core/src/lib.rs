//! # bazaar-core: Pure Business Logic for the Bazaar Storefront
//!
//! This crate is the **heart** of the storefront. It contains the cart state
//! model and everything the cart needs as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Bazaar Storefront Architecture                     │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    storefront (CLI app)                         │   │
//! │  │    products ──► cart ──► checkout ──► contact ──► admin        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bazaar-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │  catalog  │  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │  Filter   │  │   │
//! │  │   │  Order    │  │  TaxRate  │  │ CartLine  │  │  Sort     │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    bazaar-db (Database Layer)                   │   │
//! │  │          cart snapshots (key-value), product catalog            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Order, ContactMessage, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The cart collection, its invariants and the persisted snapshot
//! - [`catalog`] - Product filtering, sorting and the seed catalog
//! - [`error`] - Domain error types
//! - [`validation`] - Boundary validation for products and form input
//!
//! ## Example Usage
//!
//! ```rust
//! use bazaar_core::{Cart, Money, Product};
//!
//! let headphones = Product::new("1", "Premium Wireless Headphones", Money::from_major(2499));
//!
//! let mut cart = Cart::new();
//! cart.add_item(&headphones, 2).unwrap();
//!
//! assert_eq!(cart.item_count(), 2);
//! assert_eq!(cart.total(), Money::from_major(4998));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine, CartPolicy, CartSnapshot, OrderSummary, QuantityUpdate};
pub use catalog::{ProductFilter, ProductSort, StaticCatalog};
pub use error::{CartError, CoreError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Key the cart snapshot is stored under in the persistence adapter.
pub const CART_STORAGE_KEY: &str = "cart-storage";

/// Tax applied at checkout, in basis points (1800 = 18% GST).
pub const DEFAULT_TAX_RATE_BPS: u32 = 1800;

/// Image shown when a product has no images of its own.
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "/placeholder-product.jpg";

/// Maximum length of a contact form message body.
pub const MAX_CONTACT_MESSAGE_LEN: usize = 2000;
