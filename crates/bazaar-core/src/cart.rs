//! # Cart
//!
//! The shopping cart collection and everything derived from it.
//!
//! ## Cart Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Operation                 Effect on items                              │
//! │  ─────────                 ───────────────                              │
//! │                                                                         │
//! │  add_item(p, n) ─────────► line for p.id? qty += n : push (p, n)        │
//! │                                                                         │
//! │  update_quantity(id, n) ─► qty = max(0, n); drop lines at 0             │
//! │                                                                         │
//! │  remove_item(id) ────────► retain lines where id differs                │
//! │                                                                         │
//! │  clear() ────────────────► items = []                                   │
//! │                                                                         │
//! │  total() / item_count() ─► (read only)                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Lines are unique by `product.id`
//! - Every line has `quantity > 0`
//! - Line order is insertion order; no operation reorders existing lines
//! - No line holds more than [`MAX_LINE_QUANTITY`] units
//! - The subtotal never exceeds [`MAX_CART_SUBTOTAL`], so totals, tax and
//!   item counts are always representable

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CartError, CartResult, CoreError, CoreResult};
use crate::money::Money;
use crate::types::{OrderItem, Product, TaxRate};

/// Version tag written into every snapshot.
pub const SNAPSHOT_VERSION: u32 = 0;

/// Most units a single line may hold.
pub const MAX_LINE_QUANTITY: i64 = 10_000;

/// Largest subtotal a cart may reach. Half the i64 range, so subtotal plus
/// tax at up to 100% still fits.
pub const MAX_CART_SUBTOTAL: Money = Money::from_minor(i64::MAX / 2);

// =============================================================================
// Cart Line
// =============================================================================

/// One (product snapshot, quantity) pairing in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartLine {
    /// Product data frozen at the time the line was created.
    pub product: Product,

    /// Units of the product. Always positive inside a [`Cart`].
    pub quantity: i64,
}

impl CartLine {
    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.product.price.multiply_quantity(self.quantity)
    }

    fn to_order_item(&self) -> OrderItem {
        OrderItem {
            product_id: self.product.id.clone(),
            quantity: self.quantity,
            price: self.product.price,
        }
    }
}

// =============================================================================
// Policy & Outcomes
// =============================================================================

/// Optional rules layered over the tolerant default behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartPolicy {
    /// Reject adds and updates that would exceed `product.stock`.
    #[serde(default)]
    pub enforce_stock: bool,
}

/// What `update_quantity` actually did.
///
/// Updates never fail on odd input; this tells the caller which of the
/// tolerated cases occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum QuantityUpdate {
    /// The line now holds `quantity` units.
    Updated { quantity: i64 },
    /// Quantity 0 was requested and the line was removed.
    Removed,
    /// A negative quantity was normalized to 0 and the line was removed.
    Clamped { requested: i64 },
    /// No line exists for the product id; nothing changed.
    NotInCart,
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Example
/// ```rust
/// use bazaar_core::{Cart, Money, Product, QuantityUpdate};
///
/// let shirt = Product::new("3", "Organic Cotton T-Shirt", Money::from_major(899));
/// let mut cart = Cart::new();
///
/// cart.add_item(&shirt, 2).unwrap();
/// cart.add_item(&shirt, 1).unwrap();
/// assert_eq!(cart.line_count(), 1);
/// assert_eq!(cart.item_count(), 3);
///
/// let outcome = cart.update_quantity("3", -5).unwrap();
/// assert_eq!(outcome, QuantityUpdate::Clamped { requested: -5 });
/// assert!(cart.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<CartLine>,
    policy: CartPolicy,
}

impl Cart {
    /// Creates a new empty cart with the tolerant default policy.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Creates a new empty cart with the given policy.
    pub fn with_policy(policy: CartPolicy) -> Self {
        Cart {
            items: Vec::new(),
            policy,
        }
    }

    /// Rebuilds a cart from persisted lines.
    ///
    /// Lines that would break an invariant are dropped: non-positive
    /// quantities, any repeat of a product id already seen (the first
    /// occurrence wins), and lines past the quantity or subtotal limits.
    /// Stock is not re-checked; the lines were accepted when they were added.
    pub fn from_lines(lines: Vec<CartLine>, policy: CartPolicy) -> Self {
        let mut cart = Cart {
            items: Vec::with_capacity(lines.len()),
            policy,
        };
        for line in lines {
            if line.quantity <= 0 || cart.line(&line.product.id).is_some() {
                continue;
            }
            if cart
                .check_limits(&line.product.id, line.product.price, line.quantity)
                .is_err()
            {
                continue;
            }
            cart.items.push(line);
        }
        cart
    }

    pub fn policy(&self) -> CartPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: CartPolicy) {
        self.policy = policy;
    }

    /// Adds a product to the cart or increases quantity if already present.
    ///
    /// ## Behavior
    /// - If product already in cart: increases quantity, position unchanged
    /// - If product not in cart: appends a new line with a copy of `product`
    ///
    /// ## Errors
    /// - [`CartError::InvalidQuantity`] if `quantity <= 0`
    /// - [`CartError::OutOfStock`] if stock enforcement is on and the
    ///   resulting quantity exceeds stock
    /// - [`CartError::QuantityTooLarge`] if the line or the subtotal would
    ///   pass the cart limits
    pub fn add_item(&mut self, product: &Product, quantity: i64) -> CartResult<()> {
        if quantity <= 0 {
            return Err(CartError::InvalidQuantity { quantity });
        }

        let enforce_stock = self.policy.enforce_stock;

        if let Some(idx) = self.position(&product.id) {
            let line = &self.items[idx];
            let new_qty = line.quantity.saturating_add(quantity);
            if enforce_stock {
                check_stock(&line.product, new_qty)?;
            }
            self.check_limits(&product.id, line.product.price, new_qty)?;
            self.items[idx].quantity = new_qty;
            return Ok(());
        }

        if enforce_stock {
            check_stock(product, quantity)?;
        }
        self.check_limits(&product.id, product.price, quantity)?;

        self.items.push(CartLine {
            product: product.clone(),
            quantity,
        });
        Ok(())
    }

    /// Removes the line for `product_id`. Returns whether a line was removed.
    pub fn remove_item(&mut self, product_id: &str) -> bool {
        let initial_len = self.items.len();
        self.items.retain(|l| l.product.id != product_id);
        self.items.len() != initial_len
    }

    /// Sets the quantity of a line, clamping at zero.
    ///
    /// ## Behavior
    /// - `quantity > 0`: line now holds `quantity` units
    /// - `quantity == 0`: line removed (same as [`Cart::remove_item`])
    /// - `quantity < 0`: treated as 0, line removed
    /// - unknown id: no-op
    ///
    /// ## Errors
    /// - [`CartError::OutOfStock`] if stock enforcement is on and `quantity`
    ///   exceeds the stock recorded on the line's product
    /// - [`CartError::QuantityTooLarge`] if the line or the subtotal would
    ///   pass the cart limits
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) -> CartResult<QuantityUpdate> {
        let enforce_stock = self.policy.enforce_stock;

        let Some(idx) = self.position(product_id) else {
            return Ok(QuantityUpdate::NotInCart);
        };

        let clamped = quantity.max(0);
        if clamped > 0 {
            let line = &self.items[idx];
            if enforce_stock {
                check_stock(&line.product, clamped)?;
            }
            self.check_limits(product_id, line.product.price, clamped)?;
            self.items[idx].quantity = clamped;
            return Ok(QuantityUpdate::Updated { quantity: clamped });
        }

        self.items.retain(|l| l.quantity > 0 && l.product.id != product_id);
        if quantity < 0 {
            Ok(QuantityUpdate::Clamped {
                requested: quantity,
            })
        } else {
            Ok(QuantityUpdate::Removed)
        }
    }

    /// Clears all items from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of `price × quantity` over all lines. Excludes tax and shipping.
    pub fn total(&self) -> Money {
        self.items
            .iter()
            .map(CartLine::line_total)
            .fold(Money::zero(), |acc, lt| acc.saturating_add(lt))
    }

    /// Total units across all lines (not the number of distinct lines).
    pub fn item_count(&self) -> i64 {
        self.items.iter().fold(0_i64, |acc, l| acc.saturating_add(l.quantity))
    }

    /// Number of distinct products in the cart.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.items
    }

    /// Looks up the line for a product id.
    pub fn line(&self, product_id: &str) -> Option<&CartLine> {
        self.items.iter().find(|l| l.product.id == product_id)
    }

    fn position(&self, product_id: &str) -> Option<usize> {
        self.items.iter().position(|l| l.product.id == product_id)
    }

    /// Checks that `product_id` holding `quantity` units at `price` keeps
    /// the cart within [`MAX_LINE_QUANTITY`] and [`MAX_CART_SUBTOTAL`].
    fn check_limits(&self, product_id: &str, price: Money, quantity: i64) -> CartResult<()> {
        let too_large = || CartError::QuantityTooLarge {
            product_id: product_id.to_string(),
            requested: quantity,
        };

        if quantity > MAX_LINE_QUANTITY {
            return Err(too_large());
        }

        let mut subtotal = price.checked_multiply_quantity(quantity).ok_or_else(too_large)?;
        for line in self.items.iter().filter(|l| l.product.id != product_id) {
            subtotal = line
                .product
                .price
                .checked_multiply_quantity(line.quantity)
                .and_then(|lt| subtotal.checked_add(lt))
                .ok_or_else(too_large)?;
        }

        if subtotal > MAX_CART_SUBTOTAL {
            return Err(too_large());
        }
        Ok(())
    }

    /// Order lines for checkout hand-off, prices frozen from the snapshots.
    pub fn to_order_items(&self) -> Vec<OrderItem> {
        self.items.iter().map(CartLine::to_order_item).collect()
    }

    /// Captures the persisted form of the cart.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            state: CartSnapshotState {
                items: self.items.clone(),
            },
            version: SNAPSHOT_VERSION,
        }
    }
}

fn check_stock(product: &Product, requested: i64) -> CartResult<()> {
    if product.has_stock_for(requested) {
        Ok(())
    } else {
        Err(CartError::OutOfStock {
            product_id: product.id.clone(),
            available: i64::from(product.stock),
            requested,
        })
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// Persisted cart layout: `{"state":{"items":[...]},"version":0}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartSnapshot {
    pub state: CartSnapshotState,
    pub version: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartSnapshotState {
    #[serde(default)]
    pub items: Vec<CartLine>,
}

impl CartSnapshot {
    /// Serializes the snapshot to JSON.
    pub fn encode(&self) -> CoreResult<String> {
        serde_json::to_string(self).map_err(|e| CoreError::InvalidSnapshot(e.to_string()))
    }

    /// Parses a snapshot, rejecting versions this build doesn't understand.
    pub fn decode(json: &str) -> CoreResult<Self> {
        let snapshot: CartSnapshot =
            serde_json::from_str(json).map_err(|e| CoreError::InvalidSnapshot(e.to_string()))?;

        if snapshot.version != SNAPSHOT_VERSION {
            return Err(CoreError::InvalidSnapshot(format!(
                "unsupported version {}",
                snapshot.version
            )));
        }

        Ok(snapshot)
    }

    pub fn into_lines(self) -> Vec<CartLine> {
        self.state.items
    }

    pub fn len(&self) -> usize {
        self.state.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.items.is_empty()
    }
}

// =============================================================================
// Order Summary
// =============================================================================

/// Checkout figures derived from a cart.
///
/// ```text
/// Subtotal (3 items)           ₹5,397.00
/// Shipping                     Free
/// Tax (18%)                    ₹971.46
/// ───────────────────────────────────────
/// Total                        ₹6,368.46
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct OrderSummary {
    pub line_count: usize,
    pub item_count: i64,
    pub subtotal: Money,
    pub shipping: Money,
    pub tax_rate: TaxRate,
    pub tax: Money,
    pub total: Money,
}

impl OrderSummary {
    /// Computes the summary. Shipping is always free.
    pub fn from_cart(cart: &Cart, tax_rate: TaxRate) -> Self {
        let subtotal = cart.total();
        let shipping = Money::zero();
        let tax = subtotal.calculate_tax(tax_rate);

        OrderSummary {
            line_count: cart.line_count(),
            item_count: cart.item_count(),
            subtotal,
            shipping,
            tax_rate,
            tax,
            total: subtotal.saturating_add(shipping).saturating_add(tax),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product(id: &str, price: i64) -> Product {
        Product::new(id, format!("Product {}", id), Money::from_major(price))
            .with_category("Electronics")
            .with_stock(10)
    }

    fn ids(cart: &Cart) -> Vec<&str> {
        cart.lines().iter().map(|l| l.product.id.as_str()).collect()
    }

    #[test]
    fn test_add_item_appends_in_order() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 100), 1).unwrap();
        cart.add_item(&test_product("2", 50), 1).unwrap();
        cart.add_item(&test_product("3", 25), 1).unwrap();

        assert_eq!(ids(&cart), ["1", "2", "3"]);
    }

    #[test]
    fn test_add_same_product_accumulates() {
        let mut cart = Cart::new();
        let product = test_product("1", 100);

        cart.add_item(&product, 2).unwrap();
        cart.add_item(&product, 3).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.line("1").unwrap().quantity, 5);
    }

    #[test]
    fn test_add_existing_keeps_position() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 100), 1).unwrap();
        cart.add_item(&test_product("2", 50), 1).unwrap();
        cart.add_item(&test_product("1", 100), 4).unwrap();

        assert_eq!(ids(&cart), ["1", "2"]);
    }

    #[test]
    fn test_uniqueness_over_many_adds() {
        let mut cart = Cart::new();
        for round in 0..5 {
            for id in ["a", "b", "c", "a", "b"] {
                cart.add_item(&test_product(id, 10), round + 1).unwrap();
            }
        }

        let mut seen = ids(&cart);
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), cart.line_count());
        assert_eq!(cart.line_count(), 3);
    }

    #[test]
    fn test_line_keeps_snapshot_of_product() {
        let mut cart = Cart::new();
        let mut product = test_product("1", 100);
        cart.add_item(&product, 1).unwrap();

        product.price = Money::from_major(999);
        product.name = "Renamed".into();
        cart.add_item(&product, 1).unwrap();

        let line = cart.line("1").unwrap();
        assert_eq!(line.product.price, Money::from_major(100));
        assert_eq!(line.product.name, "Product 1");
        assert_eq!(line.quantity, 2);
    }

    #[test]
    fn test_add_rejects_non_positive_quantity() {
        let mut cart = Cart::new();
        let product = test_product("1", 100);

        assert_eq!(
            cart.add_item(&product, 0),
            Err(CartError::InvalidQuantity { quantity: 0 })
        );
        assert_eq!(
            cart.add_item(&product, -3),
            Err(CartError::InvalidQuantity { quantity: -3 })
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_sets_value() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 100), 2).unwrap();

        let outcome = cart.update_quantity("1", 7).unwrap();

        assert_eq!(outcome, QuantityUpdate::Updated { quantity: 7 });
        assert_eq!(cart.item_count(), 7);
    }

    #[test]
    fn test_update_to_zero_removes() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 100), 2).unwrap();
        cart.add_item(&test_product("2", 50), 1).unwrap();

        assert_eq!(cart.update_quantity("1", 0).unwrap(), QuantityUpdate::Removed);
        assert_eq!(ids(&cart), ["2"]);
    }

    #[test]
    fn test_update_negative_clamps_and_removes() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 100), 2).unwrap();

        let outcome = cart.update_quantity("1", -5).unwrap();

        assert_eq!(outcome, QuantityUpdate::Clamped { requested: -5 });
        assert!(cart.line("1").is_none());
    }

    #[test]
    fn test_update_unknown_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 100), 2).unwrap();
        let before = cart.clone();

        assert_eq!(
            cart.update_quantity("missing", 3).unwrap(),
            QuantityUpdate::NotInCart
        );
        assert_eq!(cart, before);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 100), 2).unwrap();
        let before = cart.clone();

        assert!(!cart.remove_item("nonexistent"));
        assert_eq!(cart, before);

        assert!(cart.remove_item("1"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_total_and_item_count() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 100), 2).unwrap();
        cart.add_item(&test_product("2", 50), 1).unwrap();

        assert_eq!(cart.total(), Money::from_major(250));
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.line_count(), 2);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 100), 2).unwrap();

        cart.clear();
        assert!(cart.is_empty());
        cart.clear();
        assert!(cart.is_empty());

        assert_eq!(cart.total(), Money::zero());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_stock_enforcement_on_add() {
        let mut cart = Cart::with_policy(CartPolicy {
            enforce_stock: true,
        });
        let product = test_product("1", 100).with_stock(3);

        cart.add_item(&product, 2).unwrap();
        let err = cart.add_item(&product, 2).unwrap_err();

        assert_eq!(
            err,
            CartError::OutOfStock {
                product_id: "1".into(),
                available: 3,
                requested: 4,
            }
        );
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_stock_enforcement_on_update() {
        let mut cart = Cart::with_policy(CartPolicy {
            enforce_stock: true,
        });
        cart.add_item(&test_product("1", 100).with_stock(3), 1).unwrap();

        assert!(matches!(
            cart.update_quantity("1", 4),
            Err(CartError::OutOfStock { requested: 4, .. })
        ));
        assert_eq!(cart.item_count(), 1);

        // Removal is always allowed
        assert_eq!(cart.update_quantity("1", 0).unwrap(), QuantityUpdate::Removed);
    }

    #[test]
    fn test_add_past_line_limit_is_rejected() {
        let mut cart = Cart::new();
        let product = test_product("1", 2499);

        assert_eq!(
            cart.add_item(&product, 100_000_000_000_000),
            Err(CartError::QuantityTooLarge {
                product_id: "1".into(),
                requested: 100_000_000_000_000,
            })
        );
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Money::zero());

        assert!(cart.add_item(&product, i64::MAX).is_err());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_accumulation_stops_at_line_limit() {
        let mut cart = Cart::new();
        let product = test_product("1", 100);

        cart.add_item(&product, MAX_LINE_QUANTITY).unwrap();
        assert!(matches!(
            cart.add_item(&product, 1),
            Err(CartError::QuantityTooLarge { requested, .. }) if requested == MAX_LINE_QUANTITY + 1
        ));
        assert!(matches!(
            cart.add_item(&product, i64::MAX),
            Err(CartError::QuantityTooLarge { requested: i64::MAX, .. })
        ));

        assert_eq!(cart.item_count(), MAX_LINE_QUANTITY);
        assert_eq!(cart.total(), Money::from_major(100 * MAX_LINE_QUANTITY));
    }

    #[test]
    fn test_subtotal_ceiling() {
        let mut cart = Cart::new();
        let pricey = Product::new("1", "Pricey", Money::from_minor(i64::MAX / 4));

        cart.add_item(&pricey, 2).unwrap();
        assert!(matches!(
            cart.update_quantity("1", 3),
            Err(CartError::QuantityTooLarge { .. })
        ));
        let other = Product::new("2", "Also Pricey", Money::from_minor(i64::MAX / 4));
        assert!(matches!(
            cart.add_item(&other, 1),
            Err(CartError::QuantityTooLarge { .. })
        ));

        assert_eq!(ids(&cart), ["1"]);
        assert_eq!(cart.item_count(), 2);

        let summary = OrderSummary::from_cart(&cart, TaxRate::from_bps(10_000));
        assert_eq!(summary.tax, summary.subtotal);
        assert_eq!(summary.total.minor(), summary.subtotal.minor() * 2);
    }

    #[test]
    fn test_update_quantity_bounds() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 100), 2).unwrap();
        cart.add_item(&test_product("2", 100), 2).unwrap();

        assert!(matches!(
            cart.update_quantity("1", MAX_LINE_QUANTITY + 1),
            Err(CartError::QuantityTooLarge { .. })
        ));
        assert!(matches!(
            cart.update_quantity("1", i64::MAX),
            Err(CartError::QuantityTooLarge { .. })
        ));
        assert_eq!(cart.line("1").unwrap().quantity, 2);

        assert_eq!(
            cart.update_quantity("1", MAX_LINE_QUANTITY).unwrap(),
            QuantityUpdate::Updated {
                quantity: MAX_LINE_QUANTITY
            }
        );

        assert_eq!(
            cart.update_quantity("2", i64::MIN).unwrap(),
            QuantityUpdate::Clamped { requested: i64::MIN }
        );
        assert_eq!(ids(&cart), ["1"]);
    }

    #[test]
    fn test_stock_ignored_by_default() {
        let mut cart = Cart::new();
        let product = test_product("1", 100).with_stock(1);

        cart.add_item(&product, 50).unwrap();
        assert_eq!(cart.item_count(), 50);
    }

    #[test]
    fn test_snapshot_round_trip_preserves_order() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("2", 50), 1).unwrap();
        cart.add_item(&test_product("1", 100), 2).unwrap();
        cart.add_item(&test_product("3", 25), 4).unwrap();

        let json = cart.snapshot().encode().unwrap();
        let restored = Cart::from_lines(
            CartSnapshot::decode(&json).unwrap().into_lines(),
            CartPolicy::default(),
        );

        assert_eq!(restored, cart);
        assert_eq!(ids(&restored), ["2", "1", "3"]);
    }

    #[test]
    fn test_snapshot_layout() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 100), 2).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&cart.snapshot().encode().unwrap()).unwrap();

        assert_eq!(value["version"], 0);
        assert_eq!(value["state"]["items"][0]["quantity"], 2);
        assert_eq!(value["state"]["items"][0]["product"]["id"], "1");
    }

    #[test]
    fn test_snapshot_decode_rejects_bad_input() {
        assert!(matches!(
            CartSnapshot::decode("{not json"),
            Err(CoreError::InvalidSnapshot(_))
        ));
        assert!(matches!(
            CartSnapshot::decode(r#"{"state":{"items":[]},"version":7}"#),
            Err(CoreError::InvalidSnapshot(_))
        ));
    }

    #[test]
    fn test_from_lines_drops_invalid_lines() {
        let lines = vec![
            CartLine {
                product: test_product("1", 100),
                quantity: 2,
            },
            CartLine {
                product: test_product("2", 50),
                quantity: 0,
            },
            CartLine {
                product: test_product("1", 100),
                quantity: 9,
            },
            CartLine {
                product: test_product("3", 25),
                quantity: -1,
            },
        ];

        let cart = Cart::from_lines(lines, CartPolicy::default());

        assert_eq!(ids(&cart), ["1"]);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_from_lines_drops_lines_past_limits() {
        let lines = vec![
            CartLine {
                product: test_product("1", 100),
                quantity: MAX_LINE_QUANTITY + 1,
            },
            CartLine {
                product: Product::new("2", "Pricey", Money::from_minor(i64::MAX / 4)),
                quantity: 2,
            },
            CartLine {
                product: Product::new("3", "Pricey too", Money::from_minor(i64::MAX / 4)),
                quantity: 1,
            },
            CartLine {
                product: test_product("4", 0),
                quantity: 3,
            },
        ];

        let cart = Cart::from_lines(lines, CartPolicy::default());

        assert_eq!(ids(&cart), ["2", "4"]);
        assert_eq!(cart.item_count(), 5);
    }

    #[test]
    fn test_order_summary_applies_gst() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 100), 2).unwrap();
        cart.add_item(&test_product("2", 50), 1).unwrap();

        let summary = OrderSummary::from_cart(&cart, TaxRate::from_bps(1800));

        assert_eq!(summary.subtotal, Money::from_major(250));
        assert_eq!(summary.tax, Money::from_major(45));
        assert_eq!(summary.shipping, Money::zero());
        assert_eq!(summary.total, Money::from_major(295));
        assert_eq!(summary.item_count, 3);
        assert_eq!(summary.line_count, 2);
    }

    #[test]
    fn test_to_order_items() {
        let mut cart = Cart::new();
        cart.add_item(&test_product("1", 100), 2).unwrap();

        let items = cart.to_order_items();

        assert_eq!(
            items,
            vec![OrderItem {
                product_id: "1".into(),
                quantity: 2,
                price: Money::from_major(100),
            }]
        );
    }
}
