//! # Cart Commands
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐                         │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │                         │
//! │  │  Cart    │     │          │     │ hand-off │                         │
//! │  └──────────┘     └──────────┘     └──────────┘                         │
//! │       ▲                │                                                │
//! │       │           cart add                                              │
//! │       │           cart update                                           │
//! │       │           cart remove                                           │
//! │       │                │                                                │
//! │       └─── cart clear ─┘                                                │
//! │                                                                         │
//! │  Every change is persisted as a snapshot; the next invocation          │
//! │  starts from it.                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt::Write as _;

use bazaar_core::{Cart, CartLine, Money, OrderSummary, QuantityUpdate};
use serde::Serialize;
use tracing::debug;

use super::Render;
use crate::config::StoreSettings;
use crate::error::{AppError, AppResult};
use crate::state::AppContext;

#[derive(Debug, Clone, Serialize)]
pub struct CartLineView {
    pub product_id: String,
    pub name: String,
    pub unit_price: Money,
    pub quantity: i64,
    pub line_total: Money,
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        CartLineView {
            product_id: line.product.id.clone(),
            name: line.product.name.clone(),
            unit_price: line.product.price,
            quantity: line.quantity,
            line_total: line.line_total(),
        }
    }
}

/// Cart lines plus the order summary.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub summary: OrderSummary,
}

impl CartView {
    pub fn new(cart: &Cart, store: &StoreSettings) -> Self {
        CartView {
            lines: cart.lines().iter().map(CartLineView::from).collect(),
            summary: OrderSummary::from_cart(cart, store.tax_rate()),
        }
    }

    fn capture(ctx: &AppContext) -> Self {
        ctx.cart.with_cart(|cart| CartView::new(cart, &ctx.config.store))
    }
}

impl Render for CartView {
    fn render(&self, store: &StoreSettings) -> String {
        if self.lines.is_empty() {
            return "Your cart is empty.".to_string();
        }

        let mut out = String::new();
        for line in &self.lines {
            let _ = writeln!(
                out,
                "{:<6} {:<32} x{:<4} {:>14}",
                line.product_id,
                line.name,
                line.quantity,
                store.format_price(line.line_total)
            );
        }

        let s = &self.summary;
        let shipping = if s.shipping.is_zero() {
            "Free".to_string()
        } else {
            store.format_price(s.shipping)
        };

        let _ = writeln!(out, "{}", "─".repeat(60));
        let _ = writeln!(
            out,
            "{:<44} {:>15}",
            format!("Subtotal ({} items)", s.item_count),
            store.format_price(s.subtotal)
        );
        let _ = writeln!(out, "{:<44} {:>15}", "Shipping", shipping);
        let _ = writeln!(
            out,
            "{:<44} {:>15}",
            format!("Tax ({}%)", s.tax_rate.percentage()),
            store.format_price(s.tax)
        );
        let _ = write!(out, "{:<44} {:>15}", "Total", store.format_price(s.total));
        out
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CartUpdateResponse {
    #[serde(flatten)]
    pub outcome: QuantityUpdate,
    pub cart: CartView,
}

impl Render for CartUpdateResponse {
    fn render(&self, store: &StoreSettings) -> String {
        let note = match self.outcome {
            QuantityUpdate::Updated { quantity } => format!("Quantity set to {}.", quantity),
            QuantityUpdate::Removed => "Item removed.".to_string(),
            QuantityUpdate::Clamped { requested } => {
                format!("Quantity {} treated as 0; item removed.", requested)
            }
            QuantityUpdate::NotInCart => "That product is not in your cart.".to_string(),
        };
        format!("{}\n{}", note, self.cart.render(store))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CartRemoveResponse {
    pub removed: bool,
    pub cart: CartView,
}

impl Render for CartRemoveResponse {
    fn render(&self, store: &StoreSettings) -> String {
        let note = if self.removed {
            "Item removed."
        } else {
            "That product is not in your cart."
        };
        format!("{}\n{}", note, self.cart.render(store))
    }
}

/// Shows the current cart.
pub fn show_cart(ctx: &AppContext) -> CartView {
    debug!("cart show");
    CartView::capture(ctx)
}

/// Adds a product from the catalog to the cart.
///
/// The product is looked up fresh so the line freezes the current price.
pub async fn add_to_cart(ctx: &AppContext, product_id: &str, quantity: i64) -> AppResult<CartView> {
    debug!(product_id = %product_id, quantity, "cart add");

    let product = ctx
        .catalog
        .get_product(product_id)
        .await?
        .ok_or_else(|| AppError::not_found("Product", product_id))?;

    ctx.cart.add_item(&product, quantity)?;
    Ok(CartView::capture(ctx))
}

/// Sets a line's quantity.
pub fn update_cart_item(
    ctx: &AppContext,
    product_id: &str,
    quantity: i64,
) -> AppResult<CartUpdateResponse> {
    debug!(product_id = %product_id, quantity, "cart update");

    let outcome = ctx.cart.update_quantity(product_id, quantity)?;
    Ok(CartUpdateResponse {
        outcome,
        cart: CartView::capture(ctx),
    })
}

/// Removes a line.
pub fn remove_from_cart(ctx: &AppContext, product_id: &str) -> CartRemoveResponse {
    debug!(product_id = %product_id, "cart remove");

    let removed = ctx.cart.remove_item(product_id);
    CartRemoveResponse {
        removed,
        cart: CartView::capture(ctx),
    }
}

/// Empties the cart.
pub fn clear_cart(ctx: &AppContext) -> CartView {
    debug!("cart clear");

    ctx.cart.clear();
    CartView::capture(ctx)
}
