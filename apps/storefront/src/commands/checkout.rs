//! # Checkout Command
//!
//! Builds the payment hand-off for the current cart. The cart itself is
//! left as is; it is cleared once the gateway confirms payment.

use std::fmt::Write as _;

use tracing::debug;

use super::Render;
use crate::config::StoreSettings;
use crate::error::{AppError, AppResult};
use crate::state::{AppContext, CheckoutRequest};

impl Render for CheckoutRequest {
    fn render(&self, store: &StoreSettings) -> String {
        let s = &self.summary;
        let mut out = String::new();
        let _ = writeln!(out, "Checkout {}", self.id);
        let _ = writeln!(
            out,
            "  {} line(s), {} item(s), currency {}",
            s.line_count, s.item_count, self.currency
        );
        let _ = writeln!(out, "  Subtotal  {}", store.format_price(s.subtotal));
        let _ = writeln!(out, "  Tax       {}", store.format_price(s.tax));
        let _ = write!(out, "  Total     {}", store.format_price(s.total));
        out
    }
}

/// Prepares a checkout request for the cart.
///
/// ## Errors
/// - `CONFIG_ERROR` when no publishable key is configured
/// - `CART_ERROR` when the cart is empty
pub fn checkout(ctx: &AppContext) -> AppResult<CheckoutRequest> {
    debug!("checkout");

    let client = ctx.payment.as_ref().ok_or_else(|| {
        AppError::config(
            "Payments are not configured: set payment.publishable_key or BAZAAR_PAYMENT_PUBLISHABLE_KEY",
        )
    })?;

    let store = &ctx.config.store;
    ctx.cart
        .with_cart(|cart| client.checkout_request(cart, &store.currency_code, store.tax_rate()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cart::add_to_cart;
    use crate::commands::test_support::{context, context_with};
    use crate::error::ErrorCode;
    use bazaar_core::Money;

    #[tokio::test]
    async fn test_checkout_empty_cart() {
        let ctx = context().await;
        let err = checkout(&ctx).unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);
    }

    #[tokio::test]
    async fn test_checkout_without_payment_key() {
        let ctx = context_with(|c| c.payment.publishable_key = None).await;
        add_to_cart(&ctx, "1", 1).await.unwrap();

        let err = checkout(&ctx).unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigError);
    }

    #[tokio::test]
    async fn test_checkout_builds_request() {
        let ctx = context().await;
        add_to_cart(&ctx, "5", 2).await.unwrap();

        let request = checkout(&ctx).unwrap();
        assert_eq!(request.publishable_key, "pk_test_storefront");
        assert_eq!(request.currency, "inr");
        assert_eq!(request.items[0].product_id, "5");
        assert_eq!(request.items[0].price, Money::from_major(1299));
        assert_eq!(request.summary.subtotal, Money::from_major(2598));

        // Checkout doesn't empty the cart
        assert_eq!(ctx.cart.item_count(), 2);
    }
}
