//! # Payment Gateway Client
//!
//! Holds the gateway's publishable key and prepares checkout hand-offs.
//!
//! No payment call is made from here: the request is handed to the
//! gateway's hosted checkout, which owns card collection and capture.

use bazaar_core::{Cart, CartError, OrderItem, OrderSummary, TaxRate};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Everything the hosted checkout needs to take payment for a cart.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutRequest {
    /// Idempotency key for the hand-off.
    pub id: String,
    pub publishable_key: String,
    /// ISO 4217, lowercased the way gateways expect it.
    pub currency: String,
    pub items: Vec<OrderItem>,
    pub summary: OrderSummary,
}

/// Payment gateway handle, built once from configuration.
#[derive(Debug, Clone)]
pub struct PaymentGatewayClient {
    publishable_key: String,
}

impl PaymentGatewayClient {
    /// Creates a client from a publishable (`pk_...`) key.
    ///
    /// Secret keys never belong in a storefront; anything else is refused.
    pub fn new(publishable_key: impl Into<String>) -> AppResult<Self> {
        let publishable_key = publishable_key.into();
        if !publishable_key.starts_with("pk_") || publishable_key.len() <= 3 {
            return Err(AppError::config(
                "Payment publishable key must start with pk_",
            ));
        }
        Ok(PaymentGatewayClient { publishable_key })
    }

    /// Returns true for test-mode keys (`pk_test_...`).
    pub fn is_test_mode(&self) -> bool {
        self.publishable_key.starts_with("pk_test_")
    }

    /// Builds a checkout request from the cart.
    ///
    /// ## Errors
    /// [`CartError::EmptyCart`] if there is nothing to pay for.
    pub fn checkout_request(
        &self,
        cart: &Cart,
        currency_code: &str,
        tax_rate: TaxRate,
    ) -> AppResult<CheckoutRequest> {
        if cart.is_empty() {
            return Err(CartError::EmptyCart.into());
        }

        let request = CheckoutRequest {
            id: Uuid::new_v4().to_string(),
            publishable_key: self.publishable_key.clone(),
            currency: currency_code.to_lowercase(),
            items: cart.to_order_items(),
            summary: OrderSummary::from_cart(cart, tax_rate),
        };

        info!(
            checkout_id = %request.id,
            lines = request.items.len(),
            total = %request.summary.total,
            test_mode = self.is_test_mode(),
            "Checkout request prepared"
        );

        Ok(request)
    }
}
