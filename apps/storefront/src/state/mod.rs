//! # State Module
//!
//! Application state shared by every command.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  run()                                                                  │
//! │   └── AppContext::new(config, db)  (built once, passed to commands)    │
//! │                                                                         │
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────┐ ┌──────────────┐   │
//! │  │   Database   │ │  CartStore   │ │ CatalogSource│ │  AppConfig   │   │
//! │  │              │ │              │ │              │ │  + Payment   │   │
//! │  │  SQLite pool │ │  Arc<Mutex<  │ │  DB or the   │ │  read-only   │   │
//! │  │              │ │    Cart>>    │ │  launch set  │ │              │   │
//! │  └──────────────┘ └──────────────┘ └──────────────┘ └──────────────┘   │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • Database: internal connection pool                                  │
//! │  • CartStore: Arc<Mutex<Cart>> plus a single writer task               │
//! │  • AppConfig / PaymentGatewayClient: read-only after startup           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod catalog;
mod payment;

pub use cart::CartStore;
pub use catalog::CatalogSource;
pub use payment::{CheckoutRequest, PaymentGatewayClient};

use std::sync::Arc;

use bazaar_db::Database;
use tracing::info;

use crate::config::AppConfig;
use crate::error::AppResult;

/// Everything a command may need, built once at startup.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub db: Database,
    pub cart: CartStore,
    pub catalog: CatalogSource,
    /// `None` when no publishable key is configured.
    pub payment: Option<PaymentGatewayClient>,
}

impl AppContext {
    /// Wires state together: rehydrates the cart and picks the catalog.
    pub async fn new(config: AppConfig, db: Database) -> AppResult<Self> {
        let payment = config
            .payment
            .publishable_key
            .as_deref()
            .map(PaymentGatewayClient::new)
            .transpose()?;

        let cart = CartStore::load(
            Arc::new(db.kv_store()),
            config.cart.storage_key.clone(),
            config.cart.policy(),
        )
        .await;

        let catalog = CatalogSource::resolve(db.products()).await?;

        info!(
            store = %config.store.name,
            enforce_stock = config.cart.enforce_stock,
            payments = payment.is_some(),
            "Storefront state initialized"
        );

        Ok(AppContext {
            config,
            db,
            cart,
            catalog,
            payment,
        })
    }

    /// Drains pending cart writes and closes the database.
    pub async fn shutdown(&self) {
        self.cart.flush().await;
        self.db.close().await;
    }
}
