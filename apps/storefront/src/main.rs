//! # Bazaar Storefront Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bazaar Storefront                                │
//! │                                                                         │
//! │  shell ──► storefront <command> ──► stdout (text or --json)            │
//! │                     │                                                   │
//! │                     ▼                                                   │
//! │  main.rs ────► Tokio runtime                                           │
//! │  lib.rs ─────► logging, config, database, AppContext, dispatch         │
//! │  commands/ ──► products, cart, checkout, contact, admin                │
//! │  state/ ─────► CartStore, CatalogSource, PaymentGatewayClient          │
//! │                     │                                                   │
//! │                     ▼                                                   │
//! │  bazaar.db (SQLite, WAL): products, kv_store["cart-storage"]           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // The actual setup is in lib.rs for better testability
    storefront_lib::run().await
}
