//! # bazaar-db: Database Layer for the Bazaar Storefront
//!
//! This crate provides persistence for the storefront.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Data Flow                             │
//! │                                                                         │
//! │  CartStore (storefront)          products / admin commands             │
//! │       │                                   │                             │
//! │       ▼                                   ▼                             │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     bazaar-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │ KeyValueStore │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │   (kv.rs)     │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ SqliteKvStore │    │ 001_init.sql │  │   │
//! │  │   │               │◄───│ ProductRepo   │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  bazaar.db (local file, WAL mode)                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`pool`] - Connection pool and configuration
//! - [`migrations`] - Embedded schema migrations
//! - [`kv`] - Key-value persistence adapters (SQLite and in-memory)
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bazaar_db::{Database, DbConfig, KeyValueStore};
//!
//! let db = Database::new(DbConfig::new("path/to/bazaar.db")).await?;
//!
//! let products = db.products().list(&ProductFilter::default()).await?;
//! db.kv_store().set("cart-storage", &snapshot_json).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod kv;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use kv::{KeyValueStore, MemoryKvStore, SqliteKvStore};
pub use pool::{Database, DbConfig};

pub use repository::product::ProductRepository;
