//! # Repository Module
//!
//! Database repository implementations for the storefront.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  CLI command                                                           │
//! │       │                                                                 │
//! │       │  db.products().list(&filter)                                   │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── list(&self, filter)                                               │
//! │  ├── upsert(&self, product)                                            │
//! │  ├── delete(&self, id)                                                 │
//! │  └── seed(&self, products)                                             │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart snapshots don't go through a repository; see [`crate::kv`].
//!
//! ## Available Repositories
//!
//! - [`product::ProductRepository`] - Product catalog CRUD and filtering

pub mod product;
