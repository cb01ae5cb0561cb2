//! # Commands Module
//!
//! One function per CLI operation. Each takes the [`AppContext`] and
//! returns a serializable response or an [`AppError`].
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (Render trait)
//! ├── product.rs   ◄─── products list / show
//! ├── cart.rs      ◄─── cart show / add / update / remove / clear
//! ├── checkout.rs  ◄─── checkout hand-off
//! ├── contact.rs   ◄─── contact form
//! └── admin.rs     ◄─── admin list / delete / seed / upsert
//! ```
//!
//! ## Output
//! ```text
//! command fn ──► Response (Serialize + Render)
//!                    │
//!          --json ───┼──► serde_json::to_string_pretty
//!                    │
//!         default ───┴──► Render::render(&StoreSettings)
//! ```
//!
//! [`AppContext`]: crate::state::AppContext
//! [`AppError`]: crate::error::AppError

pub mod admin;
pub mod cart;
pub mod checkout;
pub mod contact;
pub mod product;

use crate::config::StoreSettings;

/// Human-readable rendering of a command response.
pub trait Render {
    fn render(&self, store: &StoreSettings) -> String;
}
