//! Command-line interface definition.
//!
//! ```bash
//! storefront products list --category Electronics --sort price-low
//! storefront cart add 3 --quantity 2
//! storefront cart update 3 0          # removes the line
//! storefront checkout --json
//! storefront admin seed
//! ```

use std::path::PathBuf;

use bazaar_core::{Money, ProductSort};
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "storefront")]
#[command(author, version, about = "Bazaar storefront: browse, cart and checkout")]
pub struct Cli {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// SQLite database file (overrides config and BAZAAR_DB_PATH)
    #[arg(long, global = true, value_name = "PATH")]
    pub database: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Browse the catalog
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Inspect and change the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Prepare a payment hand-off for the current cart
    Checkout,
    /// Send a message to the store
    Contact(ContactArgs),
    /// Manage the product table
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum ProductsAction {
    /// List products
    List {
        /// Case-insensitive match on name or description
        #[arg(long)]
        search: Option<String>,

        /// Category to show ("All" shows everything)
        #[arg(long)]
        category: Option<String>,

        /// name, price-low or price-high
        #[arg(long, default_value = "name")]
        sort: ProductSort,
    },
    /// Show one product
    Show { id: String },
}

#[derive(Debug, Subcommand)]
pub enum CartAction {
    /// Show cart lines and the order summary
    Show,
    /// Add a product
    Add {
        id: String,

        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Set a line's quantity (0 or less removes it)
    Update {
        id: String,

        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a line
    Remove { id: String },
    /// Empty the cart
    Clear,
}

#[derive(Debug, Args)]
pub struct ContactArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub subject: String,

    #[arg(long)]
    pub message: String,
}

#[derive(Debug, Subcommand)]
pub enum AdminAction {
    /// List every stored product
    List,
    /// Delete a product
    Delete { id: String },
    /// Insert the launch catalog (existing rows are kept)
    Seed,
    /// Create or replace a product
    Upsert(UpsertArgs),
}

#[derive(Debug, Args)]
pub struct UpsertArgs {
    #[arg(long)]
    pub id: String,

    #[arg(long)]
    pub name: String,

    /// Price in major units, e.g. 1299 or 1299.50
    #[arg(long, value_parser = parse_price)]
    pub price: Money,

    #[arg(long)]
    pub category: String,

    #[arg(long, default_value = "")]
    pub description: String,

    #[arg(long, default_value_t = 0)]
    pub stock: u32,

    /// Image URI (repeatable)
    #[arg(long = "image")]
    pub images: Vec<String>,
}

/// Parses "1299", "1299.5" or "1299.50" into minor units.
pub fn parse_price(input: &str) -> Result<Money, String> {
    let input = input.trim();
    let invalid = || format!("'{}' is not a price like 1299 or 1299.50", input);

    let (whole, frac) = match input.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (input, ""),
    };

    if whole.is_empty()
        || frac.len() > 2
        || !whole.chars().all(|c| c.is_ascii_digit())
        || !frac.chars().all(|c| c.is_ascii_digit())
    {
        return Err(invalid());
    }

    let major: i64 = whole.parse().map_err(|_| invalid())?;
    let minor: i64 = match frac.len() {
        0 => 0,
        1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
        _ => frac.parse().map_err(|_| invalid())?,
    };

    major
        .checked_mul(100)
        .and_then(|m| m.checked_add(minor))
        .map(Money::from_minor)
        .ok_or_else(invalid)
}
