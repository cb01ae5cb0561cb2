//! # Bazaar Storefront Library
//!
//! Core library for the storefront command-line application.
//!
//! ## Module Organization
//! ```text
//! storefront_lib/
//! ├── lib.rs          ◄─── You are here (startup & dispatch)
//! ├── cli.rs          ◄─── clap definitions
//! ├── config.rs       ◄─── AppConfig (TOML + env)
//! ├── state/
//! │   ├── mod.rs      ◄─── AppContext
//! │   ├── cart.rs     ◄─── CartStore (Arc<Mutex<Cart>> + snapshot writer)
//! │   ├── catalog.rs  ◄─── CatalogSource (database or launch catalog)
//! │   └── payment.rs  ◄─── PaymentGatewayClient
//! ├── commands/
//! │   ├── product.rs  ◄─── products list / show
//! │   ├── cart.rs     ◄─── cart show / add / update / remove / clear
//! │   ├── checkout.rs ◄─── checkout
//! │   ├── contact.rs  ◄─── contact
//! │   └── admin.rs    ◄─── admin list / delete / seed / upsert
//! └── error.rs        ◄─── AppError + ErrorCode
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod state;

use std::process::ExitCode;

use bazaar_db::{Database, DbConfig};
use clap::Parser;
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cli::{AdminAction, CartAction, Cli, Command, ProductsAction};
use commands::Render;
use config::{AppConfig, StoreSettings};
use error::{AppError, AppResult};
use state::AppContext;

/// Runs the storefront CLI.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Application Startup                               │
/// │                                                                         │
/// │  1. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, writing to stderr             │
/// │     • Default: info,bazaar=debug,sqlx=warn; override with RUST_LOG     │
/// │                                                                         │
/// │  2. Parse Arguments & Load Config ────────────────────────────────────► │
/// │     • defaults → config.toml → BAZAAR_* → --database                   │
/// │                                                                         │
/// │  3. Connect to Database ──────────────────────────────────────────────► │
/// │     • SQLite with WAL mode, pending migrations applied                  │
/// │                                                                         │
/// │  4. Build AppContext ─────────────────────────────────────────────────► │
/// │     • Rehydrate cart from "cart-storage"                                │
/// │     • Pick catalog source                                               │
/// │                                                                         │
/// │  5. Dispatch Command, Print Result ───────────────────────────────────► │
/// │                                                                         │
/// │  6. Flush cart writes, close pool ────────────────────────────────────► │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let json = cli.json;

    match run_cli(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, json);
            ExitCode::FAILURE
        }
    }
}

async fn run_cli(cli: Cli) -> AppResult<()> {
    info!("Starting Bazaar storefront");

    let config = AppConfig::load(cli.config.as_deref())?;
    let db_path = config.database_path(cli.database.as_deref())?;
    info!(?db_path, "Database path determined");

    let db = Database::new(DbConfig::new(db_path)).await?;
    let ctx = AppContext::new(config, db).await?;

    let result = dispatch(&ctx, cli.command, cli.json).await;

    ctx.shutdown().await;
    result
}

async fn dispatch(ctx: &AppContext, command: Command, json: bool) -> AppResult<()> {
    let store = &ctx.config.store;

    match command {
        Command::Products { action } => match action {
            ProductsAction::List {
                search,
                category,
                sort,
            } => emit(
                &commands::product::list_products(ctx, search, category, sort).await?,
                store,
                json,
            ),
            ProductsAction::Show { id } => {
                emit(&commands::product::show_product(ctx, &id).await?, store, json)
            }
        },

        Command::Cart { action } => match action {
            CartAction::Show => emit(&commands::cart::show_cart(ctx), store, json),
            CartAction::Add { id, quantity } => emit(
                &commands::cart::add_to_cart(ctx, &id, quantity).await?,
                store,
                json,
            ),
            CartAction::Update { id, quantity } => emit(
                &commands::cart::update_cart_item(ctx, &id, quantity)?,
                store,
                json,
            ),
            CartAction::Remove { id } => {
                emit(&commands::cart::remove_from_cart(ctx, &id), store, json)
            }
            CartAction::Clear => emit(&commands::cart::clear_cart(ctx), store, json),
        },

        Command::Checkout => emit(&commands::checkout::checkout(ctx)?, store, json),

        Command::Contact(args) => emit(
            &commands::contact::submit_contact(ctx, args.into())?,
            store,
            json,
        ),

        Command::Admin { action } => match action {
            AdminAction::List => emit(&commands::admin::list_all(ctx).await?, store, json),
            AdminAction::Delete { id } => {
                emit(&commands::admin::delete_product(ctx, &id).await?, store, json)
            }
            AdminAction::Seed => emit(&commands::admin::seed_catalog(ctx).await?, store, json),
            AdminAction::Upsert(args) => {
                emit(&commands::admin::upsert_product(ctx, args).await?, store, json)
            }
        },
    }
}

/// Prints a response to stdout, as JSON or rendered text.
fn emit<T: Serialize + Render>(value: &T, store: &StoreSettings, json: bool) -> AppResult<()> {
    let output = if json {
        serde_json::to_string_pretty(value)
            .map_err(|e| AppError::internal(format!("Failed to serialize output: {}", e)))?
    } else {
        value.render(store)
    };

    println!("{}", output);
    debug!(bytes = output.len(), "Output written");
    Ok(())
}

fn report_error(err: &AppError, json: bool) {
    tracing::error!(code = err.code.as_str(), "{}", err.message);

    if json {
        match serde_json::to_string(err) {
            Ok(body) => eprintln!("{}", body),
            Err(_) => eprintln!("{}", err),
        }
    } else {
        eprintln!("{}", err);
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=bazaar=trace` - Show trace for bazaar crates only
/// - Default: `info,bazaar=debug,sqlx=warn`
///
/// Logs go to stderr so stdout carries only command output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,bazaar=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
