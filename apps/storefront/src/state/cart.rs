//! # Cart Store
//!
//! The live cart plus transparent snapshot persistence.
//!
//! ## Thread Safety
//! The cart is wrapped in `Arc<Mutex<T>>`. Every operation takes the lock,
//! runs to completion and releases it; nothing awaits while holding it.
//!
//! ## Persistence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Snapshot Write Path                                  │
//! │                                                                         │
//! │  add_item / remove_item / update_quantity / clear                      │
//! │       │                                                                 │
//! │       │  (under the cart lock)                                          │
//! │       ▼                                                                 │
//! │  mutate Cart ──► encode snapshot ──► tx.send(Persist(json))            │
//! │                                            │                            │
//! │                                            │  unbounded mpsc           │
//! │                                            ▼                            │
//! │                              writer task (one per store)               │
//! │                              kv.set("cart-storage", json)              │
//! │                                            │                            │
//! │                                   Err? ──► warn!, keep going           │
//! │                                                                         │
//! │  Snapshots are queued while the lock is held, so the writer sees       │
//! │  them in mutation order. flush() waits for the queue to drain.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard};

use bazaar_core::error::CartResult;
use bazaar_core::{Cart, CartPolicy, CartSnapshot, Money, Product, QuantityUpdate};
use bazaar_db::KeyValueStore;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

#[derive(Debug)]
enum WriterMessage {
    Persist(String),
    Flush(oneshot::Sender<()>),
}

/// Shared cart state with write-behind persistence.
///
/// ## Usage
/// ```rust,ignore
/// let store = CartStore::load(Arc::new(db.kv_store()), "cart-storage", policy).await;
/// store.add_item(&product, 1)?;
/// store.flush().await;
/// ```
#[derive(Debug, Clone)]
pub struct CartStore {
    cart: Arc<Mutex<Cart>>,
    writer: mpsc::UnboundedSender<WriterMessage>,
}

impl CartStore {
    /// Rehydrates the cart from `storage` and starts the snapshot writer.
    ///
    /// A missing, unreadable or incompatible snapshot is logged and the
    /// store starts empty. Lines breaking cart invariants are dropped.
    ///
    /// Must be called inside a Tokio runtime.
    pub async fn load(
        storage: Arc<dyn KeyValueStore>,
        key: impl Into<String>,
        policy: CartPolicy,
    ) -> Self {
        let key = key.into();
        let cart = rehydrate(storage.as_ref(), &key, policy).await;

        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run_writer(storage, key, rx));

        CartStore {
            cart: Arc::new(Mutex::new(cart)),
            writer: tx,
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds `quantity` units of `product`, merging with an existing line.
    pub fn add_item(&self, product: &Product, quantity: i64) -> CartResult<()> {
        debug!(product_id = %product.id, quantity, "add_item");
        self.mutate(|cart| cart.add_item(product, quantity).map(|()| ((), true)))
    }

    /// Removes the line for `product_id`. Returns whether a line existed.
    pub fn remove_item(&self, product_id: &str) -> bool {
        debug!(product_id = %product_id, "remove_item");
        self.mutate_infallible(|cart| cart.remove_item(product_id))
    }

    /// Sets a line's quantity; zero or negative removes the line.
    pub fn update_quantity(&self, product_id: &str, quantity: i64) -> CartResult<QuantityUpdate> {
        debug!(product_id = %product_id, quantity, "update_quantity");
        self.mutate(|cart| {
            let outcome = cart.update_quantity(product_id, quantity)?;
            Ok((outcome, outcome != QuantityUpdate::NotInCart))
        })
    }

    /// Empties the cart.
    pub fn clear(&self) {
        debug!("clear");
        self.mutate_infallible(|cart| {
            let had_lines = !cart.is_empty();
            cart.clear();
            had_lines
        });
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Sum of line totals, before tax and shipping.
    pub fn total(&self) -> Money {
        self.with_cart(Cart::total)
    }

    /// Sum of quantities across lines.
    pub fn item_count(&self) -> i64 {
        self.with_cart(Cart::item_count)
    }

    pub fn snapshot(&self) -> CartSnapshot {
        self.with_cart(Cart::snapshot)
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let summary = store.with_cart(|cart| OrderSummary::from_cart(cart, rate));
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        f(&*self.lock())
    }

    /// Waits until every queued snapshot has been written (or has failed).
    pub async fn flush(&self) {
        let (done_tx, done_rx) = oneshot::channel();
        if self.writer.send(WriterMessage::Flush(done_tx)).is_err() {
            warn!("Cart writer has stopped; nothing to flush");
            return;
        }
        let _ = done_rx.await;
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn lock(&self) -> MutexGuard<'_, Cart> {
        // Cart operations don't panic, but a poisoned lock still holds a
        // consistent cart.
        self.cart.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Runs `op` under the lock. `op` returns its result and whether it
    /// changed the cart; a snapshot is queued only for changes.
    fn mutate<T>(&self, op: impl FnOnce(&mut Cart) -> CartResult<(T, bool)>) -> CartResult<T> {
        let mut cart = self.lock();
        let (result, changed) = op(&mut cart)?;
        if changed {
            self.persist(&cart);
        }
        Ok(result)
    }

    /// Like [`CartStore::mutate`] for operations that cannot fail. Returns
    /// whether the cart changed.
    fn mutate_infallible(&self, op: impl FnOnce(&mut Cart) -> bool) -> bool {
        let mut cart = self.lock();
        let changed = op(&mut cart);
        if changed {
            self.persist(&cart);
        }
        changed
    }

    /// Queues a snapshot of `cart`. Callers hold the lock, which keeps
    /// snapshots in mutation order.
    fn persist(&self, cart: &Cart) {
        match cart.snapshot().encode() {
            Ok(json) => {
                if self.writer.send(WriterMessage::Persist(json)).is_err() {
                    warn!("Cart writer has stopped; snapshot not persisted");
                }
            }
            Err(e) => warn!(error = %e, "Failed to encode cart snapshot"),
        }
    }
}

async fn rehydrate(storage: &dyn KeyValueStore, key: &str, policy: CartPolicy) -> Cart {
    let raw = match storage.get(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key = %key, "No cart snapshot, starting empty");
            return Cart::with_policy(policy);
        }
        Err(e) => {
            warn!(key = %key, error = %e, "Failed to read cart snapshot, starting empty");
            return Cart::with_policy(policy);
        }
    };

    match CartSnapshot::decode(&raw) {
        Ok(snapshot) => {
            let stored = snapshot.len();
            let cart = Cart::from_lines(snapshot.into_lines(), policy);
            if cart.line_count() < stored {
                warn!(
                    dropped = stored - cart.line_count(),
                    "Dropped invalid lines from cart snapshot"
                );
            }
            info!(lines = cart.line_count(), items = cart.item_count(), "Cart rehydrated");
            cart
        }
        Err(e) => {
            warn!(key = %key, error = %e, "Unreadable cart snapshot, starting empty");
            Cart::with_policy(policy)
        }
    }
}

async fn run_writer(
    storage: Arc<dyn KeyValueStore>,
    key: String,
    mut rx: mpsc::UnboundedReceiver<WriterMessage>,
) {
    while let Some(message) = rx.recv().await {
        match message {
            WriterMessage::Persist(json) => {
                if let Err(e) = storage.set(&key, &json).await {
                    warn!(key = %key, error = %e, "Failed to persist cart snapshot");
                }
            }
            WriterMessage::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
    debug!("Cart writer stopped");
}

// =============================================================================
// Unit Tests
// =============================================================================
