//! The cart state container.

use std::sync::Arc;

use rocket_cache::{storage_key, Cache, KeyValueStore};
use tokio::sync::{watch, Mutex};
use tracing::{debug, error, info, warn};

use crate::cart::{Cart, LineItem};
use crate::catalog::Product;
use crate::error::CartError;
use crate::ids::ProductId;
use crate::notify::{Notice, Notifier};
use crate::services::{ProductCatalog, StockLookup};

/// Namespace prefixed to every key this crate writes.
pub const STORAGE_NAMESPACE: &str = "@RocketShoes";

/// Key the cart snapshot is persisted under.
pub fn cart_storage_key() -> String {
    storage_key!(STORAGE_NAMESPACE, "cart")
}

/// Session-scoped cart store.
///
/// Holds the current [`Cart`], validates mutations against live stock and
/// writes a JSON snapshot to the key-value store after every successful
/// mutation. Construct one per session and hand it to consumers; nothing here
/// is global.
///
/// Mutations are serialized: each holds the store's mutation lock across its
/// lookups, so two overlapping `add_product` calls both land. Reads never
/// wait on that lock.
///
/// No operation returns an error. Rejections and failures end in a single
/// [`Notice`] sent to the notifier and leave the cart unchanged.
pub struct CartStore {
    cache: Cache<Arc<dyn KeyValueStore>>,
    stock: Arc<dyn StockLookup>,
    catalog: Arc<dyn ProductCatalog>,
    notifier: Arc<dyn Notifier>,
    key: String,
    state: watch::Sender<Cart>,
    mutation: Mutex<()>,
}

impl CartStore {
    /// Build a store, restoring the cart from `store`.
    ///
    /// A missing snapshot yields an empty cart. So does a snapshot that does
    /// not parse; the unreadable blob stays in place until the next commit
    /// overwrites it.
    pub fn restore(
        store: impl KeyValueStore + 'static,
        stock: impl StockLookup + 'static,
        catalog: impl ProductCatalog + 'static,
        notifier: impl Notifier + 'static,
    ) -> Self {
        let store: Arc<dyn KeyValueStore> = Arc::new(store);
        let cache = Cache::new(store);
        let key = cart_storage_key();

        let cart = match cache.get::<Vec<LineItem>>(&key) {
            Ok(Some(items)) => Cart::from_items(items),
            Ok(None) => Cart::new(),
            Err(e) => {
                warn!(key = %key, error = %e, "cart snapshot unreadable, starting empty");
                Cart::new()
            }
        };
        debug!(key = %key, lines = cart.len(), "cart restored");

        let (state, _) = watch::channel(cart);
        Self {
            cache,
            stock: Arc::new(stock),
            catalog: Arc::new(catalog),
            notifier: Arc::new(notifier),
            key,
            state,
            mutation: Mutex::new(()),
        }
    }

    /// Current line items.
    pub fn cart(&self) -> Cart {
        self.state.borrow().clone()
    }

    /// Watch the cart; the receiver sees every committed value.
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.state.subscribe()
    }

    /// Add one unit of a product, subject to stock.
    pub async fn add_product(&self, id: ProductId) {
        let _guard = self.mutation.lock().await;
        match self.try_add(id).await {
            Ok(cart) => {
                debug!(product_id = %id, amount = cart.amount_of(id), "product added");
                self.commit(cart);
            }
            Err(e) => self.reject("add", id, e, Notice::AddFailed),
        }
    }

    /// Remove a product's line entirely.
    pub async fn remove_product(&self, id: ProductId) {
        let _guard = self.mutation.lock().await;
        match self.try_remove(id) {
            Ok(cart) => {
                debug!(product_id = %id, "product removed");
                self.commit(cart);
            }
            Err(e) => self.reject("remove", id, e, Notice::RemoveFailed),
        }
    }

    /// Set a product's amount, subject to stock.
    ///
    /// Amounts below one are ignored without a lookup or a notice.
    pub async fn update_product_amount(&self, id: ProductId, amount: i64) {
        if amount <= 0 {
            debug!(product_id = %id, amount, "ignoring non-positive amount");
            return;
        }

        let _guard = self.mutation.lock().await;
        match self.try_update(id, amount).await {
            Ok(cart) => {
                debug!(product_id = %id, amount, "amount updated");
                self.commit(cart);
            }
            Err(e) => self.reject("update", id, e, Notice::UpdateFailed),
        }
    }

    async fn try_add(&self, id: ProductId) -> Result<Cart, CartError> {
        let cart = self.cart();
        // A restored line may already sit at the top of the range.
        let requested = cart.amount_of(id).checked_add(1);

        let stock = self.stock.stock(id).await?;
        match requested {
            Some(requested) if stock.allows(requested) => {}
            requested => {
                return Err(CartError::InsufficientStock {
                    product_id: id,
                    requested: requested.unwrap_or(i64::MAX),
                    available: stock.amount,
                });
            }
        }

        if cart.contains(id) {
            return Ok(cart.with_incremented(id));
        }

        let product = self.catalog.product(id).await?;
        // The line must carry the requested id whatever the catalog echoes.
        Ok(cart.with_product(Product { id, ..product }))
    }

    fn try_remove(&self, id: ProductId) -> Result<Cart, CartError> {
        let cart = self.cart();
        if !cart.contains(id) {
            return Err(CartError::ItemNotInCart(id));
        }
        Ok(cart.without(id))
    }

    async fn try_update(&self, id: ProductId, amount: i64) -> Result<Cart, CartError> {
        let stock = self.stock.stock(id).await?;
        if !stock.allows(amount) {
            return Err(CartError::InsufficientStock {
                product_id: id,
                requested: amount,
                available: stock.amount,
            });
        }
        self.cart().with_amount(id, amount)
    }

    fn reject(&self, op: &str, id: ProductId, err: CartError, failure: Notice) {
        let notice = if err.is_stock_rejection() {
            Notice::StockExceeded
        } else {
            failure
        };
        if err.is_stock_rejection() {
            info!(op, product_id = %id, reason = %err, "cart operation rejected");
        } else {
            warn!(op, product_id = %id, error = %err, "cart operation failed");
        }
        self.notifier.error(notice);
    }

    /// Publish `cart` and overwrite the persisted snapshot.
    ///
    /// A failed write does not roll back the in-memory cart; the next
    /// successful commit brings the snapshot back in line.
    fn commit(&self, cart: Cart) {
        let saved = self.cache.set(&self.key, &cart);
        self.state.send_replace(cart);

        if let Err(e) = saved {
            error!(key = %self.key, error = %e, "failed to persist cart snapshot");
            self.notifier.error(Notice::SaveFailed);
        }
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("key", &self.key)
            .field("cart", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}
