//! Cart store: the [`Cart`] bound to local storage.
//!
//! The cart is read once at startup and written back in full after every
//! mutation. Neither direction ever fails from the caller's point of view:
//! a stored value that does not parse starts an empty cart, and write
//! failures are logged and dropped.

use tracing::{debug, error, warn};

use metriks_core::{Adjustment, Cart, CartSummary, ProductId, parse_quantity_input};

use crate::config::CART_STORAGE_KEY;
use crate::storage::Storage;

/// The cart plus the storage it is persisted to.
#[derive(Debug)]
pub struct CartStore<S: Storage> {
    cart: Cart,
    storage: S,
}

impl<S: Storage> CartStore<S> {
    /// Load the cart from `storage`.
    #[must_use]
    pub fn load(storage: S) -> Self {
        let cart = match storage.get_item(CART_STORAGE_KEY) {
            None => Cart::new(),
            Some(raw) => serde_json::from_str::<Cart>(&raw).unwrap_or_else(|e| {
                warn!(error = %e, "Stored cart is not valid, starting with an empty cart");
                Cart::new()
            }),
        };
        debug!(items = cart.distinct_items(), "Cart loaded");
        Self { cart, storage }
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub fn summary(&self) -> CartSummary {
        self.cart.summary()
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Give back the storage, e.g. to reopen the cart from it.
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }

    pub fn add(&mut self, id: ProductId, name: impl Into<String>) {
        self.cart.add(id, name);
        self.save();
    }

    pub fn remove(&mut self, id: &ProductId) {
        self.cart.remove(id);
        self.save();
    }

    pub fn adjust(&mut self, id: &ProductId, adjustment: Adjustment) {
        self.cart.adjust(id, adjustment);
        self.save();
    }

    pub fn set_quantity(&mut self, id: &ProductId, quantity: i64) {
        self.cart.set_quantity(id, quantity);
        self.save();
    }

    /// Apply the raw text of a quantity input.
    pub fn set_quantity_input(&mut self, id: &ProductId, raw: &str) {
        self.set_quantity(id, parse_quantity_input(raw));
    }

    fn save(&mut self) {
        let json = match serde_json::to_string(&self.cart) {
            Ok(json) => json,
            Err(e) => {
                error!(error = %e, "Failed to serialize cart");
                return;
            }
        };
        if let Err(e) = self.storage.set_item(CART_STORAGE_KEY, &json) {
            error!(error = %e, "Failed to persist cart");
        }
    }
}
