//! The shopping cart engine.
//!
//! Owns the line-item collection, mirrors it to persistent storage after
//! every mutation, recomputes derived totals, and drives checkout against an
//! injected [`OrderGateway`]. Rendering is pulled by the caller through
//! [`view::CartView`] after each operation.

pub mod view;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use midnight_dream_core::{Price, ProductId};

use crate::catalog::{Category, Product};
use crate::checkout::{CheckoutError, OrderGateway, OrderReceipt};
use crate::notify::{Notification, NotificationSink};
use crate::storage::{KeyValueStore, keys};

/// Upper bound on any single line item's quantity.
pub const MAX_QUANTITY: u32 = 99;

/// A product snapshot plus quantity held in the cart.
///
/// The display fields are copied from the catalog at add-time so later
/// catalog changes don't retroactively alter what the cart shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub image: String,
    pub category: Category,
    pub quantity: u32,
}

impl CartItem {
    fn snapshot(product: &Product, quantity: u32) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            price: product.price,
            image: product.image.clone(),
            category: product.category,
            quantity,
        }
    }

    /// The line total (unit price times quantity).
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

/// Errors from cart mutations that carry user-visible meaning.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CartError {
    /// No line item exists for the given product id.
    #[error("no cart item with product id {0}")]
    UnknownItem(ProductId),

    /// Quantity outside `[1, MAX_QUANTITY]`.
    #[error("quantity must be between 1 and {MAX_QUANTITY}, got {0}")]
    InvalidQuantity(u32),
}

/// The cart engine.
///
/// Constructed once at application start; hydrates from the store's `cart`
/// key, discarding corrupt state. All mutation goes through the operations
/// below, each of which persists before returning.
pub struct CartEngine<G> {
    items: Vec<CartItem>,
    store: Arc<dyn KeyValueStore>,
    sink: Arc<dyn NotificationSink>,
    gateway: G,
    checkout_pending: bool,
}

impl<G> CartEngine<G> {
    /// Create a cart engine, hydrating prior state from `store`.
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        sink: Arc<dyn NotificationSink>,
        gateway: G,
    ) -> Self {
        let items = hydrate(store.as_ref());
        let mut engine = Self {
            items,
            store,
            sink,
            gateway,
            checkout_pending: false,
        };
        engine.repair_quantities();
        engine
    }

    /// The line items, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Whether the cart holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether a checkout is currently awaiting the order gateway.
    #[must_use]
    pub const fn checkout_pending(&self) -> bool {
        self.checkout_pending
    }

    /// Total number of units across all line items.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Sum of line totals.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Add `quantity` units of `product`.
    ///
    /// A no-op for zero quantity. An existing line item for the same product
    /// id absorbs the quantity instead of duplicating the entry; the summed
    /// quantity saturates at [`MAX_QUANTITY`].
    #[instrument(skip_all, fields(product = %product.id, quantity))]
    pub fn add_item(&mut self, product: &Product, quantity: u32) {
        if quantity == 0 {
            return;
        }

        if let Some(existing) = self.items.iter_mut().find(|i| i.id == product.id) {
            existing.quantity = existing.quantity.saturating_add(quantity).min(MAX_QUANTITY);
        } else {
            self.items
                .push(CartItem::snapshot(product, quantity.min(MAX_QUANTITY)));
        }

        self.persist();
        self.sink
            .notify(Notification::Success(format!("{} added to cart", product.name)));
    }

    /// Remove the line item for `id`. A no-op, with no notification, if the
    /// id is not in the cart.
    pub fn remove_item(&mut self, id: ProductId) {
        let Some(position) = self.items.iter().position(|i| i.id == id) else {
            return;
        };

        let removed = self.items.remove(position);
        self.persist();
        self.sink.notify(Notification::Success(format!(
            "{} removed from cart",
            removed.name
        )));
    }

    /// Set the quantity of the line item for `id`.
    ///
    /// Quantities above [`MAX_QUANTITY`] are rejected, not clamped; clamping
    /// is an add-time behavior only.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidQuantity`] for quantities outside
    /// `[1, MAX_QUANTITY]`, and [`CartError::UnknownItem`] for ids not in
    /// the cart. State is unchanged on error.
    pub fn update_quantity(&mut self, id: ProductId, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 || quantity > MAX_QUANTITY {
            return Err(CartError::InvalidQuantity(quantity));
        }

        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or(CartError::UnknownItem(id))?;

        if item.quantity == quantity {
            return Ok(());
        }

        item.quantity = quantity;
        self.persist();
        self.sink
            .notify(Notification::Info("Quantity updated".to_owned()));
        Ok(())
    }

    /// Empty the cart and persist the empty state.
    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
    }

    /// Drop lines whose persisted quantity fell outside `[1, MAX_QUANTITY]`.
    fn repair_quantities(&mut self) {
        let before = self.items.len();
        let mut clamped = false;

        self.items.retain(|i| i.quantity > 0);
        for item in &mut self.items {
            if item.quantity > MAX_QUANTITY {
                item.quantity = MAX_QUANTITY;
                clamped = true;
            }
        }

        if clamped || self.items.len() != before {
            tracing::warn!("persisted cart had out-of-range quantities, repaired");
            self.persist();
        }
    }

    fn persist(&self) {
        let payload = match serde_json::to_string(&self.items) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!("failed to serialize cart: {e}");
                return;
            }
        };

        if let Err(e) = self.store.set(keys::CART, &payload) {
            // In-memory state wins; storage is best-effort.
            tracing::warn!("failed to persist cart: {e}");
        }
    }
}

impl<G: OrderGateway> CartEngine<G> {
    /// Attempt to finalize the cart into an order.
    ///
    /// An empty cart fails immediately without contacting the gateway. While
    /// the gateway call is in flight the engine reports
    /// [`checkout_pending`](Self::checkout_pending), which the renderer
    /// projects as a disabled, busy checkout control; the flag is cleared on
    /// every path before this method returns. Success clears the cart and
    /// emits a notification carrying the order id; failure leaves the cart
    /// unmodified.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] or the gateway's rejection.
    #[instrument(skip_all, fields(lines = self.items.len()))]
    pub async fn process_checkout(&mut self) -> Result<OrderReceipt, CheckoutError> {
        if self.items.is_empty() {
            let err = CheckoutError::EmptyCart;
            self.sink.notify(Notification::Error(err.to_string()));
            return Err(err);
        }

        self.checkout_pending = true;
        let result = self.gateway.submit_order(&self.items).await;
        self.checkout_pending = false;

        match result {
            Ok(receipt) => {
                self.clear();
                self.sink.notify(Notification::Success(format!(
                    "Order placed! Number: {}",
                    receipt.order_id
                )));
                tracing::info!(order_id = %receipt.order_id, "checkout complete");
                Ok(receipt)
            }
            Err(err) => {
                self.sink.notify(Notification::Error(err.to_string()));
                Err(err)
            }
        }
    }
}

/// Read prior cart state from the store.
///
/// Corrupt payloads are discarded and the key cleared rather than left to
/// fail again on the next load.
fn hydrate(store: &dyn KeyValueStore) -> Vec<CartItem> {
    let payload = match store.get(keys::CART) {
        Ok(Some(payload)) => payload,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!("failed to read persisted cart: {e}");
            return Vec::new();
        }
    };

    match serde_json::from_str(&payload) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!("discarding corrupt persisted cart: {e}");
            if let Err(e) = store.remove(keys::CART) {
                tracing::warn!("failed to clear corrupt cart key: {e}");
            }
            Vec::new()
        }
    }
}
