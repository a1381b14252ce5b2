//! Order submission behind an injected asynchronous gateway.
//!
//! There is no real payment backend: the demo gateway sleeps a configured
//! latency and issues an order id. The trait contract still allows rejection
//! so the cart's failure path is honest and testable.

use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::Rng;
use thiserror::Error;

use midnight_dream_core::OrderId;

use crate::cart::CartItem;

/// Errors that can occur while finalizing an order.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// Checkout was attempted with nothing in the cart. The gateway is never
    /// contacted in this case.
    #[error("your cart is empty")]
    EmptyCart,

    /// The order backend rejected the submission.
    #[error("{0}")]
    Rejected(String),
}

/// Receipt for a successfully placed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderReceipt {
    pub order_id: OrderId,
    pub placed_at: DateTime<Utc>,
}

/// Asynchronous order backend.
///
/// Injected into the cart engine so tests can substitute deterministic
/// success or failure without timing dependence.
#[allow(async_fn_in_trait)]
pub trait OrderGateway {
    /// Submit the cart's items as an order.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Rejected`] if the backend refuses the order.
    async fn submit_order(&self, items: &[CartItem]) -> Result<OrderReceipt, CheckoutError>;
}

/// Simulated order backend: fixed latency, always succeeds.
#[derive(Debug, Clone)]
pub struct MockOrderGateway {
    latency: Duration,
}

impl MockOrderGateway {
    /// Create a gateway that settles after `latency`.
    #[must_use]
    pub const fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

impl OrderGateway for MockOrderGateway {
    async fn submit_order(&self, items: &[CartItem]) -> Result<OrderReceipt, CheckoutError> {
        tokio::time::sleep(self.latency).await;

        let order_id = OrderId::from_number(rand::rng().random_range(0..1_000_000));
        tracing::debug!(%order_id, lines = items.len(), "mock order accepted");

        Ok(OrderReceipt {
            order_id,
            placed_at: Utc::now(),
        })
    }
}
