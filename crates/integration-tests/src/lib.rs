//! Integration tests for Midnight Dream.
//!
//! Scenario tests drive the public library surface the way the UI would:
//! typed events in, rendered state out. All asynchronous collaborators are
//! deterministic doubles - no timers, no randomness - so tests assert on
//! exact outcomes.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use chrono::Utc;

use midnight_dream_core::OrderId;
use midnight_dream_storefront::app::App;
use midnight_dream_storefront::cart::CartItem;
use midnight_dream_storefront::catalog::Catalog;
use midnight_dream_storefront::checkout::{CheckoutError, OrderGateway, OrderReceipt};
use midnight_dream_storefront::notify::RecordingSink;
use midnight_dream_storefront::services::auth::MockAuthBackend;
use midnight_dream_storefront::storage::MemoryStore;

/// Deterministic order gateway: counts calls and settles with a scripted
/// outcome.
pub struct ScriptedGateway {
    outcome: Result<u32, String>,
    calls: AtomicU32,
}

impl ScriptedGateway {
    /// A gateway that accepts every order with the given order number.
    #[must_use]
    pub const fn accepting(order_number: u32) -> Self {
        Self {
            outcome: Ok(order_number),
            calls: AtomicU32::new(0),
        }
    }

    /// A gateway that rejects every order with the given message.
    #[must_use]
    pub fn rejecting(message: &str) -> Self {
        Self {
            outcome: Err(message.to_owned()),
            calls: AtomicU32::new(0),
        }
    }

    /// How many times the gateway was contacted.
    #[must_use]
    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl OrderGateway for &ScriptedGateway {
    async fn submit_order(&self, _items: &[CartItem]) -> Result<OrderReceipt, CheckoutError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Ok(number) => Ok(OrderReceipt {
                order_id: OrderId::from_number(*number),
                placed_at: Utc::now(),
            }),
            Err(message) => Err(CheckoutError::Rejected(message.clone())),
        }
    }
}

/// An auth backend that settles instantly and never fails.
#[must_use]
pub fn instant_auth() -> MockAuthBackend {
    MockAuthBackend::new(Duration::ZERO, 0.0)
}

/// An auth backend that settles instantly and always fails.
#[must_use]
pub fn failing_auth() -> MockAuthBackend {
    MockAuthBackend::new(Duration::ZERO, 1.0)
}

/// The bundled demo catalog.
///
/// # Panics
///
/// Panics if the bundled catalog data is malformed.
#[must_use]
pub fn demo_catalog() -> Catalog {
    Catalog::load_default().expect("bundled catalog must load")
}

/// A fully wired test application plus handles to its store and sink.
pub struct TestContext<'a> {
    pub app: App<&'a ScriptedGateway, MockAuthBackend>,
    pub store: Arc<MemoryStore>,
    pub sink: Arc<RecordingSink>,
}

/// Build an application over a fresh in-memory store.
#[must_use]
pub fn build_app(gateway: &ScriptedGateway) -> TestContext<'_> {
    build_app_with_store(gateway, Arc::new(MemoryStore::new()))
}

/// Build an application over an existing store, e.g. to simulate a reload.
#[must_use]
pub fn build_app_with_store(
    gateway: &ScriptedGateway,
    store: Arc<MemoryStore>,
) -> TestContext<'_> {
    let sink = Arc::new(RecordingSink::new());
    let app = App::new(
        demo_catalog(),
        store.clone(),
        sink.clone(),
        gateway,
        instant_auth(),
    );
    TestContext { app, store, sink }
}
