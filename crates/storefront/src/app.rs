//! Application root and event wiring.
//!
//! [`App`] owns the cart engine, auth service, catalog, and UI state, and is
//! handed by reference to whatever needs them - nothing is looked up through
//! ambient globals. User gestures arrive as typed [`UiEvent`]s; the original
//! demo's delegated DOM listeners map one-to-one onto the variants here.

use std::sync::Arc;

use askama::Template;
use tracing::instrument;

use midnight_dream_core::ProductId;

use crate::cart::view::badge_label;
use crate::cart::{CartEngine, MAX_QUANTITY};
use crate::catalog::{Catalog, CategoryFilter, SortKey};
use crate::checkout::OrderGateway;
use crate::notify::NotificationSink;
use crate::render::{AuthModalView, HeaderView, IndexTemplate, ProductCardView};
use crate::services::auth::{AuthBackend, AuthService};
use crate::storage::KeyValueStore;
use crate::ui::{AuthTab, ModalKind, UiState};

/// A user gesture, as delivered by the event layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// An add-to-cart control was activated on a product card.
    AddToCart { product_id: ProductId },
    /// A cart row's remove control was activated.
    RemoveCartItem { product_id: ProductId },
    /// A cart row's quantity stepper was incremented.
    IncrementQuantity { product_id: ProductId },
    /// A cart row's quantity stepper was decremented.
    DecrementQuantity { product_id: ProductId },
    /// A cart row's quantity field was edited directly.
    EditQuantity { product_id: ProductId, value: String },
    /// The checkout control was activated.
    Checkout,
    /// The header's cart button was activated.
    ToggleCart,
    /// The header's auth button was activated: opens the auth modal, or logs
    /// out when a user is signed in.
    AuthButton,
    /// An auth modal tab was selected.
    SwitchAuthTab(AuthTab),
    /// The login form was submitted.
    SubmitLogin { email: String, password: String },
    /// The register form was submitted.
    SubmitRegister {
        name: String,
        email: String,
        password: String,
    },
    /// The grid's category filter changed.
    FilterCategory(CategoryFilter),
    /// The grid's sort order changed.
    SortProducts(SortKey),
    /// A close control or the overlay was activated.
    CloseAll,
    /// The Escape key was pressed.
    Escape,
}

/// The application root.
///
/// Constructed once at startup; every component hangs off it explicitly.
pub struct App<G, B> {
    catalog: Catalog,
    cart: CartEngine<G>,
    auth: AuthService<B>,
    ui: UiState,
}

impl<G: OrderGateway, B: AuthBackend> App<G, B> {
    /// Build the application: hydrates the cart and any signed-in user from
    /// `store`.
    pub fn new(
        catalog: Catalog,
        store: Arc<dyn KeyValueStore>,
        sink: Arc<dyn NotificationSink>,
        gateway: G,
        backend: B,
    ) -> Self {
        let cart = CartEngine::new(store.clone(), sink.clone(), gateway);
        let auth = AuthService::new(store, sink, backend);
        Self {
            catalog,
            cart,
            auth,
            ui: UiState::new(),
        }
    }

    /// The product catalog.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The cart engine.
    #[must_use]
    pub const fn cart(&self) -> &CartEngine<G> {
        &self.cart
    }

    /// The auth service.
    #[must_use]
    pub const fn auth(&self) -> &AuthService<B> {
        &self.auth
    }

    /// The UI visibility state.
    #[must_use]
    pub const fn ui(&self) -> &UiState {
        &self.ui
    }

    /// Dispatch a user gesture. Callers re-render from the updated state
    /// afterwards; operations that reject invalid input simply leave state
    /// unchanged, so the re-render restores whatever the user clobbered.
    #[instrument(skip(self))]
    pub async fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::AddToCart { product_id } => {
                // Unknown ids come from stale markup; ignore them.
                if let Some(product) = self.catalog.product(product_id) {
                    self.cart.add_item(product, 1);
                } else {
                    tracing::debug!(%product_id, "add-to-cart for unknown product");
                }
            }
            UiEvent::RemoveCartItem { product_id } => self.cart.remove_item(product_id),
            UiEvent::IncrementQuantity { product_id } => {
                self.step_quantity(product_id, 1);
            }
            UiEvent::DecrementQuantity { product_id } => {
                self.step_quantity(product_id, -1);
            }
            UiEvent::EditQuantity { product_id, value } => {
                if let Ok(quantity) = value.trim().parse::<u32>() {
                    let _ = self.cart.update_quantity(product_id, quantity);
                }
                // Unparseable input is discarded by the re-render.
            }
            UiEvent::Checkout => {
                if self.cart.process_checkout().await.is_ok() {
                    self.ui.close_all();
                }
            }
            UiEvent::ToggleCart => self.ui.toggle(ModalKind::CartSidebar),
            UiEvent::AuthButton => {
                if self.auth.is_authenticated() {
                    self.auth.logout();
                } else {
                    self.ui.toggle(ModalKind::AuthModal);
                }
            }
            UiEvent::SwitchAuthTab(tab) => self.ui.switch_auth_tab(tab),
            UiEvent::SubmitLogin { email, password } => {
                match self.auth.login(&email, &password).await {
                    Ok(()) => self.ui.close_all(),
                    Err(e) => self.ui.set_auth_error(e.to_string()),
                }
            }
            UiEvent::SubmitRegister {
                name,
                email,
                password,
            } => match self.auth.register(&name, &email, &password).await {
                Ok(()) => self.ui.close_all(),
                Err(e) => self.ui.set_auth_error(e.to_string()),
            },
            UiEvent::FilterCategory(filter) => self.ui.set_filter(filter),
            UiEvent::SortProducts(sort) => self.ui.set_sort(sort),
            UiEvent::CloseAll | UiEvent::Escape => self.ui.close_all(),
        }
    }

    /// Stepper arithmetic: `current ± 1`, clamped to `[1, MAX_QUANTITY]`.
    fn step_quantity(&mut self, product_id: ProductId, delta: i32) {
        let Some(current) = self
            .cart
            .items()
            .iter()
            .find(|i| i.id == product_id)
            .map(|i| i.quantity)
        else {
            return;
        };

        let target = current
            .saturating_add_signed(delta)
            .clamp(1, MAX_QUANTITY);
        if target != current {
            let _ = self.cart.update_quantity(product_id, target);
        }
    }

    /// Render the assembled storefront page from current state.
    ///
    /// # Errors
    ///
    /// Returns an [`askama::Error`] if template rendering fails.
    pub fn render_index(&self) -> Result<String, askama::Error> {
        let classes = self.ui.classes();
        IndexTemplate {
            header: HeaderView {
                badge: badge_label(self.cart.total_items()),
                user_name: self.auth.current_user().map(|u| u.name.clone()),
            },
            cards: self
                .catalog
                .browse(self.ui.filter(), self.ui.sort())
                .into_iter()
                .map(ProductCardView::from)
                .collect(),
            cart: self.cart.view(),
            auth: AuthModalView {
                active: classes.auth_modal_active,
                login_tab: self.ui.auth_tab() == AuthTab::Login,
                error: self.ui.auth_error().map(ToOwned::to_owned),
            },
            classes,
        }
        .render()
    }
}
