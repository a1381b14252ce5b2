//! Cart display projections and fragment templates.
//!
//! Pure functions of engine state; all DOM-shaped concerns (disabled
//! controls, busy labels, the badge counter) are computed here so templates
//! stay logic-free.

use askama::Template;

use super::{CartEngine, CartItem, MAX_QUANTITY};

/// Cart item display data for templates.
#[derive(Debug, Clone)]
pub struct CartItemView {
    pub id: i32,
    pub name: String,
    pub category: String,
    pub image: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    /// The stepper's minus control, disabled at quantity 1.
    pub decrement_disabled: bool,
    /// The stepper's plus control, disabled at the quantity cap.
    pub increment_disabled: bool,
}

impl From<&CartItem> for CartItemView {
    fn from(item: &CartItem) -> Self {
        Self {
            id: item.id.as_i32(),
            name: item.name.clone(),
            category: item.category.label().to_owned(),
            image: item.image.clone(),
            quantity: item.quantity,
            price: item.price.display(),
            line_price: item.line_total().display(),
            decrement_disabled: item.quantity <= 1,
            increment_disabled: item.quantity >= MAX_QUANTITY,
        }
    }
}

/// Cart display data for templates.
#[derive(Debug, Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u32,
    pub checkout_pending: bool,
    pub checkout_disabled: bool,
}

impl CartView {
    /// Create an empty cart view.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            subtotal: "$0.00".to_owned(),
            item_count: 0,
            checkout_pending: false,
            checkout_disabled: true,
        }
    }
}

impl<G> CartEngine<G> {
    /// Project the engine's current state for rendering.
    #[must_use]
    pub fn view(&self) -> CartView {
        CartView {
            items: self.items.iter().map(CartItemView::from).collect(),
            subtotal: self.total_price().display(),
            item_count: self.total_items(),
            checkout_pending: self.checkout_pending,
            checkout_disabled: self.items.is_empty() || self.checkout_pending,
        }
    }
}

/// Header badge label for a total item count.
///
/// Hidden at zero; saturates to "99+" above the quantity cap.
#[must_use]
pub fn badge_label(total_items: u32) -> Option<String> {
    match total_items {
        0 => None,
        n if n > MAX_QUANTITY => Some(format!("{MAX_QUANTITY}+")),
        n => Some(n.to_string()),
    }
}

/// Cart items fragment template (item list plus summary panel).
#[derive(Template)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template.
#[derive(Template)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub badge: Option<String>,
}
