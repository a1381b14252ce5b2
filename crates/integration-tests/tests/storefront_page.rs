//! Rendered page scenarios: the assembled index as a projection of state.

#![allow(clippy::unwrap_used)]

use midnight_dream_core::ProductId;
use midnight_dream_integration_tests::{ScriptedGateway, build_app};
use midnight_dream_storefront::app::UiEvent;
use midnight_dream_storefront::cart::view::{CartItemsTemplate, CartView};
use midnight_dream_storefront::catalog::{Category, CategoryFilter, SortKey};

use askama::Template;

#[tokio::test]
async fn test_initial_page() {
    let gateway = ScriptedGateway::accepting(1);
    let ctx = build_app(&gateway);

    let html = ctx.app.render_index().unwrap();
    assert!(html.contains("Moonlight Fairy Dress"));
    assert!(html.contains("Your cart is empty"));
    // Empty cart: checkout disabled, no badge, signed out.
    assert!(html.contains("class=\"checkout-btn\" disabled"));
    assert!(!html.contains("cart-count"));
    assert!(html.contains("Sign in"));
    assert!(!html.contains("no-scroll"));
}

#[tokio::test]
async fn test_page_reflects_cart_contents() {
    let gateway = ScriptedGateway::accepting(1);
    let mut ctx = build_app(&gateway);
    let id = ProductId::new(1);

    ctx.app.handle_event(UiEvent::AddToCart { product_id: id }).await;
    ctx.app.handle_event(UiEvent::AddToCart { product_id: id }).await;
    ctx.app.handle_event(UiEvent::AddToCart { product_id: id }).await;
    ctx.app.handle_event(UiEvent::ToggleCart).await;

    let html = ctx.app.render_index().unwrap();
    assert!(html.contains("<span class=\"cart-count\">3</span>"));
    assert!(html.contains("cart-sidebar open"));
    assert!(html.contains("overlay active"));
    assert!(html.contains("no-scroll"));
    // One line item, quantity 3, line total 3 x $34.99.
    assert!(html.contains("value=\"3\""));
    assert!(html.contains("$104.97"));
    assert!(!html.contains("Your cart is empty"));
}

#[tokio::test]
async fn test_grid_filter_and_sort() {
    let gateway = ScriptedGateway::accepting(1);
    let mut ctx = build_app(&gateway);

    ctx.app
        .handle_event(UiEvent::SortProducts(SortKey::PriceAscending))
        .await;
    let html = ctx.app.render_index().unwrap();
    let cheapest = html.find("Spider Silk Scarf").unwrap();
    let priciest = html.find("Little Vampire Coat").unwrap();
    assert!(cheapest < priciest);

    ctx.app
        .handle_event(UiEvent::FilterCategory(CategoryFilter::Only(
            Category::Dresses,
        )))
        .await;
    let html = ctx.app.render_index().unwrap();
    assert!(html.contains("Moonlight Fairy Dress"));
    assert!(!html.contains("Spider Silk Scarf"));
}

#[tokio::test]
async fn test_auth_modal_rendering() {
    let gateway = ScriptedGateway::accepting(1);
    let mut ctx = build_app(&gateway);

    let html = ctx.app.render_index().unwrap();
    assert!(html.contains("aria-hidden=\"true\""));

    ctx.app.handle_event(UiEvent::AuthButton).await;
    ctx.app
        .handle_event(UiEvent::SubmitLogin {
            email: "bad".to_owned(),
            password: "pw".to_owned(),
        })
        .await;

    let html = ctx.app.render_index().unwrap();
    assert!(html.contains("auth-modal active"));
    assert!(html.contains("aria-hidden=\"false\""));
    assert!(html.contains("invalid email"));
}

#[tokio::test]
async fn test_signed_in_header() {
    let gateway = ScriptedGateway::accepting(1);
    let mut ctx = build_app(&gateway);

    ctx.app
        .handle_event(UiEvent::SubmitLogin {
            email: "morticia@example.com".to_owned(),
            password: "hunter2".to_owned(),
        })
        .await;

    let html = ctx.app.render_index().unwrap();
    assert!(html.contains("authenticated"));
    assert!(html.contains("morticia"));
    assert!(!html.contains("Sign in</span>"));
}

#[test]
fn test_busy_checkout_control() {
    // The pending flag only exists while the gateway call is in flight, so
    // the busy projection is exercised on a hand-built view.
    let cart = CartView {
        checkout_pending: true,
        checkout_disabled: true,
        ..CartView::empty()
    };
    let html = CartItemsTemplate { cart }.render().unwrap();
    assert!(html.contains("Processing"));
    assert!(html.contains("disabled"));
}
