//! Midnight Dream Storefront - demo binary.
//!
//! Builds the application from persisted state and writes the rendered
//! storefront page to the output directory. There is no HTTP server: the
//! demo is a static rendering of whatever state survived previous runs.
//!
//! # Architecture
//!
//! - Askama templates for rendering
//! - Key-value file store standing in for browser `localStorage`
//! - Simulated order gateway and auth backend behind traits

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::fs;
use std::sync::Arc;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use askama::Template;

use midnight_dream_storefront::app::App;
use midnight_dream_storefront::cart::view::{CartCountTemplate, CartItemsTemplate, badge_label};
use midnight_dream_storefront::catalog::Catalog;
use midnight_dream_storefront::checkout::MockOrderGateway;
use midnight_dream_storefront::config::StorefrontConfig;
use midnight_dream_storefront::error::Result;
use midnight_dream_storefront::notify::TracingSink;
use midnight_dream_storefront::services::auth::MockAuthBackend;
use midnight_dream_storefront::storage::JsonFileStore;

#[tokio::main]
async fn main() {
    // Initialize tracing with EnvFilter; defaults to info level for our
    // crate if RUST_LOG is not set.
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "midnight_dream_storefront=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = StorefrontConfig::from_env().expect("Failed to load configuration");

    if let Err(e) = run(config).await {
        tracing::error!("storefront demo failed: {e}");
        std::process::exit(1);
    }
}

async fn run(config: StorefrontConfig) -> Result<()> {
    let store = Arc::new(JsonFileStore::new(&config.data_dir));
    let sink = Arc::new(TracingSink);
    let catalog = Catalog::load_default()?;

    let gateway = MockOrderGateway::new(config.checkout_latency);
    let backend = MockAuthBackend::new(config.auth_latency, config.auth_failure_rate);

    let app = App::new(catalog, store, sink, gateway, backend);
    tracing::info!(
        items = app.cart().total_items(),
        signed_in = app.auth().is_authenticated(),
        "application initialized"
    );

    let html = app.render_index()?;
    fs::create_dir_all(&config.out_dir)?;
    let out_path = config.out_dir.join("index.html");
    fs::write(&out_path, html)?;

    // Standalone fragments, for consumers that swap parts of the page.
    let fragments_dir = config.out_dir.join("fragments");
    fs::create_dir_all(&fragments_dir)?;
    let items = CartItemsTemplate {
        cart: app.cart().view(),
    };
    fs::write(fragments_dir.join("cart_items.html"), items.render()?)?;
    let count = CartCountTemplate {
        badge: badge_label(app.cart().total_items()),
    };
    fs::write(fragments_dir.join("cart_count.html"), count.render()?)?;

    tracing::info!(path = %out_path.display(), "storefront rendered");
    Ok(())
}
