//! Unified error handling.
//!
//! Provides a unified `AppError` type for the storefront binary and library
//! entry points. Component operations keep their own error enums; this is
//! the umbrella they converge into at the application boundary.

use thiserror::Error;

use crate::cart::CartError;
use crate::catalog::CatalogError;
use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::services::auth::AuthError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration loading failed.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog data failed to load.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Storage operation failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Cart operation failed.
    #[error("cart error: {0}")]
    Cart(#[from] CartError),

    /// Checkout failed.
    #[error("checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Authentication operation failed.
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    /// Template rendering failed.
    #[error("template error: {0}")]
    Template(#[from] askama::Error),

    /// Filesystem I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::Checkout(CheckoutError::EmptyCart);
        assert_eq!(err.to_string(), "checkout error: your cart is empty");

        let err = AppError::Cart(CartError::InvalidQuantity(0));
        assert!(err.to_string().starts_with("cart error: quantity must be"));
    }
}
