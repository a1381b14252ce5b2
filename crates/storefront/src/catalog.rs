//! Product catalog loaded at startup.
//!
//! Products are read-only reference data. The cart copies a snapshot of the
//! fields it displays at add-time, so later catalog edits never retroactively
//! change what a cart shows.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use midnight_dream_core::{Price, ProductId};

/// The bundled catalog data the demo ships with.
const DEFAULT_PRODUCTS: &str = include_str!("../content/products.json");

/// Errors that can occur while loading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file is not valid JSON for the product schema.
    #[error("invalid product data: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two products share an id.
    #[error("duplicate product id: {0}")]
    DuplicateId(ProductId),

    /// A product carries a negative price.
    #[error("negative price on product {0}")]
    NegativePrice(ProductId),
}

/// A product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Dresses,
    Outerwear,
    Tops,
    Accessories,
}

impl Category {
    /// Lowercase identifier, as used in data files and markup attributes.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Dresses => "dresses",
            Self::Outerwear => "outerwear",
            Self::Tops => "tops",
            Self::Accessories => "accessories",
        }
    }

    /// Human-readable label for display.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Dresses => "Dresses",
            Self::Outerwear => "Outerwear",
            Self::Tops => "Tops",
            Self::Accessories => "Accessories",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A catalog product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub image: String,
    pub category: Category,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub is_new: bool,
}

/// Which products a grid view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    /// Every product.
    #[default]
    All,
    /// Only products in one category.
    Only(Category),
}

impl CategoryFilter {
    fn matches(self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => product.category == category,
        }
    }
}

/// How a grid view orders products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Catalog file order.
    #[default]
    Featured,
    PriceAscending,
    PriceDescending,
    /// New arrivals first, otherwise catalog order.
    Newest,
}

/// The product catalog.
///
/// Cheaply cloneable; the product list is shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Arc<Vec<Product>>,
}

impl Catalog {
    /// Load the catalog bundled under `content/products.json`.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the bundled data is malformed.
    pub fn load_default() -> Result<Self, CatalogError> {
        Self::from_json(DEFAULT_PRODUCTS)
    }

    /// Parse a catalog from a JSON array of products.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] on malformed JSON, duplicate ids, or
    /// negative prices.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(json)?;

        let mut seen = std::collections::HashSet::new();
        for product in &products {
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
            if product.price.amount.is_sign_negative() {
                return Err(CatalogError::NegativePrice(product.id));
            }
        }

        tracing::debug!(count = products.len(), "catalog loaded");
        Ok(Self {
            products: Arc::new(products),
        })
    }

    /// Look up a product by id.
    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// All products in catalog order.
    #[must_use]
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    /// Products matching `filter`, ordered by `sort`.
    #[must_use]
    pub fn browse(&self, filter: CategoryFilter, sort: SortKey) -> Vec<&Product> {
        let mut selected: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| filter.matches(p))
            .collect();

        match sort {
            SortKey::Featured => {}
            SortKey::PriceAscending => {
                selected.sort_by(|a, b| a.price.amount.cmp(&b.price.amount));
            }
            SortKey::PriceDescending => {
                selected.sort_by(|a, b| b.price.amount.cmp(&a.price.amount));
            }
            // Stable sort keeps catalog order within each group.
            SortKey::Newest => selected.sort_by_key(|p| !p.is_new),
        }

        selected
    }
}
