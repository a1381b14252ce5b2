//! Storefront page assembly.
//!
//! The original demo fetched HTML partials and injected them at runtime;
//! here the partials are askama templates composed into a full page. Every
//! view struct is a pure projection of component state.

use askama::Template;

use crate::filters;

use crate::cart::view::CartView;
use crate::catalog::Product;
use crate::ui::UiClasses;

/// Product card display data for templates.
#[derive(Debug, Clone)]
pub struct ProductCardView {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image: String,
    pub category: String,
    pub is_new: bool,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i32(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.display(),
            image: product.image.clone(),
            category: product.category.as_str().to_owned(),
            is_new: product.is_new,
        }
    }
}

/// Header display data: cart badge plus auth button state.
#[derive(Debug, Clone)]
pub struct HeaderView {
    pub badge: Option<String>,
    pub user_name: Option<String>,
}

/// Auth modal display data.
#[derive(Debug, Clone)]
pub struct AuthModalView {
    pub active: bool,
    pub login_tab: bool,
    pub error: Option<String>,
}

/// Header fragment template.
#[derive(Template)]
#[template(path = "partials/header.html")]
pub struct HeaderTemplate {
    pub header: HeaderView,
}

/// Footer fragment template.
#[derive(Template)]
#[template(path = "partials/footer.html")]
pub struct FooterTemplate;

/// Product grid fragment template.
#[derive(Template)]
#[template(path = "partials/product_grid.html")]
pub struct ProductGridTemplate {
    pub cards: Vec<ProductCardView>,
}

/// Auth modal fragment template.
#[derive(Template)]
#[template(path = "partials/auth_modal.html")]
pub struct AuthModalTemplate {
    pub auth: AuthModalView,
}

/// The assembled storefront page.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub header: HeaderView,
    pub cards: Vec<ProductCardView>,
    pub cart: CartView,
    pub auth: AuthModalView,
    pub classes: UiClasses,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cart::view::badge_label;

    #[test]
    fn test_header_shows_badge_and_user() {
        let html = HeaderTemplate {
            header: HeaderView {
                badge: badge_label(3),
                user_name: Some("Wren".to_owned()),
            },
        }
        .render()
        .unwrap();
        assert!(html.contains(">3<"));
        assert!(html.contains("Wren"));
        assert!(html.contains("authenticated"));
    }

    #[test]
    fn test_header_signed_out() {
        let html = HeaderTemplate {
            header: HeaderView {
                badge: None,
                user_name: None,
            },
        }
        .render()
        .unwrap();
        assert!(html.contains("Sign in"));
        assert!(!html.contains("cart-count"));
    }

    #[test]
    fn test_product_grid_renders_cards() {
        let html = ProductGridTemplate {
            cards: vec![ProductCardView {
                id: 1,
                name: "Moonlight Fairy Dress".to_owned(),
                description: "Velvet and stars".to_owned(),
                price: "$34.99".to_owned(),
                image: "images/products/dress.jpg".to_owned(),
                category: "dresses".to_owned(),
                is_new: true,
            }],
        }
        .render()
        .unwrap();
        assert!(html.contains("Moonlight Fairy Dress"));
        assert!(html.contains("$34.99"));
        assert!(html.contains("NEW"));
        assert!(html.contains("data-id=\"1\""));
    }

    #[test]
    fn test_auth_modal_tab_and_error() {
        let html = AuthModalTemplate {
            auth: AuthModalView {
                active: true,
                login_tab: false,
                error: Some("fill in all fields".to_owned()),
            },
        }
        .render()
        .unwrap();
        assert!(html.contains("aria-hidden=\"false\""));
        assert!(html.contains("fill in all fields"));
    }
}
