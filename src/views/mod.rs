//! View renderers.
//!
//! Every renderer is a pure function of the document and the parsed location
//! and returns a presentation tree. Interactive elements carry the [`Action`]
//! they trigger (or, for forms, the [`ActionKind`] they submit) so the shell
//! can post them back unchanged.

pub mod account;
pub mod cart;
pub mod catalog;
pub mod product;
pub mod seller;

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    dto::actions::{Action, ActionKind},
    models::{Document, Product},
    navigation::route::{Location, Route},
    services::review_service::star_count,
};

pub use self::{
    account::{AuthView, OrderHistoryView, ProfileView},
    cart::{CartView, CheckoutView, ConfirmationView},
    catalog::{CatalogView, HomeView},
    product::ProductDetailView,
    seller::SellerDashboardView,
};

pub fn format_price(amount: Decimal) -> String {
    format!("${amount:.2}")
}

pub fn star_text(stars: u8) -> String {
    let filled = usize::from(stars.min(5));
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Page {
    /// Fragment that was finally rendered.
    pub fragment: String,
    /// Set when a guard sent the navigation elsewhere.
    pub redirected_from: Option<String>,
    pub header: Header,
    pub view: View,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Header {
    pub account_label: String,
    pub account_href: String,
    pub show_seller_link: bool,
    pub cart_count: u64,
}

impl Header {
    pub fn from_document(doc: &Document) -> Self {
        let user = doc.current_user();
        Self {
            account_label: user.map_or_else(|| "Login".to_string(), |u| u.name.clone()),
            account_href: if user.is_some() {
                Route::Profile.fragment()
            } else {
                Route::Auth.fragment()
            },
            show_seller_link: doc.is_seller(),
            cart_count: doc.cart_count(),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum View {
    Home(HomeView),
    Catalog(CatalogView),
    Product(ProductDetailView),
    NotFound(NotFoundView),
    Cart(CartView),
    Checkout(CheckoutView),
    Confirmation(ConfirmationView),
    Orders(OrderHistoryView),
    Auth(AuthView),
    Profile(ProfileView),
    Seller(SellerDashboardView),
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NotFoundView {
    pub message: String,
}

/// A button bound to one fully specified action.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Control {
    pub label: String,
    pub action: Action,
}

impl Control {
    pub fn new(label: &str, action: Action) -> Self {
        Self {
            label: label.to_string(),
            action,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub value: String,
}

impl FormField {
    pub fn new(name: &str, label: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            value: value.into(),
        }
    }
}

/// A form whose fields become the payload of `submit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Form {
    pub submit: ActionKind,
    pub label: String,
    pub fields: Vec<FormField>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ProductCard {
    pub id: u64,
    pub title: String,
    pub price: String,
    pub image: String,
    pub image_fallback: Option<String>,
    pub stars: u8,
    pub rating_text: String,
    pub href: String,
    pub add_to_cart: Control,
}

impl ProductCard {
    pub fn from_product(product: &Product) -> Self {
        let stars = star_count(product.rating);
        Self {
            id: product.id,
            title: product.title.clone(),
            price: format_price(product.price),
            image: product.image.clone(),
            image_fallback: product.image_local.clone(),
            stars,
            rating_text: star_text(stars),
            href: Route::Product(Some(product.id)).fragment(),
            add_to_cart: Control::new(
                "Add",
                Action::AddToCart {
                    product_id: product.id,
                    quantity: Some(1),
                },
            ),
        }
    }
}

/// The filter controls shared by the catalog and the seller dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FilterState {
    pub q: String,
    pub category: String,
    pub max_price: String,
    pub categories: Vec<String>,
}

impl FilterState {
    pub fn from_location(location: &Location, categories: Vec<String>) -> Self {
        let echo = |name: &str| location.param(name).unwrap_or_default().to_string();
        Self {
            q: echo("q"),
            category: echo("category"),
            max_price: echo("max_price"),
            categories,
        }
    }
}

/// Picks and runs the renderer for an (already guarded) location.
pub fn render(doc: &Document, location: &Location) -> View {
    match location.route {
        Route::Home => View::Home(catalog::render_home(doc)),
        Route::Catalog => View::Catalog(catalog::render_catalog(doc, location)),
        Route::Product(id) => match id.and_then(|id| doc.product(id)) {
            Some(product) => View::Product(product::render_product(doc, product)),
            None => View::NotFound(NotFoundView {
                message: "Product not found.".to_string(),
            }),
        },
        Route::Cart => View::Cart(cart::render_cart(doc)),
        Route::Checkout => View::Checkout(cart::render_checkout(doc)),
        Route::Confirmation => View::Confirmation(cart::render_confirmation(doc)),
        Route::Orders => View::Orders(account::render_orders(doc)),
        Route::Auth => View::Auth(account::render_auth()),
        Route::Profile => match doc.current_user() {
            Some(user) => View::Profile(account::render_profile(user)),
            None => View::Auth(account::render_auth()),
        },
        Route::Seller => match doc.current_user() {
            Some(user) => View::Seller(seller::render_seller(doc, user, location)),
            None => View::Auth(account::render_auth()),
        },
    }
}
