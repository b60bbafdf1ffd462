use utoipa::{OpenApi, openapi::OpenApi as OpenApiSpec};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        actions::{Action, ActionKind, ActionRequest},
        auth::{LoginRequest, RegisterRequest},
        cart::{
            LegacyAddToCartForm, LegacyAddToCartResponse, LegacyCartItem, LegacyCartSummary,
            LegacyRemoveForm, LegacyUpdateQuantityForm,
        },
        products::CreateProductRequest,
    },
    models::{CartLine, Order, OrderLine, Product, Review},
    response::{ApiResponse, Meta},
    routes::{cart, health, navigation, params},
    views::{
        Control, FilterState, Form, FormField, Header, NotFoundView, Page, ProductCard, View,
        account::{AuthView, OrderHistoryView, OrderRow, ProfileView},
        cart::{CartLineItem, CartView, CheckoutView, ConfirmationView},
        catalog::{CatalogView, HomeView},
        product::{ProductDetailView, ReviewItem},
        seller::SellerDashboardView,
    },
};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        navigation::navigate,
        navigation::dispatch_action,
        navigation::reset_demo,
        cart::view_cart,
        cart::add_to_cart,
        cart::update_quantity,
        cart::remove_item,
        cart::clear_cart
    ),
    components(
        schemas(
            Product,
            Review,
            CartLine,
            Order,
            OrderLine,
            Action,
            ActionKind,
            ActionRequest,
            LoginRequest,
            RegisterRequest,
            CreateProductRequest,
            LegacyAddToCartForm,
            LegacyAddToCartResponse,
            LegacyUpdateQuantityForm,
            LegacyRemoveForm,
            LegacyCartItem,
            LegacyCartSummary,
            params::NavigateQuery,
            health::HealthData,
            Page,
            Header,
            View,
            NotFoundView,
            Control,
            Form,
            FormField,
            ProductCard,
            FilterState,
            HomeView,
            CatalogView,
            ProductDetailView,
            ReviewItem,
            CartView,
            CartLineItem,
            CheckoutView,
            ConfirmationView,
            OrderHistoryView,
            OrderRow,
            AuthView,
            ProfileView,
            SellerDashboardView,
            Meta,
            ApiResponse<Page>,
            ApiResponse<health::HealthData>
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Navigation", description = "Render locations and dispatch storefront actions"),
        (name = "Demo", description = "Demo data maintenance"),
        (name = "Cart", description = "Legacy form cart endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
