use axum::{
    Form, Json, Router,
    extract::State,
    response::Redirect,
    routing::{get, post},
};

use crate::{
    dto::cart::{
        LegacyAddToCartForm, LegacyAddToCartResponse, LegacyCartSummary, LegacyRemoveForm,
        LegacyUpdateQuantityForm,
    },
    error::AppResult,
    state::AppState,
};

const CART_PATH: &str = "/cart";

/// Classic form endpoints, mounted at the site root rather than under `/api`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(CART_PATH, get(view_cart))
        .route("/cart/add", post(add_to_cart))
        .route("/cart/update-quantity", post(update_quantity))
        .route("/cart/remove", post(remove_item))
        .route("/cart/clear", post(clear_cart))
}

#[utoipa::path(
    get,
    path = "/cart",
    responses(
        (status = 200, description = "Legacy cart lines with shipping and tax", body = LegacyCartSummary),
    ),
    tag = "Cart"
)]
pub async fn view_cart(State(state): State<AppState>) -> AppResult<Json<LegacyCartSummary>> {
    let storefront = state.storefront()?;
    let cart = state.legacy_cart()?;
    Ok(Json(cart.summary(storefront.document())))
}

#[utoipa::path(
    post,
    path = "/cart/add",
    request_body(content = LegacyAddToCartForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Product added to the legacy cart", body = LegacyAddToCartResponse),
        (status = 400, description = "Malformed form, plain-text reason"),
    ),
    tag = "Cart"
)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    Form(form): Form<LegacyAddToCartForm>,
) -> AppResult<Json<LegacyAddToCartResponse>> {
    let cart_item_count = {
        let storefront = state.storefront()?;
        let mut cart = state.legacy_cart()?;
        cart.add(storefront.document(), form.product_id, form.quantity)
    };

    tracing::debug!(
        product_id = form.product_id,
        quantity = form.quantity,
        cart_item_count,
        "legacy cart add"
    );

    Ok(Json(LegacyAddToCartResponse {
        success: true,
        message: "Product added to cart successfully".to_string(),
        cart_item_count,
    }))
}

#[utoipa::path(
    post,
    path = "/cart/update-quantity",
    request_body(content = LegacyUpdateQuantityForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirects back to the cart"),
        (status = 400, description = "Malformed form, plain-text reason"),
    ),
    tag = "Cart"
)]
pub async fn update_quantity(
    State(state): State<AppState>,
    Form(form): Form<LegacyUpdateQuantityForm>,
) -> AppResult<Redirect> {
    let updated = state
        .legacy_cart()?
        .update_quantity(form.item_id, form.quantity);
    tracing::debug!(item_id = form.item_id, quantity = form.quantity, updated, "legacy cart update");
    Ok(Redirect::to(CART_PATH))
}

#[utoipa::path(
    post,
    path = "/cart/remove",
    request_body(content = LegacyRemoveForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Redirects back to the cart"),
        (status = 400, description = "Malformed form, plain-text reason"),
    ),
    tag = "Cart"
)]
pub async fn remove_item(
    State(state): State<AppState>,
    Form(form): Form<LegacyRemoveForm>,
) -> AppResult<Redirect> {
    let removed = state.legacy_cart()?.remove(form.item_id);
    tracing::debug!(item_id = form.item_id, removed, "legacy cart remove");
    Ok(Redirect::to(CART_PATH))
}

#[utoipa::path(
    post,
    path = "/cart/clear",
    responses(
        (status = 303, description = "Redirects back to the cart"),
    ),
    tag = "Cart"
)]
pub async fn clear_cart(State(state): State<AppState>) -> AppResult<Redirect> {
    state.legacy_cart()?.clear();
    Ok(Redirect::to(CART_PATH))
}
