use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{get, post},
};

use crate::{
    dto::actions::ActionRequest,
    error::AppResult,
    response::{ApiResponse, Meta},
    routes::params::NavigateQuery,
    state::AppState,
    views::{Page, View},
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/navigate", get(navigate))
        .route("/actions", post(dispatch_action))
        .route("/demo/reset", post(reset_demo))
}

/// Number of listed items for list-like views.
fn listed(page: &Page) -> Option<usize> {
    match &page.view {
        View::Home(home) => Some(home.featured.len()),
        View::Catalog(catalog) => Some(catalog.result_count),
        View::Cart(cart) => Some(cart.lines.len()),
        View::Orders(orders) => Some(orders.orders.len()),
        View::Seller(seller) => Some(seller.products.len()),
        _ => None,
    }
}

fn page_response(message: &str, page: Page, schema_version: u32) -> ApiResponse<Page> {
    let meta = Meta::new(schema_version, listed(&page));
    ApiResponse::success(message, page, Some(meta))
}

#[utoipa::path(
    get,
    path = "/api/navigate",
    params(NavigateQuery),
    responses(
        (status = 200, description = "Rendered page for a location fragment", body = ApiResponse<Page>)
    ),
    tag = "Navigation"
)]
pub async fn navigate(
    State(state): State<AppState>,
    Query(query): Query<NavigateQuery>,
) -> AppResult<Json<ApiResponse<Page>>> {
    let storefront = state.storefront()?;
    let page = storefront.navigate(query.fragment());
    let version = storefront.document().version;
    Ok(Json(page_response("OK", page, version)))
}

#[utoipa::path(
    post,
    path = "/api/actions",
    request_body = ActionRequest,
    responses(
        (status = 200, description = "Action applied; page after re-render or redirect", body = ApiResponse<Page>),
        (status = 400, description = "Validation rejection"),
        (status = 401, description = "Invalid credentials"),
    ),
    tag = "Navigation"
)]
pub async fn dispatch_action(
    State(state): State<AppState>,
    Json(payload): Json<ActionRequest>,
) -> AppResult<Json<ApiResponse<Page>>> {
    let mut storefront = state.storefront()?;
    let page = storefront.dispatch(&payload.fragment, payload.action)?;
    let version = storefront.document().version;
    Ok(Json(page_response("Action applied", page, version)))
}

#[utoipa::path(
    post,
    path = "/api/demo/reset",
    responses(
        (status = 200, description = "Demo data reseeded", body = ApiResponse<Page>)
    ),
    tag = "Demo"
)]
pub async fn reset_demo(State(state): State<AppState>) -> AppResult<Json<ApiResponse<Page>>> {
    let mut storefront = state.storefront()?;
    let page = storefront.reset_demo()?;
    let version = storefront.document().version;
    Ok(Json(page_response("Demo reset", page, version)))
}
