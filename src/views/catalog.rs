use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    models::Document,
    navigation::route::{Location, Route},
    services::product_service::categories,
};

use super::{FilterState, ProductCard};

const FEATURED_COUNT: usize = 8;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HomeView {
    pub headline: String,
    pub shop_href: String,
    pub sell_href: String,
    pub featured: Vec<ProductCard>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CatalogView {
    pub filters: FilterState,
    pub result_count: usize,
    pub results_label: String,
    pub products: Vec<ProductCard>,
}

pub fn render_home(doc: &Document) -> HomeView {
    HomeView {
        headline: "Discover products you love".to_string(),
        shop_href: Route::Catalog.fragment(),
        sell_href: Route::Seller.fragment(),
        featured: doc
            .products
            .iter()
            .take(FEATURED_COUNT)
            .map(ProductCard::from_product)
            .collect(),
    }
}

pub fn render_catalog(doc: &Document, location: &Location) -> CatalogView {
    let filter = location.product_filter();
    let products: Vec<ProductCard> = filter
        .apply(&doc.products)
        .into_iter()
        .map(ProductCard::from_product)
        .collect();

    CatalogView {
        filters: FilterState::from_location(location, categories(&doc.products)),
        result_count: products.len(),
        results_label: format!("{} results", products.len()),
        products,
    }
}
