use std::str::FromStr;

use rust_decimal::Decimal;

use crate::{
    audit::log_audit,
    dto::products::CreateProductRequest,
    error::{AppError, AppResult},
    models::{Product, UserId},
    store::Store,
};

pub const DEFAULT_CATEGORY: &str = "Misc";

/// Highest price a seller can list a product at.
pub const MAX_PRICE: i64 = 1_000_000;

/// Client-side product filter shared by the catalog and the seller dashboard.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFilter {
    /// Case-insensitive substring of the title.
    pub q: Option<String>,
    pub category: Option<String>,
    /// Only applied when positive.
    pub max_price: Option<Decimal>,
}

impl ProductFilter {
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(q) = self.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            if !product.title.to_lowercase().contains(&q.to_lowercase()) {
                return false;
            }
        }
        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            if product.category != category {
                return false;
            }
        }
        if let Some(max_price) = self.max_price.filter(|p| p.is_sign_positive() && !p.is_zero()) {
            if product.price > max_price {
                return false;
            }
        }
        true
    }

    /// Recomputed from the full collection every time.
    pub fn apply<'a>(&self, products: impl IntoIterator<Item = &'a Product>) -> Vec<&'a Product> {
        products.into_iter().filter(|p| self.matches(p)).collect()
    }
}

/// Sorted distinct categories of a product collection.
pub fn categories<'a>(products: impl IntoIterator<Item = &'a Product>) -> Vec<String> {
    let mut categories: Vec<String> = products.into_iter().map(|p| p.category.clone()).collect();
    categories.sort();
    categories.dedup();
    categories
}

/// Converts through the shortest decimal rendering, so `19.99` stays `19.99`.
pub fn decimal_from_f64(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::from_str(&value.to_string())
        .or_else(|_| Decimal::from_scientific(&format!("{value:e}")))
        .ok()
}

fn parse_price(price: f64) -> AppResult<Decimal> {
    decimal_from_f64(price)
        .filter(|price| *price > Decimal::ZERO && *price <= Decimal::from(MAX_PRICE))
        .ok_or_else(|| AppError::bad_request("Provide title and valid price"))
}

/// Lists a new product owned by `seller_id` at the top of the catalog.
pub fn create_product(
    store: &mut Store,
    seller_id: UserId,
    payload: CreateProductRequest,
) -> AppResult<Product> {
    let title = payload.title.trim();
    if title.is_empty() {
        return Err(AppError::bad_request("Provide title and valid price"));
    }
    let price = parse_price(payload.price)?;
    let stock = u32::try_from(payload.stock.max(0)).unwrap_or(u32::MAX);
    let category = match payload.category.trim() {
        "" => DEFAULT_CATEGORY.to_string(),
        category => category.to_string(),
    };
    let description = payload.description.trim().to_string();
    let provided_image = payload.image.trim().to_string();

    let product = store.mutate(|doc| {
        let id = doc.seq.next_product();
        let image = if provided_image.is_empty() {
            format!("https://picsum.photos/seed/product{id}/800/600")
        } else {
            provided_image
        };
        let product = Product {
            id,
            title: title.to_string(),
            description,
            price,
            category,
            stock,
            rating: 4.0,
            image,
            image_local: None,
            owner_id: Some(seller_id),
        };
        doc.products.insert(0, product.clone());
        Ok(product)
    })?;

    log_audit(
        Some(seller_id),
        "product_create",
        Some("products"),
        Some(serde_json::json!({ "product_id": product.id })),
    );
    Ok(product)
}
