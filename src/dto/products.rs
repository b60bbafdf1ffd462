use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

fn default_stock() -> i64 {
    10
}

/// Seller form input. Raw numbers are validated by the product service.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, ToSchema)]
pub struct CreateProductRequest {
    pub title: String,
    pub price: f64,
    #[serde(default = "default_stock")]
    pub stock: i64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
}
