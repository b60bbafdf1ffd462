use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::store::migrations::CURRENT_VERSION;

pub type ProductId = u64;
pub type UserId = u64;
pub type ReviewId = u64;
pub type OrderId = u64;

/// Products seeded without an owner belong to the demo seller account.
pub const DEFAULT_SELLER_ID: UserId = 2;

pub const INITIAL_ORDER_STATUS: &str = "Processing";

/// Upper bound for the quantity of a single cart line.
pub const MAX_LINE_QUANTITY: u32 = 9_999;

const DEFAULT_RATING: f64 = 4.0;

fn default_rating() -> f64 {
    DEFAULT_RATING
}

fn current_version() -> u32 {
    CURRENT_VERSION
}

/// Reads an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn round_within(raw: Option<f64>, min: f64, max: f64) -> f64 {
    match raw {
        Some(value) if value.is_finite() => value.round().clamp(min, max),
        _ => min,
    }
}

// Older documents may hold fractional or null numbers where the model keeps
// integers; they are rounded into range instead of failing the whole load.

fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let raw = Option::<f64>::deserialize(deserializer)?;
    Ok(round_within(raw, 0.0, f64::from(u32::MAX)) as u32)
}

fn lenient_line_quantity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let raw = Option::<f64>::deserialize(deserializer)?;
    Ok(round_within(raw, 1.0, f64::from(MAX_LINE_QUANTITY)) as u32)
}

fn lenient_review_rating<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let raw = Option::<f64>::deserialize(deserializer)?;
    Ok(round_within(raw, 1.0, 5.0) as u8)
}

fn lenient_product_rating<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let raw = Option::<f64>::deserialize(deserializer)?;
    Ok(raw.filter(|r| r.is_finite()).unwrap_or(DEFAULT_RATING))
}

/// An explicit `null` reads as `0`, which migrations treat as the first schema.
fn stored_version<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or(0))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub price: Decimal,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "lenient_count")]
    pub stock: u32,
    #[serde(default = "default_rating", deserialize_with = "lenient_product_rating")]
    pub rating: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_local: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<UserId>,
}

impl Product {
    pub fn owner(&self) -> UserId {
        self.owner_id.unwrap_or(DEFAULT_SELLER_ID)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Seller,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Seller => "seller",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    pub role: Role,
    #[serde(default, deserialize_with = "null_as_default")]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub user_id: UserId,
    #[serde(deserialize_with = "lenient_review_rating")]
    pub rating: u8,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: ProductId,
    #[serde(deserialize_with = "lenient_line_quantity")]
    pub qty: u32,
}

/// One snapshotted `(product, quantity)` pair of a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: ProductId,
    #[serde(deserialize_with = "lenient_count")]
    pub qty: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub number: String,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub items: Vec<OrderLine>,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
    pub status: String,
}

impl Order {
    pub fn display_number(id: OrderId) -> String {
        format!("#{id:06}")
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.items.iter().any(|line| line.product_id == product_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub user_id: Option<UserId>,
}

/// Next identifier to mint for each entity kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sequences {
    pub product: ProductId,
    pub user: UserId,
    pub review: ReviewId,
    pub order: OrderId,
}

impl Default for Sequences {
    fn default() -> Self {
        Self {
            product: 1,
            user: 1,
            review: 1,
            order: 1,
        }
    }
}

fn mint(counter: &mut u64) -> u64 {
    let id = *counter;
    *counter += 1;
    id
}

impl Sequences {
    pub fn next_product(&mut self) -> ProductId {
        mint(&mut self.product)
    }

    pub fn next_user(&mut self) -> UserId {
        mint(&mut self.user)
    }

    pub fn next_review(&mut self) -> ReviewId {
        mint(&mut self.review)
    }

    pub fn next_order(&mut self) -> OrderId {
        mint(&mut self.order)
    }
}

/// The single durable document holding every entity of the storefront.
///
/// Every field carries a serde default so that documents written by older
/// code deserialize with the missing parts filled in. Stored values win over
/// defaults, so a document without `version` is taken as current.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub cart: Vec<CartLine>,
    #[serde(default)]
    pub session: Session,
    #[serde(default)]
    pub seq: Sequences,
    #[serde(default = "current_version", deserialize_with = "stored_version")]
    pub version: u32,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            products: Vec::new(),
            users: Vec::new(),
            reviews: Vec::new(),
            orders: Vec::new(),
            cart: Vec::new(),
            session: Session::default(),
            seq: Sequences::default(),
            version: CURRENT_VERSION,
        }
    }
}

impl Document {
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.email == email)
    }

    /// The session user, if the pointer is set and still resolves.
    pub fn current_user(&self) -> Option<&User> {
        self.session.user_id.and_then(|id| self.user(id))
    }

    pub fn is_seller(&self) -> bool {
        self.current_user()
            .is_some_and(|user| user.role == Role::Seller)
    }

    /// Header badge value: total quantity across all cart lines.
    pub fn cart_count(&self) -> u64 {
        self.cart.iter().map(|line| u64::from(line.qty)).sum()
    }

    pub fn has_purchased(&self, user_id: UserId, product_id: ProductId) -> bool {
        self.orders
            .iter()
            .any(|order| order.user_id == Some(user_id) && order.contains(product_id))
    }

    pub fn orders_for(&self, user_id: UserId) -> impl Iterator<Item = &Order> {
        self.orders
            .iter()
            .filter(move |order| order.user_id == Some(user_id))
    }

    /// Orders are kept most-recent-first.
    pub fn latest_order(&self) -> Option<&Order> {
        self.orders.first()
    }

    pub fn reviews_for(&self, product_id: ProductId) -> impl Iterator<Item = &Review> {
        self.reviews
            .iter()
            .filter(move |review| review.product_id == product_id)
    }

    pub fn products_owned_by(&self, user_id: UserId) -> impl Iterator<Item = &Product> {
        self.products
            .iter()
            .filter(move |product| product.owner() == user_id)
    }
}
