use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    dto::{
        auth::{LoginRequest, RegisterRequest},
        products::CreateProductRequest,
    },
    models::{MAX_LINE_QUANTITY, ProductId},
};

/// A user interaction. Each variant triggers exactly one domain operation.
///
/// Quantities arrive unvalidated from form inputs and are clamped to at least
/// one before they reach the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    AddToCart {
        product_id: ProductId,
        #[serde(default)]
        quantity: Option<i64>,
    },
    SetCartLineQuantity {
        product_id: ProductId,
        #[serde(default)]
        quantity: Option<i64>,
    },
    RemoveCartLine {
        product_id: ProductId,
    },
    PlaceOrder,
    SubmitReview {
        product_id: ProductId,
        rating: i64,
        #[serde(default)]
        comment: String,
    },
    Login(LoginRequest),
    Register(RegisterRequest),
    Logout,
    CreateProduct(CreateProductRequest),
    BecomeSeller,
}

/// Names of the actions a form can submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    AddToCart,
    SetCartLineQuantity,
    RemoveCartLine,
    PlaceOrder,
    SubmitReview,
    Login,
    Register,
    Logout,
    CreateProduct,
    BecomeSeller,
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::AddToCart { .. } => ActionKind::AddToCart,
            Action::SetCartLineQuantity { .. } => ActionKind::SetCartLineQuantity,
            Action::RemoveCartLine { .. } => ActionKind::RemoveCartLine,
            Action::PlaceOrder => ActionKind::PlaceOrder,
            Action::SubmitReview { .. } => ActionKind::SubmitReview,
            Action::Login(_) => ActionKind::Login,
            Action::Register(_) => ActionKind::Register,
            Action::Logout => ActionKind::Logout,
            Action::CreateProduct(_) => ActionKind::CreateProduct,
            Action::BecomeSeller => ActionKind::BecomeSeller,
        }
    }
}

/// Clamps a raw form quantity into `1..=MAX_LINE_QUANTITY`.
pub fn clamp_quantity(raw: Option<i64>) -> u32 {
    let max = i64::from(MAX_LINE_QUANTITY);
    u32::try_from(raw.unwrap_or(1).clamp(1, max)).unwrap_or(MAX_LINE_QUANTITY)
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ActionRequest {
    /// Fragment the interaction happened on; re-rendered unless the action
    /// redirects.
    #[serde(default)]
    pub fragment: String,
    pub action: Action,
}
