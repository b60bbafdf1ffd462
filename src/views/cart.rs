use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    dto::actions::{Action, ActionKind},
    models::Document,
    navigation::route::Route,
    services::cart_service::{cart_total, resolved_lines},
};

use super::{Control, Form, FormField, format_price};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CartLineItem {
    pub product_id: u64,
    pub title: String,
    pub qty: u32,
    pub unit_price: String,
    pub subtotal: String,
    pub set_quantity: Form,
    pub remove: Control,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CartView {
    pub lines: Vec<CartLineItem>,
    pub total: String,
    pub continue_href: String,
    pub checkout_href: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CheckoutView {
    pub total: String,
    pub shipping: Form,
    pub payment: Form,
    pub place_order: Control,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ConfirmationView {
    pub order_number: Option<String>,
    pub orders_href: String,
    pub catalog_href: String,
}

pub fn render_cart(doc: &Document) -> CartView {
    let lines = resolved_lines(doc);
    let total = cart_total(&lines);

    CartView {
        lines: lines
            .iter()
            .map(|line| CartLineItem {
                product_id: line.product.id,
                title: line.product.title.clone(),
                qty: line.qty,
                unit_price: format_price(line.product.price),
                subtotal: format_price(line.subtotal()),
                set_quantity: Form {
                    submit: ActionKind::SetCartLineQuantity,
                    label: "Qty".to_string(),
                    fields: vec![
                        FormField::new("product_id", "", line.product.id.to_string()),
                        FormField::new("quantity", "Qty", line.qty.to_string()),
                    ],
                },
                remove: Control::new(
                    "Remove",
                    Action::RemoveCartLine {
                        product_id: line.product.id,
                    },
                ),
            })
            .collect(),
        total: format_price(total),
        continue_href: Route::Catalog.fragment(),
        checkout_href: Route::Checkout.fragment(),
    }
}

/// Shipping and payment fields are collected for show only; no payment is
/// processed and nothing but the cart snapshot ends up in the order.
pub fn render_checkout(doc: &Document) -> CheckoutView {
    let name = doc
        .current_user()
        .map(|user| user.name.clone())
        .unwrap_or_default();
    let total = cart_total(&resolved_lines(doc));

    CheckoutView {
        total: format_price(total),
        shipping: Form {
            submit: ActionKind::PlaceOrder,
            label: "Shipping".to_string(),
            fields: vec![
                FormField::new("name", "Full name", name),
                FormField::new("phone", "Phone", ""),
                FormField::new("address", "Address", ""),
                FormField::new("city", "City", ""),
                FormField::new("zip", "ZIP", ""),
            ],
        },
        payment: Form {
            submit: ActionKind::PlaceOrder,
            label: "Payment".to_string(),
            fields: vec![
                FormField::new("card_number", "Card number", ""),
                FormField::new("card_exp", "Exp", ""),
                FormField::new("card_cvc", "CVC", ""),
            ],
        },
        place_order: Control::new("Place Order", Action::PlaceOrder),
    }
}

pub fn render_confirmation(doc: &Document) -> ConfirmationView {
    ConfirmationView {
        order_number: doc.latest_order().map(|order| order.number.clone()),
        orders_href: Route::Orders.fragment(),
        catalog_href: Route::Catalog.fragment(),
    }
}
