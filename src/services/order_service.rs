use chrono::Utc;
use rust_decimal::Decimal;

use crate::{
    audit::log_audit,
    error::{AppError, AppResult},
    models::{Document, INITIAL_ORDER_STATUS, Order, OrderLine},
    store::Store,
};

/// Sum of `price × qty` over the snapshot, using current prices. Lines whose
/// product no longer resolves contribute nothing. `None` when the sum does
/// not fit a `Decimal`.
pub fn snapshot_total(doc: &Document, items: &[OrderLine]) -> Option<Decimal> {
    items
        .iter()
        .filter_map(|line| doc.product(line.product_id).map(|product| (product, line.qty)))
        .try_fold(Decimal::ZERO, |total, (product, qty)| {
            product
                .price
                .checked_mul(Decimal::from(qty))
                .and_then(|subtotal| total.checked_add(subtotal))
        })
}

/// Turns the cart into a new order owned by the session user (if any) and
/// empties the cart.
pub fn place_order(store: &mut Store) -> AppResult<Order> {
    if store.document().cart.is_empty() {
        return Err(AppError::bad_request("Cart is empty"));
    }

    let order = store.mutate(|doc| {
        let id = doc.seq.next_order();
        let items: Vec<OrderLine> = doc
            .cart
            .iter()
            .map(|line| OrderLine {
                product_id: line.product_id,
                qty: line.qty,
            })
            .collect();
        let total = snapshot_total(doc, &items)
            .ok_or_else(|| AppError::bad_request("Order total is too large"))?;

        let order = Order {
            id,
            number: Order::display_number(id),
            user_id: doc.session.user_id,
            items,
            total,
            created_at: Utc::now(),
            status: INITIAL_ORDER_STATUS.to_string(),
        };
        doc.orders.insert(0, order.clone());
        doc.cart.clear();
        Ok(order)
    })?;

    log_audit(
        order.user_id,
        "checkout",
        Some("orders"),
        Some(serde_json::json!({ "order_id": order.id, "total": order.total.to_string() })),
    );
    Ok(order)
}
