use rust_decimal::Decimal;

use crate::{
    audit::log_audit,
    error::{AppError, AppResult},
    models::{CartLine, Document, MAX_LINE_QUANTITY, Product, ProductId},
    store::Store,
};

/// A cart line joined with the product it references.
#[derive(Debug, Clone)]
pub struct ResolvedLine<'a> {
    pub product: &'a Product,
    pub qty: u32,
}

impl ResolvedLine<'_> {
    /// Saturates at `Decimal::MAX` instead of overflowing.
    pub fn subtotal(&self) -> Decimal {
        self.product.price.saturating_mul(Decimal::from(self.qty))
    }
}

fn ensure_positive(quantity: u32) -> AppResult<()> {
    if quantity == 0 {
        return Err(AppError::bad_request("quantity must be greater than 0"));
    }
    Ok(())
}

/// Adds `quantity` of a product, accumulating into an existing line. A line
/// never holds more than [`MAX_LINE_QUANTITY`].
pub fn add_to_cart(store: &mut Store, product_id: ProductId, quantity: u32) -> AppResult<CartLine> {
    ensure_positive(quantity)?;
    let quantity = quantity.min(MAX_LINE_QUANTITY);

    let line = store.mutate(|doc| {
        let line = match doc.cart.iter_mut().find(|line| line.product_id == product_id) {
            Some(line) => {
                line.qty = line.qty.saturating_add(quantity).min(MAX_LINE_QUANTITY);
                line.clone()
            }
            None => {
                let line = CartLine {
                    product_id,
                    qty: quantity,
                };
                doc.cart.push(line.clone());
                line
            }
        };
        Ok(line)
    })?;

    log_audit(
        store.document().session.user_id,
        "cart_update",
        Some("cart"),
        Some(serde_json::json!({ "product_id": product_id, "quantity": line.qty })),
    );
    Ok(line)
}

/// Replaces the quantity of an existing line. Returns `None` when the product
/// is not in the cart; nothing is written in that case.
pub fn set_cart_line_quantity(
    store: &mut Store,
    product_id: ProductId,
    quantity: u32,
) -> AppResult<Option<CartLine>> {
    ensure_positive(quantity)?;
    let quantity = quantity.min(MAX_LINE_QUANTITY);

    if !store.document().cart.iter().any(|line| line.product_id == product_id) {
        return Ok(None);
    }

    let line = store.mutate(|doc| {
        let line = doc
            .cart
            .iter_mut()
            .find(|line| line.product_id == product_id)
            .ok_or(AppError::NotFound)?;
        line.qty = quantity;
        Ok(line.clone())
    })?;

    log_audit(
        store.document().session.user_id,
        "cart_update",
        Some("cart"),
        Some(serde_json::json!({ "product_id": product_id, "quantity": quantity })),
    );
    Ok(Some(line))
}

/// Removes the line for a product. Removing an absent line is not an error.
pub fn remove_cart_line(store: &mut Store, product_id: ProductId) -> AppResult<bool> {
    if !store.document().cart.iter().any(|line| line.product_id == product_id) {
        return Ok(false);
    }

    store.mutate(|doc| {
        doc.cart.retain(|line| line.product_id != product_id);
        Ok(())
    })?;

    log_audit(
        store.document().session.user_id,
        "cart_remove",
        Some("cart"),
        Some(serde_json::json!({ "product_id": product_id })),
    );
    Ok(true)
}

/// Cart lines whose product still exists, in cart order.
pub fn resolved_lines(doc: &Document) -> Vec<ResolvedLine<'_>> {
    doc.cart
        .iter()
        .filter_map(|line| {
            doc.product(line.product_id).map(|product| ResolvedLine {
                product,
                qty: line.qty,
            })
        })
        .collect()
}

pub fn cart_total(lines: &[ResolvedLine<'_>]) -> Decimal {
    lines
        .iter()
        .map(ResolvedLine::subtotal)
        .fold(Decimal::ZERO, Decimal::saturating_add)
}
