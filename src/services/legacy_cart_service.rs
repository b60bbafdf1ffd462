//! Cart behind the classic `/cart/*` form endpoints.
//!
//! It lives next to the document cart and is never reconciled with it. Lines
//! hold product ids only; titles and prices are read from the catalog when a
//! summary is built.

use rust_decimal::Decimal;

use crate::{
    dto::cart::{LegacyCartItem, LegacyCartSummary},
    models::{Document, MAX_LINE_QUANTITY, ProductId},
};

/// Flat shipping fee charged on any non-empty cart.
pub const SHIPPING_FEE: i64 = 5;

/// Tax rate applied to the subtotal (5%).
pub fn tax_rate() -> Decimal {
    Decimal::new(5, 2)
}

fn clamp(quantity: i64) -> u32 {
    u32::try_from(quantity.clamp(1, i64::from(MAX_LINE_QUANTITY))).unwrap_or(MAX_LINE_QUANTITY)
}

#[derive(Debug, Clone, Default)]
pub struct LegacyCart {
    lines: Vec<(ProductId, u32)>,
}

impl LegacyCart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds to an existing line, or opens a new one when the catalog knows the
    /// product. Unknown products are ignored.
    pub fn add(&mut self, catalog: &Document, product_id: ProductId, quantity: i64) -> usize {
        let quantity = clamp(quantity);
        if let Some((_, qty)) = self.lines.iter_mut().find(|(id, _)| *id == product_id) {
            *qty = qty.saturating_add(quantity).min(MAX_LINE_QUANTITY);
        } else if catalog.product(product_id).is_some() {
            self.lines.push((product_id, quantity));
        } else {
            tracing::debug!(product_id, "legacy cart ignored unknown product");
        }
        self.item_count()
    }

    /// Replaces the quantity of an existing line; absent products are left
    /// alone. Returns whether a line changed.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) -> bool {
        match self.lines.iter_mut().find(|(id, _)| *id == product_id) {
            Some((_, qty)) => {
                *qty = clamp(quantity);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, product_id: ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|(id, _)| *id != product_id);
        self.lines.len() != before
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Lines priced against the catalog, plus shipping and tax. Lines whose
    /// product has left the catalog are skipped.
    pub fn summary(&self, catalog: &Document) -> LegacyCartSummary {
        let items: Vec<LegacyCartItem> = self
            .lines
            .iter()
            .filter_map(|(id, qty)| {
                catalog.product(*id).map(|product| LegacyCartItem {
                    id: product.id,
                    title: product.title.clone(),
                    image_url: product.image.clone(),
                    category_name: product.category.clone(),
                    unit_price: product.price,
                    quantity: *qty,
                    subtotal: product.price.saturating_mul(Decimal::from(*qty)),
                })
            })
            .collect();

        let subtotal = items
            .iter()
            .map(|item| item.subtotal)
            .fold(Decimal::ZERO, Decimal::saturating_add);
        let shipping = if subtotal > Decimal::ZERO {
            Decimal::from(SHIPPING_FEE)
        } else {
            Decimal::ZERO
        };
        let tax = subtotal.saturating_mul(tax_rate());
        let total = subtotal.saturating_add(shipping).saturating_add(tax);

        LegacyCartSummary {
            items,
            subtotal,
            shipping,
            tax,
            total,
        }
    }

    /// Number of distinct products in the cart.
    pub fn item_count(&self) -> usize {
        self.lines.len()
    }

    pub fn quantity_of(&self, product_id: ProductId) -> Option<u32> {
        self.lines
            .iter()
            .find(|(id, _)| *id == product_id)
            .map(|(_, qty)| *qty)
    }
}
