use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    dto::actions::{Action, ActionKind},
    models::{Document, Role, User},
    navigation::route::Location,
    services::product_service::categories,
};

use super::{Control, FilterState, Form, FormField, ProductCard};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SellerDashboardView {
    pub seller_name: String,
    /// Present while the session user is still a customer.
    pub become_seller: Option<Control>,
    pub create_product: Form,
    pub filters: FilterState,
    pub products: Vec<ProductCard>,
}

pub fn render_seller(doc: &Document, user: &User, location: &Location) -> SellerDashboardView {
    let own: Vec<_> = doc.products_owned_by(user.id).collect();
    let filter = location.product_filter();

    SellerDashboardView {
        seller_name: user.name.clone(),
        become_seller: (user.role != Role::Seller)
            .then(|| Control::new("Switch your role to seller", Action::BecomeSeller)),
        create_product: Form {
            submit: ActionKind::CreateProduct,
            label: "Add Product".to_string(),
            fields: vec![
                FormField::new("title", "Title", ""),
                FormField::new("price", "Price", ""),
                FormField::new("stock", "Stock", "10"),
                FormField::new("category", "Category", ""),
                FormField::new("image", "Image URL", ""),
                FormField::new("description", "Description", ""),
            ],
        },
        filters: FilterState::from_location(location, categories(own.iter().copied())),
        products: filter
            .apply(own)
            .into_iter()
            .map(ProductCard::from_product)
            .collect(),
    }
}
