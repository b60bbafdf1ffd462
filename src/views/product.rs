use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    dto::actions::ActionKind,
    models::{Document, Product},
    services::review_service::{average_rating, star_count},
};

use super::{Form, FormField, format_price, star_text};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ReviewItem {
    pub author: String,
    pub stars: u8,
    pub rating_text: String,
    pub comment: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProductDetailView {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub price: String,
    pub category: String,
    pub stock: u32,
    pub image: String,
    pub image_fallback: Option<String>,
    /// Unrounded average used for the star display.
    pub average_rating: f64,
    pub stars: u8,
    pub rating_text: String,
    pub add_to_cart: Form,
    pub reviews: Vec<ReviewItem>,
    /// Whether the session user may post a review for this product.
    pub can_review: bool,
    pub write_review: Form,
}

pub fn render_product(doc: &Document, product: &Product) -> ProductDetailView {
    let average = average_rating(doc, product);
    let stars = star_count(average);

    let reviews = doc
        .reviews_for(product.id)
        .map(|review| ReviewItem {
            author: doc
                .user(review.user_id)
                .map_or_else(|| "User".to_string(), |u| u.name.clone()),
            stars: review.rating,
            rating_text: star_text(review.rating),
            comment: review.comment.clone(),
        })
        .collect();

    let can_review = doc
        .current_user()
        .is_some_and(|user| doc.has_purchased(user.id, product.id));

    ProductDetailView {
        id: product.id,
        title: product.title.clone(),
        description: product.description.clone(),
        price: format_price(product.price),
        category: product.category.clone(),
        stock: product.stock,
        image: product.image.clone(),
        image_fallback: product.image_local.clone(),
        average_rating: average,
        stars,
        rating_text: star_text(stars),
        add_to_cart: Form {
            submit: ActionKind::AddToCart,
            label: "Add to Cart".to_string(),
            fields: vec![
                FormField::new("product_id", "", product.id.to_string()),
                FormField::new("quantity", "Quantity", "1"),
            ],
        },
        reviews,
        can_review,
        write_review: Form {
            submit: ActionKind::SubmitReview,
            label: "Write Review".to_string(),
            fields: vec![
                FormField::new("product_id", "", product.id.to_string()),
                FormField::new("rating", "Rating 1-5", "5"),
                FormField::new("comment", "Comment", "Loved it!"),
            ],
        },
    }
}
