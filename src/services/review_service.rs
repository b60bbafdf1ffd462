use crate::{
    audit::log_audit,
    error::{AppError, AppResult},
    models::{Document, Product, ProductId, Review, UserId},
    store::Store,
};

/// Rating shown for a product: the mean of its reviews, or the product's own
/// rating when nobody reviewed it yet.
pub fn average_rating(doc: &Document, product: &Product) -> f64 {
    let (sum, count) = doc
        .reviews_for(product.id)
        .fold((0u32, 0u32), |(sum, count), review| {
            (sum + u32::from(review.rating), count + 1)
        });
    if count == 0 {
        product.rating
    } else {
        f64::from(sum) / f64::from(count)
    }
}

/// Number of filled stars (0..=5) for a rating.
pub fn star_count(rating: f64) -> u8 {
    rating.round().clamp(0.0, 5.0) as u8
}

/// Appends a review after checking the purchase requirement and the rating
/// range. A rejected review leaves the store untouched.
pub fn submit_review(
    store: &mut Store,
    product_id: ProductId,
    user_id: UserId,
    rating: i64,
    comment: &str,
) -> AppResult<Review> {
    if !store.document().has_purchased(user_id, product_id) {
        return Err(AppError::bad_request(
            "Only customers who purchased this product can write a review.",
        ));
    }
    let rating = u8::try_from(rating)
        .ok()
        .filter(|r| (1..=5).contains(r))
        .ok_or_else(|| AppError::bad_request("rating must be between 1 and 5"))?;

    let review = store.mutate(|doc| {
        let review = Review {
            id: doc.seq.next_review(),
            product_id,
            user_id,
            rating,
            comment: comment.to_string(),
        };
        doc.reviews.push(review.clone());
        Ok(review)
    })?;

    log_audit(
        Some(user_id),
        "review_create",
        Some("reviews"),
        Some(serde_json::json!({ "review_id": review.id, "product_id": product_id })),
    );
    Ok(review)
}
