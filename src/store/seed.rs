use rust_decimal::Decimal;

use crate::models::{Document, Product, Review, Role, Sequences, Session, User};

use super::migrations::CURRENT_VERSION;

pub(crate) struct CatalogEntry {
    pub title: &'static str,
    /// Lowercased title fragment used to recognise the entry in older documents.
    pub keyword: &'static str,
    pub cents: i64,
    pub category: &'static str,
    pub stock: u32,
    pub photo: &'static str,
}

pub(crate) const CATALOG: [CatalogEntry; 8] = [
    CatalogEntry {
        title: "Wireless Headphones",
        keyword: "wireless headphones",
        cents: 7999,
        category: "Electronics",
        stock: 24,
        photo: "https://images.unsplash.com/photo-1505740420928-5e560c06d30e?w=800&h=600&fit=crop",
    },
    CatalogEntry {
        title: "Smart Watch Series 5",
        keyword: "smart watch",
        cents: 14900,
        category: "Wearables",
        stock: 18,
        photo: "https://images.unsplash.com/photo-1523275335684-37898b6baf30?w=800&h=600&fit=crop",
    },
    CatalogEntry {
        title: "Ergonomic Office Chair",
        keyword: "ergonomic office chair",
        cents: 22900,
        category: "Home & Office",
        stock: 12,
        photo: "https://images.unsplash.com/photo-1586023492125-27b2c045efd7?w=800&h=600&fit=crop",
    },
    CatalogEntry {
        title: "Gaming Mouse Pro",
        keyword: "gaming mouse",
        cents: 3900,
        category: "Electronics",
        stock: 40,
        photo: "https://images.unsplash.com/photo-1527864550417-7fd91fc51a46?w=800&h=600&fit=crop",
    },
    CatalogEntry {
        title: "Yoga Mat Eco",
        keyword: "yoga mat",
        cents: 2500,
        category: "Sports",
        stock: 50,
        photo: "https://images.unsplash.com/photo-1544367567-0f2fcb009e0b?w=800&h=600&fit=crop",
    },
    CatalogEntry {
        title: "Stainless Water Bottle",
        keyword: "water bottle",
        cents: 1900,
        category: "Outdoors",
        stock: 70,
        photo: "https://images.unsplash.com/photo-1602143407151-7111542de6e8?w=800&h=600&fit=crop",
    },
    CatalogEntry {
        title: "Bluetooth Speaker",
        keyword: "bluetooth speaker",
        cents: 5900,
        category: "Electronics",
        stock: 33,
        photo: "https://images.unsplash.com/photo-1608043152269-423dbba4e7e1?w=800&h=600&fit=crop",
    },
    CatalogEntry {
        title: "Running Shoes",
        keyword: "running shoes",
        cents: 8900,
        category: "Sports",
        stock: 26,
        photo: "https://images.unsplash.com/photo-1542291026-7eec264c27ff?w=800&h=600&fit=crop",
    },
];

fn demo_user(id: u64, email: &str, name: &str, role: Role) -> User {
    User {
        id,
        email: email.to_string(),
        name: name.to_string(),
        role,
        password: "pass".to_string(),
    }
}

/// Builds the fresh demo document written when no usable one is stored.
pub fn seed_document() -> Document {
    let users = vec![
        demo_user(1, "gani@example.com", "Gani", Role::Customer),
        demo_user(2, "seller@example.com", "Seller", Role::Seller),
    ];

    let products: Vec<Product> = CATALOG
        .iter()
        .zip(1u64..)
        .map(|(entry, id)| Product {
            id,
            title: entry.title.to_string(),
            description: format!("{} description", entry.title),
            price: Decimal::new(entry.cents, 2),
            category: entry.category.to_string(),
            stock: entry.stock,
            rating: 4.0,
            image: entry.photo.to_string(),
            image_local: None,
            owner_id: None,
        })
        .collect();

    let reviews = vec![Review {
        id: 1,
        product_id: 1,
        user_id: 1,
        rating: 5,
        comment: "Great sound and battery!".to_string(),
    }];

    Document {
        seq: Sequences {
            product: products.len() as u64 + 1,
            user: users.len() as u64 + 1,
            review: reviews.len() as u64 + 1,
            order: 1,
        },
        products,
        users,
        reviews,
        orders: Vec::new(),
        cart: Vec::new(),
        session: Session::default(),
        version: CURRENT_VERSION,
    }
}
