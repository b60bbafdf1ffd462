use ganimart::{
    app::Storefront,
    dto::{
        actions::Action,
        auth::{LoginRequest, RegisterRequest},
        products::CreateProductRequest,
    },
    error::AppError,
    models::{MAX_LINE_QUANTITY, Role, UserId},
    services::{auth_service, cart_service, order_service, product_service, review_service},
    store::{Store, storage::MemoryStorage},
    views::View,
};
use rust_decimal::Decimal;
use serde_json::json;

fn seeded_store() -> Store {
    Store::open(MemoryStorage::new(), "ganimart").unwrap()
}

fn product_request(title: &str, price: f64) -> CreateProductRequest {
    CreateProductRequest {
        title: title.to_string(),
        price,
        stock: 10,
        category: String::new(),
        image: String::new(),
        description: String::new(),
    }
}

fn login(store: &mut Store, email: &str) -> UserId {
    auth_service::authenticate(store, email, "pass").unwrap().id
}

#[test]
fn cart_accumulates_and_order_totals_snapshot() {
    let mut store = seeded_store();
    assert_eq!(store.document().product(1).unwrap().price, Decimal::new(7999, 2));

    cart_service::add_to_cart(&mut store, 1, 2).unwrap();
    let line = cart_service::add_to_cart(&mut store, 1, 1).unwrap();
    assert_eq!(line.qty, 3);
    assert_eq!(store.document().cart.len(), 1);

    let order = order_service::place_order(&mut store).unwrap();
    assert_eq!(order.total, Decimal::new(23997, 2));
    assert_eq!(order.number, "#000001");
    assert_eq!(order.status, "Processing");
    assert_eq!(order.items.len(), 1);
    assert!(store.document().cart.is_empty());
    assert_eq!(store.document().orders.len(), 1);
    assert_eq!(store.document().latest_order().map(|o| o.id), Some(order.id));
}

#[test]
fn empty_cart_cannot_be_ordered() {
    let mut store = seeded_store();
    let before = store.document().clone();

    let err = order_service::place_order(&mut store).unwrap_err();
    assert!(matches!(err, AppError::BadRequest(ref reason) if reason == "Cart is empty"));
    assert_eq!(store.document(), &before);
}

#[test]
fn orders_are_kept_most_recent_first() {
    let mut store = seeded_store();
    cart_service::add_to_cart(&mut store, 2, 1).unwrap();
    let first = order_service::place_order(&mut store).unwrap();
    cart_service::add_to_cart(&mut store, 3, 1).unwrap();
    let second = order_service::place_order(&mut store).unwrap();

    assert!(second.id > first.id);
    let ids: Vec<_> = store.document().orders.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![second.id, first.id]);
}

#[test]
fn dangling_lines_contribute_nothing_to_totals() {
    let mut store = seeded_store();
    cart_service::add_to_cart(&mut store, 2, 2).unwrap();
    cart_service::add_to_cart(&mut store, 404, 5).unwrap();

    let order = order_service::place_order(&mut store).unwrap();
    assert_eq!(order.items.len(), 2);
    assert_eq!(order.total, Decimal::new(29800, 2));
}

#[test]
fn line_quantities_are_capped() {
    let mut store = seeded_store();
    let line = cart_service::add_to_cart(&mut store, 1, u32::MAX).unwrap();
    assert_eq!(line.qty, MAX_LINE_QUANTITY);
    let line = cart_service::add_to_cart(&mut store, 1, u32::MAX).unwrap();
    assert_eq!(line.qty, MAX_LINE_QUANTITY);

    let line = cart_service::set_cart_line_quantity(&mut store, 1, u32::MAX)
        .unwrap()
        .unwrap();
    assert_eq!(line.qty, MAX_LINE_QUANTITY);
}

#[test]
fn huge_form_quantities_render_bounded_counts() {
    let mut storefront = Storefront::new(seeded_store());
    for product_id in [1, 2] {
        storefront
            .dispatch(
                "#home",
                Action::AddToCart {
                    product_id,
                    quantity: Some(i64::MAX),
                },
            )
            .unwrap();
    }

    let page = storefront.navigate("#home");
    assert_eq!(page.header.cart_count, 2 * u64::from(MAX_LINE_QUANTITY));
    assert!(matches!(storefront.navigate("#cart").view, View::Cart(_)));
}

#[test]
fn oversized_totals_render_and_refuse_checkout() {
    let doc = json!({
        "products": [ { "id": 1, "title": "Gold Bar", "price": 1e25 } ],
        "cart": [ { "productId": 1, "qty": 9999 } ],
        "version": 6
    });
    let store = Store::open(MemoryStorage::with_entry("ganimart", doc.to_string()), "ganimart").unwrap();
    let mut storefront = Storefront::new(store);

    match storefront.navigate("#cart").view {
        View::Cart(view) => assert_eq!(view.lines.len(), 1),
        other => panic!("unexpected view {other:?}"),
    }

    let before = storefront.document().clone();
    let err = storefront.dispatch("#checkout", Action::PlaceOrder).unwrap_err();
    assert!(matches!(err, AppError::BadRequest(ref msg) if msg == "Order total is too large"));
    assert_eq!(storefront.document(), &before);
}

#[test]
fn set_quantity_ignores_absent_lines() {
    let mut store = seeded_store();
    assert_eq!(cart_service::set_cart_line_quantity(&mut store, 5, 3).unwrap(), None);
    assert!(store.document().cart.is_empty());

    cart_service::add_to_cart(&mut store, 5, 1).unwrap();
    let line = cart_service::set_cart_line_quantity(&mut store, 5, 4).unwrap();
    assert_eq!(line.map(|l| l.qty), Some(4));

    assert!(cart_service::set_cart_line_quantity(&mut store, 5, 0).is_err());
    assert_eq!(store.document().cart[0].qty, 4);
}

#[test]
fn reviews_require_a_purchase() {
    let mut store = seeded_store();
    let user_id = login(&mut store, "gani@example.com");
    let reviews_before = store.document().reviews.len();

    let err = review_service::submit_review(&mut store, 3, user_id, 5, "Nice").unwrap_err();
    assert!(err.is_rejection());
    assert_eq!(store.document().reviews.len(), reviews_before);

    cart_service::add_to_cart(&mut store, 3, 1).unwrap();
    order_service::place_order(&mut store).unwrap();

    let review = review_service::submit_review(&mut store, 3, user_id, 4, "Comfy").unwrap();
    assert_eq!(review.id, 2);
    assert_eq!(store.document().reviews.len(), reviews_before + 1);
}

#[test]
fn anonymous_orders_do_not_qualify_for_reviews() {
    let mut store = seeded_store();
    cart_service::add_to_cart(&mut store, 3, 1).unwrap();
    order_service::place_order(&mut store).unwrap();

    assert!(review_service::submit_review(&mut store, 3, 1, 5, "").is_err());
}

#[test]
fn review_rating_must_be_in_range() {
    let mut store = seeded_store();
    let user_id = login(&mut store, "gani@example.com");
    cart_service::add_to_cart(&mut store, 1, 1).unwrap();
    order_service::place_order(&mut store).unwrap();

    for rating in [0, 6, -1] {
        assert!(review_service::submit_review(&mut store, 1, user_id, rating, "x").is_err());
    }
    assert_eq!(store.document().reviews.len(), 1);
}

#[test]
fn average_rating_falls_back_to_product_rating() {
    let mut store = seeded_store();
    let doc = store.document();
    assert_eq!(review_service::average_rating(doc, doc.product(1).unwrap()), 5.0);
    assert_eq!(review_service::average_rating(doc, doc.product(2).unwrap()), 4.0);

    let user_id = login(&mut store, "gani@example.com");
    cart_service::add_to_cart(&mut store, 1, 1).unwrap();
    order_service::place_order(&mut store).unwrap();
    review_service::submit_review(&mut store, 1, user_id, 2, "Meh").unwrap();

    let doc = store.document();
    assert_eq!(review_service::average_rating(doc, doc.product(1).unwrap()), 3.5);
    assert_eq!(review_service::star_count(3.5), 4);
}

#[test]
fn registration_rejects_duplicates_and_mints_increasing_ids() {
    let mut store = seeded_store();

    let err = auth_service::register_user(&mut store, "Dup", "gani@example.com", "x").unwrap_err();
    assert!(matches!(err, AppError::BadRequest(ref reason) if reason == "Email already used"));
    assert!(auth_service::register_user(&mut store, "", "a@b.c", "x").is_err());

    let first = auth_service::register_user(&mut store, "Ann", "ann@example.com", "pw").unwrap();
    // Emails compare case-sensitively.
    let second = auth_service::register_user(&mut store, "Ann", "ANN@example.com", "pw").unwrap();

    assert_eq!(first.id, 3);
    assert!(second.id > first.id);
    assert_eq!(second.role, Role::Customer);
    assert_eq!(store.document().session.user_id, Some(second.id));
}

#[test]
fn failed_login_leaves_store_unchanged() {
    let mut store = seeded_store();
    let before = store.document().clone();

    let err = auth_service::authenticate(&mut store, "nope@x.com", "x").unwrap_err();
    assert!(matches!(err, AppError::InvalidCredentials));
    assert_eq!(store.document(), &before);

    assert!(auth_service::authenticate(&mut store, "gani@example.com", "wrong").is_err());
    assert_eq!(store.document(), &before);
}

#[test]
fn logout_clears_the_session() {
    let mut store = seeded_store();
    login(&mut store, "seller@example.com");
    assert!(store.document().is_seller());

    auth_service::logout(&mut store).unwrap();
    assert!(store.document().current_user().is_none());
}

#[test]
fn product_creation_validates_and_prepends() {
    let mut store = seeded_store();

    for bad in [
        product_request("", 10.0),
        product_request("Lamp", 0.0),
        product_request("Lamp", -3.0),
        product_request("Lamp", f64::NAN),
        product_request("Lamp", f64::INFINITY),
        product_request("Lamp", 1e20),
        product_request("Lamp", 1_000_000.01),
    ] {
        assert!(product_service::create_product(&mut store, 2, bad).is_err());
    }
    assert_eq!(store.document().products.len(), 8);

    let mut request = product_request("  Desk Lamp ", 19.5);
    request.stock = -4;
    let product = product_service::create_product(&mut store, 2, request).unwrap();

    assert_eq!(product.id, 9);
    assert_eq!(product.title, "Desk Lamp");
    assert_eq!(product.price, Decimal::new(195, 1));
    assert_eq!(product.stock, 0);
    assert_eq!(product.category, "Misc");
    assert_eq!(product.image, "https://picsum.photos/seed/product9/800/600");
    assert_eq!(product.owner(), 2);
    assert_eq!(store.document().products[0].id, 9);
}

#[test]
fn seller_owns_seeded_and_created_products() {
    let mut store = seeded_store();
    let customer = login(&mut store, "gani@example.com");
    product_service::create_product(&mut store, customer, product_request("Kite", 12.0)).unwrap();

    let doc = store.document();
    assert_eq!(doc.products_owned_by(2).count(), 8);
    assert_eq!(doc.products_owned_by(customer).count(), 1);
}

#[test]
fn promotion_is_idempotent() {
    let mut store = seeded_store();
    let user = auth_service::promote_to_seller(&mut store, 1).unwrap();
    assert_eq!(user.role, Role::Seller);

    let snapshot = store.document().clone();
    auth_service::promote_to_seller(&mut store, 1).unwrap();
    assert_eq!(store.document(), &snapshot);

    assert!(matches!(
        auth_service::promote_to_seller(&mut store, 99),
        Err(AppError::NotFound)
    ));
}

#[test]
fn dispatch_rerenders_or_redirects() {
    let mut storefront = Storefront::new(seeded_store());

    let page = storefront
        .dispatch(
            "#catalog",
            Action::AddToCart {
                product_id: 1,
                quantity: Some(0),
            },
        )
        .unwrap();
    assert_eq!(page.fragment, "#catalog");
    assert_eq!(page.header.cart_count, 1);
    assert!(matches!(page.view, View::Catalog(_)));

    let page = storefront.dispatch("#checkout", Action::PlaceOrder).unwrap();
    assert_eq!(page.fragment, "#confirm");
    match page.view {
        View::Confirmation(view) => assert_eq!(view.order_number.as_deref(), Some("#000001")),
        other => panic!("unexpected view {other:?}"),
    }
    assert_eq!(page.header.cart_count, 0);
}

#[test]
fn dispatch_surfaces_rejections_without_changes() {
    let mut storefront = Storefront::new(seeded_store());
    let before = storefront.document().clone();

    let err = storefront
        .dispatch(
            "#auth",
            Action::Login(LoginRequest {
                email: "nope@x.com".to_string(),
                password: "x".to_string(),
            }),
        )
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidCredentials));
    assert_eq!(storefront.document(), &before);
}

#[test]
fn account_actions_redirect() {
    let mut storefront = Storefront::new(seeded_store());

    let page = storefront
        .dispatch(
            "#auth",
            Action::Register(RegisterRequest {
                name: "Ann".to_string(),
                email: " ann@example.com ".to_string(),
                password: "pw".to_string(),
            }),
        )
        .unwrap();
    assert_eq!(page.fragment, "#profile");
    assert_eq!(page.header.account_label, "Ann");
    assert!(storefront.document().user_by_email("ann@example.com").is_some());

    let page = storefront.dispatch("#seller", Action::BecomeSeller).unwrap();
    assert_eq!(page.fragment, "#seller");
    assert!(page.header.show_seller_link);

    let page = storefront.dispatch("#profile", Action::Logout).unwrap();
    assert_eq!(page.fragment, "#home");
    assert_eq!(page.header.account_label, "Login");
}

#[test]
fn session_actions_without_user_go_to_auth() {
    let mut storefront = Storefront::new(seeded_store());
    let before = storefront.document().clone();

    let page = storefront
        .dispatch("#seller", Action::CreateProduct(product_request("Kite", 12.0)))
        .unwrap();
    assert_eq!(page.fragment, "#auth");
    assert!(matches!(page.view, View::Auth(_)));

    let page = storefront
        .dispatch(
            "#product/1",
            Action::SubmitReview {
                product_id: 1,
                rating: 5,
                comment: "Great".to_string(),
            },
        )
        .unwrap();
    assert_eq!(page.fragment, "#auth");
    assert_eq!(storefront.document(), &before);
}

#[test]
fn demo_reset_returns_home() {
    let mut storefront = Storefront::new(seeded_store());
    storefront
        .dispatch(
            "#home",
            Action::AddToCart {
                product_id: 2,
                quantity: None,
            },
        )
        .unwrap();

    let page = storefront.reset_demo().unwrap();
    assert_eq!(page.fragment, "#home");
    assert_eq!(page.header.cart_count, 0);
    assert!(storefront.document().cart.is_empty());
}
