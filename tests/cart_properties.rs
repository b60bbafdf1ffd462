use std::collections::{BTreeMap, HashSet};

use ganimart::{
    models::{MAX_LINE_QUANTITY, ProductId},
    services::cart_service,
    store::{Store, storage::MemoryStorage},
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum CartOp {
    Add(ProductId, u32),
    Set(ProductId, u32),
    Remove(ProductId),
}

fn quantity() -> impl Strategy<Value = u32> {
    prop_oneof![4 => 0u32..5, 1 => Just(u32::MAX)]
}

fn cart_op() -> impl Strategy<Value = CartOp> {
    // Ids past 8 are not in the seeded catalog; the cart does not care.
    let product = 1u64..=10;
    prop_oneof![
        (product.clone(), quantity()).prop_map(|(id, qty)| CartOp::Add(id, qty)),
        (product.clone(), quantity()).prop_map(|(id, qty)| CartOp::Set(id, qty)),
        product.prop_map(CartOp::Remove),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn cart_lines_stay_unique_and_positive(ops in prop::collection::vec(cart_op(), 0..40)) {
        let mut store = Store::open(MemoryStorage::new(), "cart-props").unwrap();
        let mut expected: BTreeMap<ProductId, u32> = BTreeMap::new();

        for op in ops {
            match op {
                CartOp::Add(id, qty) => {
                    let result = cart_service::add_to_cart(&mut store, id, qty);
                    prop_assert_eq!(result.is_ok(), qty > 0);
                    if qty > 0 {
                        let line = expected.entry(id).or_default();
                        *line = line.saturating_add(qty).min(MAX_LINE_QUANTITY);
                    }
                }
                CartOp::Set(id, qty) => {
                    let result = cart_service::set_cart_line_quantity(&mut store, id, qty);
                    prop_assert_eq!(result.is_ok(), qty > 0);
                    if qty > 0 {
                        if let Some(line) = expected.get_mut(&id) {
                            *line = qty.min(MAX_LINE_QUANTITY);
                        }
                    }
                }
                CartOp::Remove(id) => {
                    let removed = cart_service::remove_cart_line(&mut store, id).unwrap();
                    prop_assert_eq!(removed, expected.remove(&id).is_some());
                }
            }

            let cart = &store.document().cart;
            let ids: HashSet<ProductId> = cart.iter().map(|line| line.product_id).collect();
            prop_assert_eq!(ids.len(), cart.len());
            prop_assert!(cart.iter().all(|line| (1..=MAX_LINE_QUANTITY).contains(&line.qty)));
        }

        let actual: BTreeMap<ProductId, u32> = store
            .document()
            .cart
            .iter()
            .map(|line| (line.product_id, line.qty))
            .collect();
        prop_assert_eq!(actual, expected.clone());
        let expected_count: u64 = expected.values().map(|&qty| u64::from(qty)).sum();
        prop_assert_eq!(store.document().cart_count(), expected_count);
    }
}
