use tracing::{info, warn};

use crate::{
    dto::actions::{Action, clamp_quantity},
    error::AppResult,
    models::Document,
    navigation::{self, route::Route},
    services::{auth_service, cart_service, order_service, product_service, review_service},
    store::Store,
    views::Page,
};

/// The single owner of the store.
///
/// Navigation only reads the document. Interactions go through
/// [`Storefront::dispatch`], which runs one domain operation and then either
/// re-renders the current fragment or navigates to where the action leads.
pub struct Storefront {
    store: Store,
}

impl Storefront {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn document(&self) -> &Document {
        self.store.document()
    }

    pub fn navigate(&self, fragment: &str) -> Page {
        navigation::navigate(self.store.document(), fragment)
    }

    pub fn dispatch(&mut self, fragment: &str, action: Action) -> AppResult<Page> {
        let kind = action.kind();
        match self.apply(action) {
            Ok(next) => {
                info!(action = ?kind, "action applied");
                let target = next.map(|route| route.fragment());
                Ok(self.navigate(target.as_deref().unwrap_or(fragment)))
            }
            Err(err) => {
                if err.is_rejection() {
                    info!(action = ?kind, reason = %err, "action rejected");
                } else {
                    warn!(action = ?kind, error = %err, "action failed");
                }
                Err(err)
            }
        }
    }

    /// Runs the domain operation behind `action` and returns the route to
    /// navigate to afterwards, or `None` to re-render in place.
    fn apply(&mut self, action: Action) -> AppResult<Option<Route>> {
        let store = &mut self.store;
        let session_user = store.document().current_user().map(|user| user.id);

        let next = match action {
            Action::AddToCart {
                product_id,
                quantity,
            } => {
                cart_service::add_to_cart(store, product_id, clamp_quantity(quantity))?;
                None
            }
            Action::SetCartLineQuantity {
                product_id,
                quantity,
            } => {
                cart_service::set_cart_line_quantity(store, product_id, clamp_quantity(quantity))?;
                None
            }
            Action::RemoveCartLine { product_id } => {
                cart_service::remove_cart_line(store, product_id)?;
                None
            }
            Action::PlaceOrder => {
                order_service::place_order(store)?;
                Some(Route::Confirmation)
            }
            Action::SubmitReview {
                product_id,
                rating,
                comment,
            } => match session_user {
                Some(user_id) => {
                    review_service::submit_review(store, product_id, user_id, rating, &comment)?;
                    None
                }
                None => Some(Route::Auth),
            },
            Action::Login(payload) => {
                auth_service::authenticate(store, payload.email.trim(), &payload.password)?;
                Some(Route::Profile)
            }
            Action::Register(payload) => {
                auth_service::register_user(
                    store,
                    payload.name.trim(),
                    payload.email.trim(),
                    &payload.password,
                )?;
                Some(Route::Profile)
            }
            Action::Logout => {
                auth_service::logout(store)?;
                Some(Route::Home)
            }
            Action::CreateProduct(payload) => match session_user {
                Some(user_id) => {
                    product_service::create_product(store, user_id, payload)?;
                    None
                }
                None => Some(Route::Auth),
            },
            Action::BecomeSeller => match session_user {
                Some(user_id) => {
                    auth_service::promote_to_seller(store, user_id)?;
                    None
                }
                None => Some(Route::Auth),
            },
        };
        Ok(next)
    }

    /// Discards all demo data and starts over from the seed.
    pub fn reset_demo(&mut self) -> AppResult<Page> {
        self.store.reset()?;
        Ok(self.navigate(&Route::Home.fragment()))
    }
}
