//! Fragment router.
//!
//! Resolves a location fragment to exactly one view. Guards are evaluated
//! before any view is built and answer with the route to go to instead; the
//! header is rebuilt after every navigation.

pub mod route;

use tracing::debug;

use crate::{
    models::Document,
    views::{self, Header, Page},
};

use self::route::{Location, Route};

/// Where a guarded route sends the visitor, if it may not be shown now.
pub fn guard(doc: &Document, route: Route) -> Option<Route> {
    match route {
        Route::Profile | Route::Seller if doc.current_user().is_none() => Some(Route::Auth),
        Route::Checkout if doc.cart.is_empty() => Some(Route::Cart),
        _ => None,
    }
}

pub fn navigate(doc: &Document, fragment: &str) -> Page {
    let mut location = Location::parse(fragment);
    let mut redirected_from = None;

    // Redirect targets are unguarded, so this settles after one hop.
    while let Some(target) = guard(doc, location.route) {
        debug!(from = %location, to = %target.fragment(), "navigation redirected");
        redirected_from.get_or_insert_with(|| location.to_string());
        location = Location::from(target);
    }

    let view = views::render(doc, &location);
    Page {
        fragment: location.to_string(),
        redirected_from,
        header: Header::from_document(doc),
        view,
    }
}
