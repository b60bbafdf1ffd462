use std::fmt;

use url::form_urlencoded;

use crate::{
    models::ProductId,
    services::product_service::{ProductFilter, decimal_from_f64},
};

/// Reads a number the way a form field is read: surrounding whitespace is
/// ignored and `1.0`, `+3` or `1e3` are all numbers.
fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

fn parse_product_id(raw: &str) -> Option<ProductId> {
    parse_number(raw)
        .filter(|value| value.fract() == 0.0 && *value >= 0.0 && *value < ProductId::MAX as f64)
        .map(|value| value as ProductId)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Catalog,
    /// `None` when the path segment is not a product identifier.
    Product(Option<ProductId>),
    Cart,
    Checkout,
    Confirmation,
    Orders,
    Auth,
    Profile,
    Seller,
}

impl Route {
    fn from_path(path: &str) -> Self {
        if let Some((name, param)) = path.split_once('/') {
            return match name {
                "product" => {
                    let segment = param.split('/').next().unwrap_or_default();
                    Route::Product(parse_product_id(segment))
                }
                _ => Route::Home,
            };
        }
        match path {
            "catalog" => Route::Catalog,
            "cart" => Route::Cart,
            "checkout" => Route::Checkout,
            "confirm" => Route::Confirmation,
            "orders" => Route::Orders,
            "auth" => Route::Auth,
            "profile" => Route::Profile,
            "seller" => Route::Seller,
            _ => Route::Home,
        }
    }

    pub fn fragment(&self) -> String {
        match self {
            Route::Home => "#home".to_string(),
            Route::Catalog => "#catalog".to_string(),
            Route::Product(Some(id)) => format!("#product/{id}"),
            Route::Product(None) => "#product/".to_string(),
            Route::Cart => "#cart".to_string(),
            Route::Checkout => "#checkout".to_string(),
            Route::Confirmation => "#confirm".to_string(),
            Route::Orders => "#orders".to_string(),
            Route::Auth => "#auth".to_string(),
            Route::Profile => "#profile".to_string(),
            Route::Seller => "#seller".to_string(),
        }
    }
}

/// A parsed `#<route>[/<param>][?<query>]` fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub route: Route,
    pub query: Vec<(String, String)>,
}

impl Location {
    /// Never fails: anything unrecognised is the home route.
    pub fn parse(fragment: &str) -> Self {
        let fragment = fragment.trim();
        let body = fragment.strip_prefix('#').unwrap_or(fragment);
        let (path, query) = body.split_once('?').unwrap_or((body, ""));
        Self {
            route: Route::from_path(path),
            query: form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect(),
        }
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn product_filter(&self) -> ProductFilter {
        let non_empty = |name: &str| {
            self.param(name)
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };
        ProductFilter {
            q: non_empty("q"),
            category: non_empty("category"),
            max_price: self
                .param("max_price")
                .and_then(parse_number)
                .and_then(decimal_from_f64),
        }
    }
}

impl From<Route> for Location {
    fn from(route: Route) -> Self {
        Self {
            route,
            query: Vec::new(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.route.fragment())?;
        if !self.query.is_empty() {
            let query = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(&self.query)
                .finish();
            write!(f, "?{query}")?;
        }
        Ok(())
    }
}
