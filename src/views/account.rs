use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    dto::actions::{Action, ActionKind},
    models::{Document, User},
    navigation::route::Route,
};

use super::{Control, Form, FormField, format_price};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderRow {
    pub number: String,
    pub created_at: DateTime<Utc>,
    pub status: String,
    pub total: String,
    pub item_count: u64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderHistoryView {
    pub orders: Vec<OrderRow>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthView {
    pub login: Form,
    pub register: Form,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProfileView {
    pub name: String,
    pub email: String,
    pub role: String,
    pub orders_href: String,
    pub logout: Control,
}

/// Orders of the session user, most recent first. Empty when logged out.
pub fn render_orders(doc: &Document) -> OrderHistoryView {
    let orders = match doc.current_user() {
        Some(user) => doc
            .orders_for(user.id)
            .map(|order| OrderRow {
                number: order.number.clone(),
                created_at: order.created_at,
                status: order.status.clone(),
                total: format_price(order.total),
                item_count: order.items.iter().map(|line| u64::from(line.qty)).sum(),
            })
            .collect(),
        None => Vec::new(),
    };
    OrderHistoryView { orders }
}

pub fn render_auth() -> AuthView {
    AuthView {
        login: Form {
            submit: ActionKind::Login,
            label: "Login".to_string(),
            fields: vec![
                FormField::new("email", "Email", ""),
                FormField::new("password", "Password", ""),
            ],
        },
        register: Form {
            submit: ActionKind::Register,
            label: "Create account".to_string(),
            fields: vec![
                FormField::new("name", "Name", ""),
                FormField::new("email", "Email", ""),
                FormField::new("password", "Password", ""),
            ],
        },
    }
}

pub fn render_profile(user: &User) -> ProfileView {
    ProfileView {
        name: user.name.clone(),
        email: user.email.clone(),
        role: user.role.as_str().to_string(),
        orders_href: Route::Orders.fragment(),
        logout: Control::new("Logout", Action::Logout),
    }
}
