use crate::{
    audit::log_audit,
    error::{AppError, AppResult},
    models::{Role, User, UserId},
    store::Store,
};

/// Creates a customer account and signs it in.
///
/// Credentials are kept in plain text; this is a demo store.
pub fn register_user(store: &mut Store, name: &str, email: &str, password: &str) -> AppResult<User> {
    if name.is_empty() || email.is_empty() || password.is_empty() {
        return Err(AppError::bad_request("Fill all fields"));
    }
    if store.document().user_by_email(email).is_some() {
        return Err(AppError::bad_request("Email already used"));
    }

    let user = store.mutate(|doc| {
        let user = User {
            id: doc.seq.next_user(),
            email: email.to_string(),
            name: name.to_string(),
            role: Role::Customer,
            password: password.to_string(),
        };
        doc.users.push(user.clone());
        doc.session.user_id = Some(user.id);
        Ok(user)
    })?;

    log_audit(
        Some(user.id),
        "user_register",
        Some("users"),
        Some(serde_json::json!({ "user_id": user.id })),
    );
    Ok(user)
}

/// Signs in the user matching both email and password exactly.
pub fn authenticate(store: &mut Store, email: &str, password: &str) -> AppResult<User> {
    let user = store
        .document()
        .users
        .iter()
        .find(|u| u.email == email && u.password == password)
        .cloned()
        .ok_or(AppError::InvalidCredentials)?;

    store.mutate(|doc| {
        doc.session.user_id = Some(user.id);
        Ok(())
    })?;

    log_audit(
        Some(user.id),
        "user_login",
        Some("users"),
        Some(serde_json::json!({ "user_id": user.id })),
    );
    Ok(user)
}

pub fn logout(store: &mut Store) -> AppResult<()> {
    let previous = store.document().session.user_id;
    store.mutate(|doc| {
        doc.session.user_id = None;
        Ok(())
    })?;

    log_audit(previous, "user_logout", Some("session"), None);
    Ok(())
}

/// Switches a user to the seller role. Already-sellers are left as they are.
pub fn promote_to_seller(store: &mut Store, user_id: UserId) -> AppResult<User> {
    let user = store.document().user(user_id).cloned().ok_or(AppError::NotFound)?;
    if user.role == Role::Seller {
        return Ok(user);
    }

    let user = store.mutate(|doc| {
        let user = doc
            .users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or(AppError::NotFound)?;
        user.role = Role::Seller;
        Ok(user.clone())
    })?;

    log_audit(
        Some(user_id),
        "user_promote",
        Some("users"),
        Some(serde_json::json!({ "role": user.role.as_str() })),
    );
    Ok(user)
}
