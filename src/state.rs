use std::sync::{Arc, Mutex, MutexGuard};

use crate::{
    app::Storefront,
    error::{AppError, AppResult},
    services::legacy_cart_service::LegacyCart,
};

/// Shared handler state. The storefront sits behind one mutex so every
/// request runs its read/mutate/persist cycle without interleaving.
#[derive(Clone)]
pub struct AppState {
    pub storefront: Arc<Mutex<Storefront>>,
    pub legacy_cart: Arc<Mutex<LegacyCart>>,
}

impl AppState {
    pub fn new(storefront: Storefront) -> Self {
        Self {
            storefront: Arc::new(Mutex::new(storefront)),
            legacy_cart: Arc::new(Mutex::new(LegacyCart::new())),
        }
    }

    pub fn storefront(&self) -> AppResult<MutexGuard<'_, Storefront>> {
        self.storefront
            .lock()
            .map_err(|_| AppError::Internal(anyhow::anyhow!("storefront lock poisoned")))
    }

    pub fn legacy_cart(&self) -> AppResult<MutexGuard<'_, LegacyCart>> {
        self.legacy_cart
            .lock()
            .map_err(|_| AppError::Internal(anyhow::anyhow!("legacy cart lock poisoned")))
    }
}
