use std::sync::{Mutex, MutexGuard};

use tracing::error;

use crate::{error::ApiError, store::Store};

/// Shared across actix workers through `web::Data<AppState>`.
#[derive(Debug, Default)]
pub struct AppState {
    store: Mutex<Store>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every handler takes this guard once and holds it for its whole
    /// read-modify-write sequence.
    pub fn store(&self) -> Result<MutexGuard<'_, Store>, ApiError> {
        self.store.lock().map_err(|e| {
            error!(error = %e, "Store lock poisoned");
            ApiError::Internal("Internal Server Error".to_string())
        })
    }
}
