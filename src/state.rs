/*
 * Responsibility
 * - Shared router context (AppState)
 * - Clone cheap: the verifier sits behind an Arc and is read-only after startup
 */
use std::sync::Arc;

use crate::services::auth::AuthService;

#[derive(Clone, Debug)]
pub struct AppState {
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(auth: Arc<AuthService>) -> Self {
        Self { auth }
    }
}
