use std::sync::Arc;

use crate::store::{AssetStore, TaskStore, TokenStore, UserStore};

// Shared per-worker application state; every store sits behind a trait
// so the test harness can swap in the in-memory implementations.
#[derive(Clone)]
pub struct AppState {
    pub tasks: Arc<dyn TaskStore>,
    pub users: Arc<dyn UserStore>,
    pub tokens: Arc<dyn TokenStore>,
    pub assets: Arc<dyn AssetStore>,
}
