use std::sync::Arc;

use crate::repository::FeatureStore;

/// Shared handler state: the injected store handle, nothing else.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn FeatureStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn FeatureStore>) -> Self {
        Self { store }
    }
}
