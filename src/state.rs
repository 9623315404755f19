use std::sync::Arc;

use crate::store::{AccountStore, TaskStore};

/// Shared handles to the persistence stores, registered as actix app data.
/// Handlers only see the trait objects, never a concrete backend.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<dyn AccountStore>,
    pub tasks: Arc<dyn TaskStore>,
}

impl AppState {
    pub fn new(accounts: Arc<dyn AccountStore>, tasks: Arc<dyn TaskStore>) -> Self {
        Self { accounts, tasks }
    }
}
