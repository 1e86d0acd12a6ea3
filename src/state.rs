//! Shared application state: backend handles built once at startup and cloned per request.

use crate::auth::AuthProvider;
use crate::store::LibraryStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn LibraryStore>,
    pub auth: Arc<dyn AuthProvider>,
}

impl AppState {
    pub fn new(store: Arc<dyn LibraryStore>, auth: Arc<dyn AuthProvider>) -> Self {
        AppState { store, auth }
    }
}
