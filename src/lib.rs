//! Bookshelf API: REST backend for books, authors, publishers and per-user favorites.

pub mod auth;
pub mod classify;
pub mod config;
pub mod error;
pub mod extractors;
pub mod flatten;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use auth::{AuthError, AuthProvider, GoTrueClient};
pub use classify::Outcome;
pub use config::Config;
pub use error::{AppError, ConfigError};
pub use routes::{account_routes, app, common_routes, library_routes};
pub use service::{AccountService, LibraryService};
pub use state::AppState;
pub use store::{ensure_tables, LibraryStore, PgStore, StoreError};
