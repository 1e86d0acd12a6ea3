//! Resource routes for authors, publishers, books and favorites.

use crate::handlers::{authors, books, favorites, publishers};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn library_routes(state: AppState) -> Router {
    Router::new()
        .route("/authors", post(authors::create))
        .route(
            "/authors/:author_id",
            get(authors::read).put(authors::update).delete(authors::delete),
        )
        .route("/publishers", post(publishers::create))
        .route(
            "/publishers/:publisher_id",
            get(publishers::read).put(publishers::update).delete(publishers::delete),
        )
        .route("/books", post(books::create))
        .route("/books/:isbn", get(books::read).put(books::update).delete(books::delete))
        .route(
            "/favorites",
            get(favorites::list)
                .post(favorites::create)
                .put(favorites::update)
                .delete(favorites::delete),
        )
        .with_state(state)
}
