//! Relational backend seam. Handlers only ever see a `dyn LibraryStore`.

mod postgres;
mod schema;

pub use postgres::PgStore;
pub use schema::ensure_tables;

use crate::model::{
    AuthorInsert, AuthorUpdate, AuthorWithBooksRow, BookInsert, BookUpdate, BookWithRelationsRow, PublisherInsert,
    PublisherUpdate, PublisherWithBooksRow,
};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database: {0}")]
    Db(sqlx::Error),
    #[error("constraint violated: {0}")]
    Constraint(String),
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(constraint) = e.as_database_error().and_then(|d| d.constraint()) {
            return StoreError::Constraint(constraint.to_string());
        }
        match e {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StoreError::Unavailable(e.to_string())
            }
            other => StoreError::Db(other),
        }
    }
}

/// Raw outcome of a row-returning backend call; `Ok(None)` is a response without data.
pub type StoreResult<T> = Result<Option<Vec<T>>, StoreError>;

/// Single-table operations on books, authors, publishers and favorites.
/// Reads and writes return the joined shape of the affected rows.
#[async_trait]
pub trait LibraryStore: Send + Sync {
    async fn select_book(&self, isbn: &str) -> StoreResult<BookWithRelationsRow>;
    async fn insert_book(&self, book: &BookInsert) -> StoreResult<BookWithRelationsRow>;
    async fn update_book(&self, isbn: &str, book: &BookUpdate) -> StoreResult<BookWithRelationsRow>;
    async fn delete_book(&self, isbn: &str) -> Result<(), StoreError>;

    async fn select_author(&self, author_id: i64) -> StoreResult<AuthorWithBooksRow>;
    async fn insert_author(&self, author: &AuthorInsert) -> StoreResult<AuthorWithBooksRow>;
    async fn update_author(&self, author_id: i64, author: &AuthorUpdate) -> StoreResult<AuthorWithBooksRow>;
    async fn delete_author(&self, author_id: i64) -> Result<(), StoreError>;

    async fn select_publisher(&self, publisher_id: i64) -> StoreResult<PublisherWithBooksRow>;
    async fn insert_publisher(&self, publisher: &PublisherInsert) -> StoreResult<PublisherWithBooksRow>;
    async fn update_publisher(
        &self,
        publisher_id: i64,
        publisher: &PublisherUpdate,
    ) -> StoreResult<PublisherWithBooksRow>;
    async fn delete_publisher(&self, publisher_id: i64) -> Result<(), StoreError>;

    async fn select_favorite(&self, user_id: &str, isbn: &str) -> StoreResult<BookWithRelationsRow>;
    async fn select_favorites(&self, user_id: &str) -> StoreResult<BookWithRelationsRow>;
    async fn insert_favorite(&self, user_id: &str, isbn: &str) -> StoreResult<BookWithRelationsRow>;
    /// Conditional update of the favorite's isbn; zero rows when `user_id` has no favorite `from`.
    async fn move_favorite(&self, user_id: &str, from: &str, to: &str) -> StoreResult<BookWithRelationsRow>;
    async fn delete_favorite(&self, user_id: &str, isbn: &str) -> Result<(), StoreError>;

    /// Connectivity check for readiness probes.
    async fn ping(&self) -> Result<(), StoreError>;
}
