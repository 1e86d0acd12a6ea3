//! `LibraryStore` over a PostgreSQL pool.

use super::{LibraryStore, StoreError, StoreResult};
use crate::model::{
    AuthorInsert, AuthorUpdate, AuthorWithBooksRow, BookInsert, BookUpdate, BookWithRelationsRow, PublisherInsert,
    PublisherUpdate, PublisherWithBooksRow,
};
use crate::sql::{self, Tables};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::QueryScalar;
use sqlx::types::Json;
use sqlx::{PgPool, Postgres};

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    tables: Tables,
}

type JsonQuery<'q, T> = QueryScalar<'q, Postgres, Json<T>, PgArguments>;

impl PgStore {
    pub fn new(pool: PgPool, schema: &str) -> Self {
        PgStore {
            pool,
            tables: Tables::new(schema),
        }
    }

    async fn fetch_json<T>(&self, query: JsonQuery<'_, T>) -> StoreResult<T>
    where
        T: DeserializeOwned + Send + Unpin + 'static,
        (Json<T>,): for<'r> sqlx::FromRow<'r, PgRow>,
    {
        let rows = query.fetch_all(&self.pool).await?;
        Ok(Some(rows.into_iter().map(|Json(row)| row).collect()))
    }

    async fn books_by_isbn(&self, isbns: Vec<String>) -> StoreResult<BookWithRelationsRow> {
        if isbns.is_empty() {
            return Ok(Some(Vec::new()));
        }
        let q = sql::select_books_by_isbn(&self.tables);
        tracing::debug!(sql = %q, isbns = ?isbns, "query");
        self.fetch_json(sqlx::query_scalar(&q).bind(isbns)).await
    }

    async fn authors_by_id(&self, ids: Vec<i64>) -> StoreResult<AuthorWithBooksRow> {
        if ids.is_empty() {
            return Ok(Some(Vec::new()));
        }
        let q = sql::select_authors_by_id(&self.tables);
        tracing::debug!(sql = %q, ids = ?ids, "query");
        self.fetch_json(sqlx::query_scalar(&q).bind(ids)).await
    }

    async fn publishers_by_id(&self, ids: Vec<i64>) -> StoreResult<PublisherWithBooksRow> {
        if ids.is_empty() {
            return Ok(Some(Vec::new()));
        }
        let q = sql::select_publishers_by_id(&self.tables);
        tracing::debug!(sql = %q, ids = ?ids, "query");
        self.fetch_json(sqlx::query_scalar(&q).bind(ids)).await
    }
}

#[async_trait]
impl LibraryStore for PgStore {
    async fn select_book(&self, isbn: &str) -> StoreResult<BookWithRelationsRow> {
        self.books_by_isbn(vec![isbn.to_string()]).await
    }

    async fn insert_book(&self, book: &BookInsert) -> StoreResult<BookWithRelationsRow> {
        let q = sql::insert_book(&self.tables);
        tracing::debug!(sql = %q, isbn = %book.isbn, "query");
        let keys: Vec<String> = sqlx::query_scalar(&q)
            .bind(&book.isbn)
            .bind(&book.name)
            .bind(book.author_id)
            .bind(book.publisher_id)
            .bind(book.published_at.map(|p| p.naive()))
            .fetch_all(&self.pool)
            .await?;
        self.books_by_isbn(keys).await
    }

    async fn update_book(&self, isbn: &str, book: &BookUpdate) -> StoreResult<BookWithRelationsRow> {
        let q = sql::update_book(&self.tables);
        tracing::debug!(sql = %q, isbn, "query");
        let keys: Vec<String> = sqlx::query_scalar(&q)
            .bind(isbn)
            .bind(&book.isbn)
            .bind(&book.name)
            .bind(book.author_id)
            .bind(book.publisher_id)
            .bind(book.published_at.map(|p| p.naive()))
            .fetch_all(&self.pool)
            .await?;
        self.books_by_isbn(keys).await
    }

    async fn delete_book(&self, isbn: &str) -> Result<(), StoreError> {
        let q = sql::delete_book(&self.tables);
        tracing::debug!(sql = %q, "execute");
        sqlx::query(&q).bind(isbn).execute(&self.pool).await?;
        Ok(())
    }

    async fn select_author(&self, author_id: i64) -> StoreResult<AuthorWithBooksRow> {
        self.authors_by_id(vec![author_id]).await
    }

    async fn insert_author(&self, author: &AuthorInsert) -> StoreResult<AuthorWithBooksRow> {
        let q = sql::insert_author(&self.tables);
        tracing::debug!(sql = %q, author_id = author.author_id, "query");
        let keys: Vec<i64> = sqlx::query_scalar(&q)
            .bind(author.author_id)
            .bind(&author.name)
            .fetch_all(&self.pool)
            .await?;
        self.authors_by_id(keys).await
    }

    async fn update_author(&self, author_id: i64, author: &AuthorUpdate) -> StoreResult<AuthorWithBooksRow> {
        let q = sql::update_author(&self.tables);
        tracing::debug!(sql = %q, author_id, "query");
        let keys: Vec<i64> = sqlx::query_scalar(&q)
            .bind(author_id)
            .bind(author.author_id)
            .bind(&author.name)
            .fetch_all(&self.pool)
            .await?;
        self.authors_by_id(keys).await
    }

    async fn delete_author(&self, author_id: i64) -> Result<(), StoreError> {
        let q = sql::delete_author(&self.tables);
        tracing::debug!(sql = %q, "execute");
        sqlx::query(&q).bind(author_id).execute(&self.pool).await?;
        Ok(())
    }

    async fn select_publisher(&self, publisher_id: i64) -> StoreResult<PublisherWithBooksRow> {
        self.publishers_by_id(vec![publisher_id]).await
    }

    async fn insert_publisher(&self, publisher: &PublisherInsert) -> StoreResult<PublisherWithBooksRow> {
        let q = sql::insert_publisher(&self.tables);
        tracing::debug!(sql = %q, publisher_id = publisher.publisher_id, "query");
        let keys: Vec<i64> = sqlx::query_scalar(&q)
            .bind(publisher.publisher_id)
            .bind(&publisher.name)
            .fetch_all(&self.pool)
            .await?;
        self.publishers_by_id(keys).await
    }

    async fn update_publisher(
        &self,
        publisher_id: i64,
        publisher: &PublisherUpdate,
    ) -> StoreResult<PublisherWithBooksRow> {
        let q = sql::update_publisher(&self.tables);
        tracing::debug!(sql = %q, publisher_id, "query");
        let keys: Vec<i64> = sqlx::query_scalar(&q)
            .bind(publisher_id)
            .bind(publisher.publisher_id)
            .bind(&publisher.name)
            .fetch_all(&self.pool)
            .await?;
        self.publishers_by_id(keys).await
    }

    async fn delete_publisher(&self, publisher_id: i64) -> Result<(), StoreError> {
        let q = sql::delete_publisher(&self.tables);
        tracing::debug!(sql = %q, "execute");
        sqlx::query(&q).bind(publisher_id).execute(&self.pool).await?;
        Ok(())
    }

    async fn select_favorite(&self, user_id: &str, isbn: &str) -> StoreResult<BookWithRelationsRow> {
        let q = sql::select_favorites(&self.tables, true);
        tracing::debug!(sql = %q, user_id, isbn, "query");
        self.fetch_json(sqlx::query_scalar(&q).bind(user_id).bind(isbn)).await
    }

    async fn select_favorites(&self, user_id: &str) -> StoreResult<BookWithRelationsRow> {
        let q = sql::select_favorites(&self.tables, false);
        tracing::debug!(sql = %q, user_id, "query");
        self.fetch_json(sqlx::query_scalar(&q).bind(user_id)).await
    }

    async fn insert_favorite(&self, user_id: &str, isbn: &str) -> StoreResult<BookWithRelationsRow> {
        let q = sql::insert_favorite(&self.tables);
        tracing::debug!(sql = %q, user_id, isbn, "query");
        self.fetch_json(sqlx::query_scalar(&q).bind(user_id).bind(isbn)).await
    }

    async fn move_favorite(&self, user_id: &str, from: &str, to: &str) -> StoreResult<BookWithRelationsRow> {
        let q = sql::move_favorite(&self.tables);
        tracing::debug!(sql = %q, user_id, from, to, "query");
        self.fetch_json(sqlx::query_scalar(&q).bind(user_id).bind(from).bind(to)).await
    }

    async fn delete_favorite(&self, user_id: &str, isbn: &str) -> Result<(), StoreError> {
        let q = sql::delete_favorite(&self.tables);
        tracing::debug!(sql = %q, "execute");
        sqlx::query(&q).bind(user_id).bind(isbn).execute(&self.pool).await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}
