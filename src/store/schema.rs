//! DDL for the library tables. Deleting an author or publisher removes its books;
//! deleting a book removes the favorites that point at it.

use crate::sql::Tables;
use sqlx::PgPool;

/// Create the schema and tables if they do not exist. Safe to run on every start.
pub async fn ensure_tables(pool: &PgPool, schema: &str) -> Result<(), sqlx::Error> {
    let t = Tables::new(schema);
    sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS \"{}\"", schema.replace('"', "\"\"")))
        .execute(pool)
        .await?;

    let statements = [
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                author_id BIGINT PRIMARY KEY,
                name TEXT NOT NULL
            )
            "#,
            t.authors
        ),
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                publisher_id BIGINT PRIMARY KEY,
                name TEXT NOT NULL
            )
            "#,
            t.publishers
        ),
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                isbn TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                author_id BIGINT REFERENCES {} (author_id) ON DELETE CASCADE ON UPDATE CASCADE,
                publisher_id BIGINT REFERENCES {} (publisher_id) ON DELETE CASCADE ON UPDATE CASCADE,
                published_at TIMESTAMP
            )
            "#,
            t.books, t.authors, t.publishers
        ),
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                user_id TEXT NOT NULL,
                isbn TEXT NOT NULL REFERENCES {} (isbn) ON DELETE CASCADE ON UPDATE CASCADE,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                PRIMARY KEY (user_id, isbn)
            )
            "#,
            t.favorites, t.books
        ),
    ];
    for ddl in &statements {
        sqlx::query(ddl).execute(pool).await?;
    }
    tracing::info!(schema, "library tables ensured");
    Ok(())
}
