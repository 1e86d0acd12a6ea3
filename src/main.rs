//! Server binary: reads configuration, connects to Postgres and the auth service, serves the API.

use bookshelf_api::{app, ensure_tables, AppState, Config, GoTrueClient, PgStore};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bookshelf_api=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    if config.ensure_tables {
        ensure_tables(&pool, &config.schema).await?;
    }

    let state = AppState::new(
        Arc::new(PgStore::new(pool, &config.schema)),
        Arc::new(GoTrueClient::new(
            &config.backend_url,
            &config.anon_key,
            &config.service_role_key,
        )),
    );

    let listener = TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app(state)).await?;
    Ok(())
}
