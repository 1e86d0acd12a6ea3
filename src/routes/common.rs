//! Liveness, readiness and build info.

use crate::classify::{classify_ack, Outcome};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

/// Probe answer. `store` is only reported by readiness.
#[derive(Serialize)]
struct Probe {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    store: Option<&'static str>,
}

#[derive(Serialize)]
struct BuildInfo {
    name: &'static str,
    version: &'static str,
}

async fn liveness() -> Json<Probe> {
    Json(Probe {
        status: "ok",
        store: None,
    })
}

/// 200 while the store answers a ping, 503 otherwise.
async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<Probe>) {
    match classify_ack("ping", state.store.ping().await) {
        Outcome::Success(()) => (
            StatusCode::OK,
            Json(Probe {
                status: "ok",
                store: Some("ok"),
            }),
        ),
        Outcome::Nothing | Outcome::Error => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(Probe {
                status: "degraded",
                store: Some("unavailable"),
            }),
        ),
    }
}

async fn build_info() -> Json<BuildInfo> {
    Json(BuildInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// GET /health, GET /ready, GET /version.
pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(liveness))
        .route("/ready", get(readiness))
        .route("/version", get(build_info))
        .with_state(state)
}
