//! Liveness endpoint reporting whether the wiki's store answers queries.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Body of `GET /health`.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the store is unreachable.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    pub db_healthy: bool,
}

/// GET /health
///
/// Always answers 200 so the process counts as alive; the store's state is
/// carried in the body.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = match wiki_db::health_check(&state.pool).await {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(error = %err, "Store health check failed");
            false
        }
    };

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}

/// Routes served outside the page namespace.
///
/// `health` is a reserved page name so this route never shadows a page.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
