//! Operational routes: liveness, readiness against the database, build info.

use crate::response::ok;
use crate::store::Gateway;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

/// Body of `/health` and `/ready`. `database` is only reported by `/ready`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
}

impl ServiceStatus {
    fn new(status: &str, database: Option<&str>) -> Self {
        ServiceStatus {
            status: status.into(),
            database: database.map(Into::into),
        }
    }
}

/// Body of `/version`, taken from the crate manifest at build time.
#[derive(Debug, Serialize, Deserialize)]
pub struct BuildInfo {
    pub name: String,
    pub version: String,
}

async fn health() -> Response {
    ok(ServiceStatus::new("ok", None)).into_response()
}

async fn ready(State(gateway): State<Gateway>) -> Response {
    match gateway.ping().await {
        Ok(()) => ok(ServiceStatus::new("ok", Some("ok"))).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "database ping failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ServiceStatus::new("degraded", Some("unavailable"))),
            )
                .into_response()
        }
    }
}

async fn version() -> Response {
    ok(BuildInfo {
        name: env!("CARGO_PKG_NAME").into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
    .into_response()
}

/// `/health` and `/version`; neither touches storage.
pub fn common_routes() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/version", get(version))
}

/// `/ready`: 200 when `SELECT 1` succeeds, 503 otherwise.
pub fn ready_routes(gateway: Gateway) -> Router {
    Router::new().route("/ready", get(ready)).with_state(gateway)
}
