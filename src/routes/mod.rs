//! Router assembly: resource routes, operational routes, fallback and middleware.

pub mod common;
pub mod resource;

pub use common::{common_routes, ready_routes};
pub use resource::resource_routes;

use crate::model::{Event, Product};
use crate::response::error_response;
use crate::state::AppState;
use crate::store::Gateway;
use axum::{
    http::{header, StatusCode},
    middleware,
    response::Response,
    Router,
};
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Default cap on request bodies, in bytes.
pub const DEFAULT_BODY_LIMIT: usize = 64 * 1024;

/// Products and events.
///
/// | Method | Path |
/// |---|---|
/// | GET | /products, /events |
/// | POST | /product, /event |
/// | GET, PUT, DELETE | /product/:id, /event/:id |
pub fn api_routes(state: AppState) -> Router {
    Router::new()
        .merge(resource_routes::<Product>(state.products, "/products", "/product"))
        .merge(resource_routes::<Event>(state.events, "/events", "/event"))
}

async fn not_found() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

/// Rewrite error responses produced outside the handlers (method router,
/// body limit) into the JSON error body. Handler errors pass through untouched.
async fn json_errors(response: Response) -> Response {
    let status = response.status();
    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"));
    if is_json || !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let message = match status {
        StatusCode::METHOD_NOT_ALLOWED => "Method not allowed",
        StatusCode::PAYLOAD_TOO_LARGE => "Request body too large",
        other => other.canonical_reason().unwrap_or("Request failed"),
    };
    let (parts, _) = response.into_parts();
    let mut rewritten = error_response(status, message);
    for (name, value) in &parts.headers {
        if *name != header::CONTENT_TYPE && *name != header::CONTENT_LENGTH {
            rewritten.headers_mut().append(name.clone(), value.clone());
        }
    }
    rewritten
}

/// Full application router. `/ready` is mounted only when a gateway is given.
pub fn build(state: AppState, gateway: Option<Gateway>, body_limit: usize) -> Router {
    let mut router = Router::new().merge(common_routes()).merge(api_routes(state));
    if let Some(gateway) = gateway {
        router = router.merge(ready_routes(gateway));
    }
    router
        .fallback(not_found)
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(middleware::map_response(json_errors))
        .layer(TraceLayer::new_for_http())
}
