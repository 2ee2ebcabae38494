//! Router assembly

use crate::routes::{AppState, tutorial_routes};
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Build the full application router
///
/// Merges health routes, the tutorial routes and any custom routes, then
/// wraps everything in a per-request trace span.
pub fn build_router(state: AppState, custom_routes: Vec<Router>) -> Router {
    let mut app = health_routes().merge(tutorial_routes(state));

    for custom_router in custom_routes {
        app = app.merge(custom_router);
    }

    app.layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}

fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "fieldguard"
    }))
}
