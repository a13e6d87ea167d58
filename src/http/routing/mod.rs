use axum::{routing::get, Router};
use http::header::HeaderName;
use http::HeaderValue;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::http::docs;
use crate::http::routes::weather;

/// Header reporting which API version serves a route group.
const SUPPORTED_VERSIONS: &str = "api-supported-versions";

/// Assembles the full surface: the todo group (v2), the weather sample
/// group (v1), the generated docs and a liveness probe.
pub fn app(todos: Router) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .merge(docs::router())
        .merge(weather::router().layer(version_header("1.0")))
        .merge(todos.layer(version_header("2.0")))
        .layer(TraceLayer::new_for_http())
}

fn version_header(version: &'static str) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(
        HeaderName::from_static(SUPPORTED_VERSIONS),
        HeaderValue::from_static(version),
    )
}
