//! API router with the session gate wired in

use axum::{Router, middleware::from_fn_with_state, routing::get};
use http::{
    Method,
    header::{AUTHORIZATION, CONTENT_TYPE, COOKIE},
};
use tower_http::LatencyUnit;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use super::handlers::{healthz, public, secure, verify};
use super::middleware::require_session;
use guardnest::AuthGate;

/// Create the API router.
///
/// The endpoints will be available at:
/// - `GET /api/public`, open to everyone
/// - `GET /api/secure`, behind [`require_session`]
/// - `GET /api/verify`, read-only session probe that never renews
/// - `GET /healthz`, liveness probe without CORS headers
pub fn api_router(gate: AuthGate) -> Router {
    api_router_no_trace(gate).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(
                DefaultOnResponse::new()
                    .level(Level::INFO)
                    .latency_unit(LatencyUnit::Millis),
            ),
    )
}

/// Same as [`api_router`] without the HTTP tracing layer.
///
/// Use this if you want to add your own tracing middleware.
pub fn api_router_no_trace(gate: AuthGate) -> Router {
    let api = Router::new()
        .route(
            "/api/secure",
            get(secure).route_layer(from_fn_with_state(gate.clone(), require_session)),
        )
        .route("/api/public", get(public))
        .route("/api/verify", get(verify))
        .with_state(gate)
        .layer(cors_layer());

    api.route("/healthz", get(healthz))
}

/// Mirrors the caller's origin so cookie-bearing cross-origin requests are accepted.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_credentials(true)
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, COOKIE])
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
}
