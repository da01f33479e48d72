use axum::{
    http::HeaderValue,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::{Health, RootMessage};
use service::resolver::Source;

use crate::state::AppState;

pub mod content;
pub mod contact;
pub mod diagnostics;

/// Response header naming which path produced a list: `stored`, `seeded` or `fallback`.
pub const CONTENT_SOURCE_HEADER: &str = "x-content-source";

pub fn source_header(source: &Source) -> HeaderValue {
    HeaderValue::from_static(match source {
        Source::Stored => "stored",
        Source::Seeded => "seeded",
        Source::Fallback(_) => "fallback",
    })
}

pub async fn root() -> Json<RootMessage> {
    Json(RootMessage { message: "Shapewear Bodysuit Backend Running".into() })
}

pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Build the full application router.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    // Public routes (static, health, diagnostics)
    let public = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/test", get(diagnostics::test_database));

    // Content and contact API
    let api = Router::new()
        .route("/api/pricing", get(content::get_pricing))
        .route("/api/blogs", get(content::list_blogs))
        .route("/api/contact", post(contact::submit_contact));

    // Compose
    public
        .merge(api)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // one span per request, method and path included
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // log on arrival
                .on_request(
                    DefaultOnRequest::new()
                        .level(Level::INFO),
                )
                // status code and latency
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // failures (5xx) at ERROR
                .on_failure(
                    DefaultOnFailure::new()
                        .level(Level::ERROR),
                )
        )
}
