use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::current_session::current_session;
use super::handlers::health::health;
use super::handlers::login::login;
use super::middleware::authenticate as auth_middleware;
use crate::session::ports::SessionServicePort;

#[derive(Clone)]
pub struct AppState {
    pub session_service: Arc<dyn SessionServicePort>,
}

pub fn create_router(session_service: Arc<dyn SessionServicePort>) -> Router {
    let state = AppState { session_service };

    let public_routes = Router::new()
        .route("/health", get(health))
        .route("/api/session", post(login));

    let protected_routes = Router::new()
        .route("/api/session/me", get(current_session))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
            )
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
