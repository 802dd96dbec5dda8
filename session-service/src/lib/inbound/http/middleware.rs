use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::inbound::http::router::AppState;
use crate::session::models::Role;

/// Extension type carrying the verified identity of the bearer token
#[derive(Debug, Clone)]
pub struct AuthenticatedIdentity {
    pub email: String,
    pub role: Role,
    pub name: String,
}

/// Middleware that verifies the bearer token and stashes the identity in
/// request extensions. Every failure maps to the same 401 body; the caller
/// never learns whether the header was absent, the scheme wrong, or the
/// token malformed, forged, or expired.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_token_from_header(&req)?;

    let claims = state.session_service.verify_session(token).await.map_err(|e| {
        tracing::warn!("Token verification failed: {}", e);
        unauthorized()
    })?;

    req.extensions_mut().insert(AuthenticatedIdentity {
        email: claims.sub,
        role: claims.role,
        name: claims.name,
    });

    Ok(next.run(req).await)
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "Invalid or expired token"
        })),
    )
        .into_response()
}

fn extract_token_from_header(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(unauthorized)?;

    let auth_str = auth_header.to_str().map_err(|_| unauthorized())?;

    auth_str.strip_prefix("Bearer ").ok_or_else(unauthorized)
}
