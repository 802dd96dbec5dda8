use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedIdentity;

/// Echo the verified claims of the bearer token. Exists mostly so the
/// verification path has a caller; anything protected would consume the
/// same extension.
pub async fn current_session(
    Extension(identity): Extension<AuthenticatedIdentity>,
) -> Result<ApiSuccess<CurrentSessionData>, ApiError> {
    Ok(ApiSuccess::new(
        StatusCode::OK,
        CurrentSessionData {
            email: identity.email,
            role: identity.role.to_string(),
            name: identity.name,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentSessionData {
    pub email: String,
    pub role: String,
    pub name: String,
}
