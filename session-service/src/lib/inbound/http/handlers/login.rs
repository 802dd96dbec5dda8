use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::session::models::EmailAddress;
use crate::session::models::Role;
use crate::session::models::SessionClaims;

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    // A malformed email or unknown role can never match a credential, so
    // both map to the same failure as a wrong password.
    let email = EmailAddress::new(body.email)
        .map_err(|_| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    let role: Role = body
        .role
        .parse()
        .map_err(|_| ApiError::Unauthorized("Invalid credentials".to_string()))?;

    let session = state
        .session_service
        .authenticate(&email, &body.password, role)
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            token: session.access_token,
            session: (&session.claims).into(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    email: String,
    password: String,
    role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub token: String,
    pub session: SessionData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionData {
    pub email: String,
    pub role: String,
    pub name: String,
    pub issued_at: i64,
    pub expires_at: i64,
}

impl From<&SessionClaims> for SessionData {
    fn from(claims: &SessionClaims) -> Self {
        Self {
            email: claims.sub.clone(),
            role: claims.role.to_string(),
            name: claims.name.clone(),
            issued_at: claims.iat,
            expires_at: claims.exp,
        }
    }
}
