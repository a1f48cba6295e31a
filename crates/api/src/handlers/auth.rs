//! Handler for `POST /login`.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use staffhub_core::error::CoreError;

use crate::auth::jwt::generate_access_token;
use crate::error::{AppError, AppResult};
use crate::extract::WebInput;
use crate::state::AppState;

/// Login body, accepted as JSON or as a form post.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: &'static str,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub username: String,
    pub role: String,
}

/// POST /login
///
/// Exchange a username and password for a Bearer access token.
pub async fn login(
    State(state): State<AppState>,
    input: WebInput<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let input = input.value?;

    let principal = state
        .auth
        .authenticate(&input.username, &input.password)
        .await?
        .ok_or_else(|| {
            tracing::warn!(username = %input.username, "Failed login attempt");
            AppError::Core(CoreError::Unauthorized(
                "Invalid username or password".into(),
            ))
        })?;

    let jwt = &state.config.jwt;
    let access_token = generate_access_token(&principal.username, &principal.role, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation failed: {e}")))?;

    tracing::info!(username = %principal.username, role = %principal.role, "User logged in");

    Ok(Json(AuthResponse {
        access_token,
        token_type: "Bearer",
        expires_in: jwt.access_token_expiry_mins * 60,
        user: UserInfo {
            username: principal.username,
            role: principal.role,
        },
    }))
}
