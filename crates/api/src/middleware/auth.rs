//! Caller identification for Axum handlers.
//!
//! Two schemes are accepted in the `Authorization` header:
//!
//! - `Basic <base64(username:password)>`, checked against the [`AuthProvider`](crate::auth::provider::AuthProvider);
//! - `Bearer <jwt>`, as issued by `POST /login`.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use staffhub_core::error::CoreError;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// The authenticated caller.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub username: String,
    /// `"admin"` or `"user"`.
    pub role: String,
}

fn unauthorized(message: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(message.into()))
}

/// Split a Basic credential into `(username, password)`.
fn decode_basic(encoded: &str) -> Option<(String, String)> {
    let bytes = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(bytes).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| unauthorized("Authentication required"))?;

        if let Some(encoded) = auth_header.strip_prefix("Basic ") {
            let (username, password) = decode_basic(encoded)
                .ok_or_else(|| unauthorized("Malformed Basic credentials"))?;
            let principal = state
                .auth
                .authenticate(&username, &password)
                .await?
                .ok_or_else(|| {
                    tracing::warn!(%username, "Rejected Basic credentials");
                    unauthorized("Invalid username or password")
                })?;
            return Ok(AuthUser {
                username: principal.username,
                role: principal.role,
            });
        }

        if let Some(token) = auth_header.strip_prefix("Bearer ") {
            let claims = validate_token(token, &state.config.jwt)
                .map_err(|_| unauthorized("Invalid or expired token"))?;
            return Ok(AuthUser {
                username: claims.sub,
                role: claims.role,
            });
        }

        Err(unauthorized(
            "Unsupported Authorization scheme. Expected Basic or Bearer",
        ))
    }
}
