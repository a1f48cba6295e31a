//! Outcome reporting for the web surface.
//!
//! Form posts are answered with a 303 redirect carrying `?success=<flag>` or
//! `?error=<message>`; JSON posts get the entity or the error envelope.

use std::future::Future;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use serde::Serialize;
use staffhub_core::error::CoreError;

use crate::error::AppResult;
use crate::extract::BodyKind;

/// Where a form submission lands and what it reports on success.
pub struct Landing<'a> {
    pub location: &'a str,
    pub success: &'a str,
}

/// Run a service call on a successfully bound input, passing binding errors through.
pub async fn with_input<I, T, F, Fut>(value: AppResult<I>, call: F) -> AppResult<T>
where
    F: FnOnce(I) -> Fut,
    Fut: Future<Output = Result<T, CoreError>>,
{
    Ok(call(value?).await?)
}

/// Percent-encode a raw path value so it can be placed back into a `Location`.
pub fn path_segment(raw: &str) -> String {
    url::form_urlencoded::byte_serialize(raw.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// Redirect to `location` with a single flash query parameter.
pub fn redirect_with(location: &str, key: &str, value: &str) -> Response {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair(key, value)
        .finish();
    Redirect::to(&format!("{location}?{query}")).into_response()
}

/// Report `result` according to how the body was submitted.
///
/// JSON successes use `status`; `204 No Content` sends no body.
pub fn respond<T: Serialize>(
    kind: BodyKind,
    landing: Landing<'_>,
    status: StatusCode,
    result: AppResult<T>,
) -> Response {
    match (kind, result) {
        (BodyKind::Form, Ok(_)) => redirect_with(landing.location, "success", landing.success),
        (BodyKind::Form, Err(err)) => {
            let (_, _, message) = err.classify();
            tracing::warn!(location = landing.location, %message, "Form submission rejected");
            redirect_with(landing.location, "error", &message)
        }
        (BodyKind::Json, Ok(_)) if status == StatusCode::NO_CONTENT => status.into_response(),
        (BodyKind::Json, Ok(value)) => (status, Json(value)).into_response(),
        (BodyKind::Json, Err(err)) => err.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use axum::http::header::LOCATION;

    use super::*;
    use crate::error::AppError;

    #[test]
    fn path_segment_escapes_control_and_reserved_characters() {
        assert_eq!(path_segment("65f1c0ffee"), "65f1c0ffee");
        assert_eq!(path_segment("abc\n"), "abc%0A");
        assert_eq!(path_segment("a b/c?d+e"), "a%20b%2Fc%3Fd%2Be");
    }

    #[test]
    fn form_error_redirects_with_encoded_message() {
        let response = respond::<()>(
            BodyKind::Form,
            Landing {
                location: "/employees",
                success: "created",
            },
            StatusCode::CREATED,
            Err(AppError::BadRequest("Name is required & more".into())),
        );
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers()[LOCATION],
            "/employees?error=Name+is+required+%26+more"
        );
    }

    #[test]
    fn json_success_uses_status() {
        let response = respond(
            BodyKind::Json,
            Landing {
                location: "/employees",
                success: "created",
            },
            StatusCode::CREATED,
            Ok(serde_json::json!({ "id": 1 })),
        );
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}
