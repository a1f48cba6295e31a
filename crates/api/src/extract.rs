//! Request extractors whose rejections render as the error envelope, plus
//! [`WebInput`] for endpoints that accept either a form post or JSON.

use std::convert::Infallible;

use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::header::CONTENT_TYPE;
use axum::{Form, Json};
use serde::de::DeserializeOwned;

use crate::error::{AppError, AppResult};

/// `axum::Json` with an [`AppError`] rejection.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// `axum::extract::Path` with an [`AppError`] rejection.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct PathParam<T>(pub T);

/// `axum::extract::Query` with an [`AppError`] rejection.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct QueryParams<T>(pub T);

/// How the client submitted a body, which decides how the outcome is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// `application/x-www-form-urlencoded`: answer with a redirect.
    Form,
    /// Anything else is parsed as JSON: answer with JSON.
    Json,
}

/// An input type that can also be bound from an all-text HTML form.
pub trait FormBinding: DeserializeOwned + Sized {
    type Form: DeserializeOwned + Send;

    fn from_form(form: Self::Form) -> AppResult<Self>;
}

/// A body bound from a form or JSON depending on `Content-Type`.
///
/// Binding failures are kept in `value` rather than rejecting the request,
/// so a form post can still be answered with a redirect.
pub struct WebInput<T> {
    pub kind: BodyKind,
    pub value: AppResult<T>,
}

impl<T, S> FromRequest<S> for WebInput<T>
where
    T: FormBinding,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

        if is_form {
            let value = match Form::<T::Form>::from_request(req, state).await {
                Ok(Form(form)) => T::from_form(form),
                Err(rejection) => Err(rejection.into()),
            };
            return Ok(Self {
                kind: BodyKind::Form,
                value,
            });
        }

        let value = Json::<T>::from_request(req, state)
            .await
            .map(|Json(v)| v)
            .map_err(AppError::from);
        Ok(Self {
            kind: BodyKind::Json,
            value,
        })
    }
}
