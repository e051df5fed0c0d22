//! Request extractors with domain-shaped rejections.
//!
//! axum's stock `Json` and `Path` extractors answer malformed input with
//! plain-text 422/400 responses, bypassing the `{message, error}` envelope.
//! These wrappers route every deserialization failure through
//! [`AppError::Validation`] instead, so a wrong-typed field gets the same
//! 400 envelope as any other validation failure.

use axum::{
    extract::{
        FromRequest, FromRequestParts, Request,
        rejection::{JsonRejection, PathRejection},
    },
    http::request::Parts,
    response::{IntoResponse, Response},
};
use serde::{Serialize, de::DeserializeOwned};

use crate::error::AppError;

/// JSON body extractor rejecting with [`AppError::Validation`].
///
/// Also usable as a response type, delegating to [`axum::Json`].
#[derive(Debug)]
pub struct Json<T>(pub T);

impl<S, T> FromRequest<S> for Json<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| AppError::Validation(rejection.body_text()))?;
        Ok(Self(value))
    }
}

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// Path parameter extractor rejecting with [`AppError::Validation`].
///
/// A non-UUID id segment is malformed input, not a missing entity.
pub struct Path<T>(pub T);

impl<S, T> FromRequestParts<S> for Path<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let axum::extract::Path(value) =
            axum::extract::Path::<T>::from_request_parts(parts, state)
                .await
                .map_err(|rejection: PathRejection| AppError::Validation(rejection.body_text()))?;
        Ok(Self(value))
    }
}
