//! JSON body extractors that validate before the handler runs.
//!
//! - [`ValidatedJson`] deserializes `T` and runs its `validator` rules.
//! - [`NormalizedJson`] deserializes a loose wire payload, normalizes it into
//!   a canonical DTO, then validates that DTO.
//!
//! Malformed bodies are rejected with 400; field problems with 422 and a
//! field → messages map.

use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use staybook_core::{AppError, FieldErrors};

fn json_rejection(rejection: JsonRejection) -> AppError {
    let error_msg = rejection.body_text();

    if error_msg.contains("missing field") {
        let field = error_msg
            .split("missing field `")
            .nth(1)
            .and_then(|s| s.split('`').next())
            .unwrap_or("unknown");
        return AppError::new(StatusCode::BAD_REQUEST, anyhow!("{} is required", field));
    }

    if error_msg.contains("invalid type") {
        return AppError::new(
            StatusCode::BAD_REQUEST,
            anyhow!("Invalid field type in request"),
        );
    }

    if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
        return AppError::new(
            StatusCode::BAD_REQUEST,
            anyhow!("Missing 'Content-Type: application/json' header"),
        );
    }

    AppError::new(StatusCode::BAD_REQUEST, anyhow!("Invalid request body"))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_rejection)?;

        value.validate()?;

        Ok(ValidatedJson(value))
    }
}

/// A wire payload that can be reshaped into one canonical request type.
pub trait Normalize {
    type Output: Validate;

    fn normalize(self) -> Result<Self::Output, FieldErrors>;
}

/// Extracts `T`, normalizes it, and hands the handler `T::Output`.
pub struct NormalizedJson<T: Normalize>(pub T::Output);

impl<T, S> FromRequest<S> for NormalizedJson<T>
where
    T: DeserializeOwned + Normalize,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(raw) = Json::<T>::from_request(req, state)
            .await
            .map_err(json_rejection)?;

        let value = raw.normalize().map_err(AppError::validation)?;
        value.validate()?;

        Ok(NormalizedJson(value))
    }
}
