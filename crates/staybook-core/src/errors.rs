//! Application error type rendered as a JSON response.
//!
//! Every handler returns `Result<_, AppError>`. The error carries the HTTP
//! status, an [`anyhow::Error`] with the human readable message and, for
//! validation failures, a map of field name to messages.
//!
//! ```json
//! {
//!   "error": "Validation failed",
//!   "errors": { "check_out_date": ["check_out_date must be after check_in_date"] }
//! }
//! ```

use std::collections::BTreeMap;

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Field name to validation messages, ordered by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message against `field`.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn merge(&mut self, other: FieldErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Returns `Ok(())` when nothing was recorded.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    /// Comma separated summary, used as the top-level error message.
    pub fn summary(&self) -> String {
        self.0
            .values()
            .flatten()
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl From<&ValidationErrors> for FieldErrors {
    fn from(errors: &ValidationErrors) -> Self {
        let mut fields = FieldErrors::new();
        for (field, errors) in errors.field_errors().iter() {
            for error in errors.iter() {
                let message = error
                    .message
                    .as_ref()
                    .map(|msg| msg.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                fields.add(field.to_string(), message);
            }
        }
        fields
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        FieldErrors::from(&errors)
    }
}

/// JSON body of every error response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub errors: Option<FieldErrors>,
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub error: Error,
    pub fields: Option<FieldErrors>,
}

impl AppError {
    pub fn new<E>(status: StatusCode, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            status,
            error: err.into(),
            fields: None,
        }
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::NOT_FOUND, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::BAD_REQUEST, err)
    }

    pub fn conflict<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::CONFLICT, err)
    }

    pub fn unprocessable<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, err)
    }

    pub fn unauthorized(message: String) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, anyhow::anyhow!(message))
    }

    pub fn forbidden(message: String) -> Self {
        Self::new(StatusCode::FORBIDDEN, anyhow::anyhow!(message))
    }

    pub fn internal_error(message: String) -> Self {
        Self::internal(anyhow::anyhow!(message))
    }

    /// 422 carrying per-field messages.
    pub fn validation(fields: FieldErrors) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            error: anyhow::anyhow!("Validation failed"),
            fields: Some(fields),
        }
    }

    pub fn database<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, err)
    }

    fn body(&self) -> ErrorResponse {
        let error = if self.status.is_server_error() {
            "Internal server error".to_string()
        } else {
            self.error.to_string()
        };

        ErrorResponse {
            error,
            errors: self.fields.clone(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.error)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status.as_u16(), error = ?self.error, "Request failed");
        }

        (self.status, Json(self.body())).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::internal(err)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::database(err)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::validation(FieldErrors::from(&errors))
    }
}

impl From<FieldErrors> for AppError {
    fn from(fields: FieldErrors) -> Self {
        AppError::validation(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(length(min = 1, message = "name is required"))]
        name: String,
        #[validate(email)]
        email: String,
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_field_errors_from_validation_errors() {
        let sample = Sample {
            name: String::new(),
            email: "not-an-email".to_string(),
        };
        let errors = sample.validate().unwrap_err();
        let fields = FieldErrors::from(&errors);

        assert_eq!(fields.get("name"), Some(&["name is required".to_string()][..]));
        assert_eq!(fields.get("email"), Some(&["email is invalid".to_string()][..]));
    }

    #[test]
    fn test_field_errors_merge_appends_messages() {
        let mut a = FieldErrors::new();
        a.add("check_in_date", "check_in_date is required");
        let mut b = FieldErrors::new();
        b.add("check_in_date", "check_in_date must be a date");
        b.add("room_id", "room_id is required");

        a.merge(b);

        assert_eq!(a.get("check_in_date").map(<[String]>::len), Some(2));
        assert!(a.contains("room_id"));
    }

    #[test]
    fn test_empty_field_errors_into_ok() {
        assert!(FieldErrors::new().into_result().is_ok());
    }

    #[test]
    fn test_constructor_statuses() {
        assert_eq!(AppError::not_found(anyhow::anyhow!("x")).status, StatusCode::NOT_FOUND);
        assert_eq!(AppError::conflict(anyhow::anyhow!("x")).status, StatusCode::CONFLICT);
        assert_eq!(AppError::forbidden("x".into()).status, StatusCode::FORBIDDEN);
        assert_eq!(AppError::unauthorized("x".into()).status, StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::bad_request(anyhow::anyhow!("x")).status, StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::validation(FieldErrors::new()).status,
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[tokio::test]
    async fn test_validation_response_body_lists_fields() {
        let mut fields = FieldErrors::new();
        fields.add("guest_name", "guest_name is required");

        let body = body_json(AppError::validation(fields).into_response()).await;

        assert_eq!(body["error"], "Validation failed");
        assert_eq!(body["errors"]["guest_name"][0], "guest_name is required");
    }

    #[tokio::test]
    async fn test_server_error_hides_details() {
        let response = AppError::internal(anyhow::anyhow!("connection refused")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Internal server error");
        assert!(body.get("errors").is_none());
    }

    #[tokio::test]
    async fn test_client_error_keeps_message() {
        let body = body_json(AppError::conflict(anyhow::anyhow!("Room is taken")).into_response()).await;
        assert_eq!(body["error"], "Room is taken");
    }
}
