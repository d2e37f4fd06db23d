use std::collections::HashMap;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::ApiError;

const ERROR_CODES: &str = include_str!("error-code.json");

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status_code, message) = match self {
            ApiError::AuthError(message) => (StatusCode::UNAUTHORIZED, message),
            ApiError::ClientError(message) => {
                (StatusCode::BAD_REQUEST, message)
            }
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::ServerError(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        (status_code, Json(ErrorResponse { message })).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::ClientError(format!(
            "{}: {}",
            error_message("400-001"),
            rejection.body_text()
        ))
    }
}

pub type ApiResponse<T> = Result<T, ApiError>;

pub trait IntoApiResponse<T> {
    fn into_response(self, error_code: &str) -> ApiResponse<T>;
}

impl<T> IntoApiResponse<T> for anyhow::Result<T> {
    fn into_response(self, error_code: &str) -> ApiResponse<T> {
        self.map_err(|e| {
            error!(error_code, error = format!("{:?}", e));

            let message = error_message(error_code);
            match error_code.as_bytes().first() {
                Some(&b'4') => ApiError::ClientError(message),
                _ => ApiError::ServerError(message),
            }
        })
    }
}

/// Message registered for `error_code` in the error table.
pub(crate) fn error_message(error_code: &str) -> String {
    serde_json::from_str::<HashMap<String, String>>(ERROR_CODES)
        .ok()
        .and_then(|mut errors| errors.remove(error_code))
        .unwrap_or_else(|| "Internal server error".to_string())
}
