use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;
use serde_json::json;

use crate::authentication::errors::AuthError;

pub mod downstream;
pub mod health;
pub mod login;
pub mod logout;
pub mod refresh_token;
pub mod register;

/// JSON body extractor whose rejections render as `ApiError`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize>(StatusCode, Json<T>);

impl<T: Serialize> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Body did not parse or failed field validation; details are echoed.
    InvalidRequestBody(String),
    BadRequest(String),
    Unauthorized(String),
    Conflict(String),
    InternalServerError(String),
}

impl ApiError {
    pub const INVALID_REQUEST_BODY: &'static str = "Invalid request body";
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::InvalidRequestBody(details) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": Self::INVALID_REQUEST_BODY, "details": details }),
            ),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, json!({ "error": msg })),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, json!({ "error": msg })),
            ApiError::InternalServerError(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": msg }))
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidRequestBody(rejection.body_text())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::UserAlreadyExists => ApiError::Conflict(err.to_string()),
            AuthError::InvalidCredentials
            | AuthError::InvalidRefreshToken
            | AuthError::InvalidAccessToken => ApiError::Unauthorized(err.to_string()),
            AuthError::UserNotFound => ApiError::InternalServerError(err.to_string()),
            AuthError::User(_) | AuthError::RefreshToken(_) => {
                tracing::error!(error = %err, "Credential store failure");
                ApiError::InternalServerError("Database operation failed".to_string())
            }
            AuthError::Password(_) => {
                tracing::error!(error = %err, "Password processing failure");
                ApiError::InternalServerError("Failed to process password".to_string())
            }
            AuthError::Signing(_) => {
                tracing::error!(error = %err, "Token signing failure");
                ApiError::InternalServerError("Could not generate token".to_string())
            }
        }
    }
}
