use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::ApiError;
use super::ApiSuccess;
use super::AppJson;
use crate::authentication::errors::PasswordPolicyError;
use crate::authentication::models::Password;
use crate::authentication::models::RegisterCommand;
use crate::inbound::http::router::AppState;
use crate::user::errors::EmailError;
use crate::user::errors::NameError;
use crate::user::errors::UsernameError;
use crate::user::models::EmailAddress;
use crate::user::models::PersonName;
use crate::user::models::Username;

pub async fn register(
    State(state): State<AppState>,
    AppJson(body): AppJson<RegisterRequest>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError> {
    state
        .auth_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|id| {
            ApiSuccess::new(
                StatusCode::CREATED,
                RegisterResponseData {
                    id: id.to_string(),
                    message: "User registered successfully".to_string(),
                },
            )
        })
}

/// HTTP request body for registering a user (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    username: String,
    email: String,
    first_name: String,
    last_name: String,
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error("All fields are required and cannot be empty")]
    EmptyField,

    #[error("Invalid username: {0}")]
    Username(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid name: {0}")]
    Name(#[from] NameError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordPolicyError),
}

impl RegisterRequest {
    // The password is taken verbatim; every other field is trimmed.
    fn try_into_command(self) -> Result<RegisterCommand, ParseRegisterRequestError> {
        let username = self.username.trim();
        let email = self.email.trim();
        let first_name = self.first_name.trim();
        let last_name = self.last_name.trim();

        if [username, email, first_name, last_name]
            .iter()
            .any(|field| field.is_empty())
        {
            return Err(ParseRegisterRequestError::EmptyField);
        }

        Ok(RegisterCommand {
            username: Username::new(username.to_string())?,
            email: EmailAddress::new(email.to_string())?,
            first_name: PersonName::new(first_name.to_string())?,
            last_name: PersonName::new(last_name.to_string())?,
            password: Password::new(self.password)?,
        })
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        match err {
            ParseRegisterRequestError::EmptyField => ApiError::BadRequest(err.to_string()),
            _ => ApiError::InvalidRequestBody(err.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub id: String,
    pub message: String,
}
