use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::AppJson;
use crate::authentication::errors::AuthError;
use crate::authentication::models::IssuedTokens;
use crate::authentication::models::LoginCommand;
use crate::authentication::models::Password;
use crate::inbound::http::router::AppState;
use crate::user::models::Username;

pub async fn login(
    State(state): State<AppState>,
    AppJson(body): AppJson<LoginRequestBody>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    // A username that cannot exist fails exactly like a wrong password.
    let username =
        Username::new(body.username).map_err(|_| ApiError::from(AuthError::InvalidCredentials))?;

    let command = LoginCommand {
        username,
        password: Password::presented(body.password),
    };

    state
        .auth_service
        .login(command)
        .await
        .map_err(ApiError::from)
        .map(|ref tokens| ApiSuccess::new(StatusCode::OK, tokens.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
}

impl From<&IssuedTokens> for LoginResponseData {
    fn from(tokens: &IssuedTokens) -> Self {
        Self {
            access_token: tokens.access_token.token.clone(),
            refresh_token: tokens.refresh_token.as_str().to_string(),
            expires_in: tokens.access_token.expires_in,
        }
    }
}
