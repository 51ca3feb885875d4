use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::refresh_token::RefreshTokenRequestBody;
use super::ApiError;
use super::ApiSuccess;
use super::AppJson;
use crate::inbound::http::router::AppState;

pub async fn logout(
    State(state): State<AppState>,
    AppJson(body): AppJson<RefreshTokenRequestBody>,
) -> Result<ApiSuccess<LogoutResponseData>, ApiError> {
    let token = body.try_into_value()?;

    state
        .auth_service
        .logout(&token)
        .await
        .map_err(ApiError::from)
        .map(|_| {
            ApiSuccess::new(
                StatusCode::OK,
                LogoutResponseData {
                    message: "Logged out successfully".to_string(),
                },
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogoutResponseData {
    pub message: String,
}
