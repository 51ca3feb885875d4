use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use super::AppJson;
use crate::authentication::models::AccessToken;
use crate::authentication::models::RefreshTokenValue;
use crate::inbound::http::router::AppState;

pub async fn refresh_token(
    State(state): State<AppState>,
    AppJson(body): AppJson<RefreshTokenRequestBody>,
) -> Result<ApiSuccess<RefreshTokenResponseData>, ApiError> {
    let token = body.try_into_value()?;

    state
        .auth_service
        .refresh(&token)
        .await
        .map_err(ApiError::from)
        .map(|ref access| ApiSuccess::new(StatusCode::OK, access.into()))
}

/// Body shared by refresh and logout.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RefreshTokenRequestBody {
    refresh_token: String,
}

impl RefreshTokenRequestBody {
    pub fn try_into_value(self) -> Result<RefreshTokenValue, ApiError> {
        RefreshTokenValue::new(self.refresh_token)
            .map_err(|e| ApiError::InvalidRequestBody(e.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RefreshTokenResponseData {
    pub access_token: String,
    pub expires_in: i64,
}

impl From<&AccessToken> for RefreshTokenResponseData {
    fn from(access: &AccessToken) -> Self {
        Self {
            access_token: access.token.clone(),
            expires_in: access.expires_in,
        }
    }
}
