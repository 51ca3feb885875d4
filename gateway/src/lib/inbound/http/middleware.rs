use axum::extract::Request;
use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::http::HeaderName;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;

use crate::authentication::errors::AuthError;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

pub const X_USER_ID: &str = "x-user-id";
pub const X_USER_EMAIL: &str = "x-user-email";
pub const X_USER_NAME: &str = "x-user-name";

/// Extension type to store the verified identity in request extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub username: String,
    pub email: String,
    pub full_name: String,
}

impl From<auth::Claims> for AuthenticatedUser {
    fn from(claims: auth::Claims) -> Self {
        Self {
            username: claims.username,
            email: claims.email,
            full_name: claims.full_name,
        }
    }
}

impl AuthenticatedUser {
    /// Write the identity headers, replacing anything the client sent.
    fn propagate(&self, headers: &mut HeaderMap) -> Result<(), ApiError> {
        for (name, value) in [
            (X_USER_ID, &self.username),
            (X_USER_EMAIL, &self.email),
            (X_USER_NAME, &self.full_name),
        ] {
            let value = HeaderValue::from_bytes(value.as_bytes()).map_err(|_| {
                tracing::warn!(header = name, "Token claim cannot be carried in a header");
                ApiError::Unauthorized("Invalid token claims".to_string())
            })?;
            headers.insert(HeaderName::from_static(name), value);
        }

        Ok(())
    }
}

/// Middleware that verifies the bearer token and propagates its identity
pub async fn authorize(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token_from_header(req.headers())?.to_owned();

    let claims = state
        .auth_service
        .authorize(&token)
        .await
        .map_err(ApiError::from)?;

    let user = AuthenticatedUser::from(claims);
    user.propagate(req.headers_mut())?;
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

fn extract_token_from_header(headers: &HeaderMap) -> Result<&str, ApiError> {
    let auth_header = match headers.get(AUTHORIZATION) {
        Some(value) if !value.is_empty() => value,
        _ => return Err(ApiError::Unauthorized("No token provided".to_string())),
    };

    auth_header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::from(AuthError::InvalidAccessToken))
}
