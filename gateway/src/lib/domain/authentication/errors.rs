use auth::PasswordError;
use thiserror::Error;

use crate::user::errors::UserError;

/// Error for plaintext password policy failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    #[error("Password too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },
}

/// Error for refresh token value parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RefreshTokenValueError {
    #[error("Refresh token cannot be empty")]
    Empty,
}

/// Error for refresh token store operations
#[derive(Debug, Clone, Error)]
pub enum RefreshTokenError {
    #[error("Refresh token value already issued")]
    AlreadyExists,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// Error for signing and verifying access tokens
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token signing failed: {0}")]
    SigningFailed(String),

    #[error("Token is expired")]
    Expired,

    #[error("Token is invalid: {0}")]
    Invalid(String),
}

/// Top-level error for authentication operations
///
/// The 401 variants carry no detail about which check failed.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("User with this username or email already exists")]
    UserAlreadyExists,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid or expired refresh token")]
    InvalidRefreshToken,

    #[error("Invalid or expired token")]
    InvalidAccessToken,

    #[error("User not found")]
    UserNotFound,

    // Infrastructure errors
    #[error("User store error: {0}")]
    User(#[from] UserError),

    #[error("Refresh token store error: {0}")]
    RefreshToken(#[from] RefreshTokenError),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Signing error: {0}")]
    Signing(#[from] TokenError),
}
