use std::fmt;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use uuid::Uuid;

use crate::authentication::errors::PasswordPolicyError;
use crate::authentication::errors::RefreshTokenValueError;
use crate::user::models::EmailAddress;
use crate::user::models::PersonName;
use crate::user::models::UserId;
use crate::user::models::Username;

/// Access token lifetime in seconds, also reported to clients as `expires_in`.
pub const ACCESS_TOKEN_TTL_SECONDS: i64 = 900;

/// Refresh token lifetime in days.
pub const REFRESH_TOKEN_TTL_DAYS: i64 = 7;

/// Plaintext password as received from a client.
///
/// Never printed: `Debug` is redacted and there is no `Display`.
#[derive(Clone)]
pub struct Password(String);

impl Password {
    const MIN_LENGTH: usize = 6;

    /// Accept a password chosen at registration.
    ///
    /// # Errors
    /// * `TooShort` - Fewer than 6 characters
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        let length = password.chars().count();
        if length < Self::MIN_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }
        Ok(Self(password))
    }

    /// Wrap a password presented at login. No policy applies: a wrong
    /// password is reported as bad credentials, not as a validation error.
    pub fn presented(password: String) -> Self {
        Self(password)
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Opaque refresh token value handed to clients.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct RefreshTokenValue(String);

impl RefreshTokenValue {
    /// Generate a fresh unguessable value (random UUID v4).
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// # Errors
    /// * `Empty` - Value is empty
    pub fn new(value: String) -> Result<Self, RefreshTokenValueError> {
        if value.is_empty() {
            return Err(RefreshTokenValueError::Empty);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RefreshTokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RefreshTokenValue(<redacted>)")
    }
}

/// Server-side record of an issued refresh token.
#[derive(Debug, Clone)]
pub struct RefreshToken {
    pub id: Uuid,
    pub user_id: UserId,
    pub token: RefreshTokenValue,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
}

impl RefreshToken {
    /// Issue a new refresh token for `user_id`, valid for seven days from `now`.
    pub fn issue(user_id: UserId, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            token: RefreshTokenValue::generate(),
            expires_at: now + Duration::days(REFRESH_TOKEN_TTL_DAYS),
            created_at: now,
            last_used_at: None,
        }
    }

    /// A token is usable only while its expiry is strictly in the future.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Command to register a new user with domain types
#[derive(Debug)]
pub struct RegisterCommand {
    pub username: Username,
    pub email: EmailAddress,
    pub first_name: PersonName,
    pub last_name: PersonName,
    pub password: Password,
}

/// Command to log in with a username and password
#[derive(Debug)]
pub struct LoginCommand {
    pub username: Username,
    pub password: Password,
}

/// Signed access token plus its lifetime in seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub token: String,
    pub expires_in: i64,
}

/// Token material returned by a successful login.
#[derive(Debug, Clone)]
pub struct IssuedTokens {
    pub access_token: AccessToken,
    pub refresh_token: RefreshTokenValue,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_policy() {
        assert!(Password::new("secret1".to_string()).is_ok());
        assert_eq!(
            Password::new("short".to_string()).unwrap_err(),
            PasswordPolicyError::TooShort { min: 6, actual: 5 }
        );
    }

    #[test]
    fn test_password_debug_is_redacted() {
        let password = Password::new("hunter22".to_string()).unwrap();
        assert!(!format!("{:?}", password).contains("hunter22"));
    }

    #[test]
    fn test_generated_refresh_tokens_differ() {
        let first = RefreshTokenValue::generate();
        let second = RefreshTokenValue::generate();

        assert_ne!(first, second);
        assert!(Uuid::parse_str(first.as_str()).is_ok());
    }

    #[test]
    fn test_refresh_token_value_rejects_empty() {
        assert_eq!(
            RefreshTokenValue::new(String::new()),
            Err(RefreshTokenValueError::Empty)
        );
    }

    #[test]
    fn test_refresh_token_issue_and_expiry() {
        let now = Utc::now();
        let token = RefreshToken::issue(UserId::new(), now);

        assert_eq!(token.expires_at - now, Duration::days(7));
        assert_eq!(token.created_at, now);
        assert!(token.last_used_at.is_none());
        assert!(!token.is_expired(now));
        assert!(!token.is_expired(token.expires_at - Duration::seconds(1)));
        assert!(token.is_expired(token.expires_at));
    }
}
