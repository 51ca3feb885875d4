use async_trait::async_trait;
use auth::Claims;
use chrono::DateTime;
use chrono::Utc;

use crate::authentication::errors::AuthError;
use crate::authentication::errors::RefreshTokenError;
use crate::authentication::errors::TokenError;
use crate::authentication::models::AccessToken;
use crate::authentication::models::IssuedTokens;
use crate::authentication::models::LoginCommand;
use crate::authentication::models::RefreshToken;
use crate::authentication::models::RefreshTokenValue;
use crate::authentication::models::RegisterCommand;
use crate::user::models::UserId;

/// Port for authentication domain service operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// # Arguments
    /// * `command` - Validated username, email, names and password
    ///
    /// # Returns
    /// Identifier assigned to the new user
    ///
    /// # Errors
    /// * `UserAlreadyExists` - Username or email is already taken
    /// * `Password` - Password hashing failed
    /// * `User` - User store operation failed
    async fn register(&self, command: RegisterCommand) -> Result<UserId, AuthError>;

    /// Verify credentials and issue an access token plus a refresh token.
    ///
    /// # Arguments
    /// * `command` - Username and presented password
    ///
    /// # Returns
    /// Signed access token, refresh token value and access token lifetime
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password
    /// * `Signing` - Access token could not be signed
    /// * `RefreshToken` - Refresh token could not be persisted
    /// * `User` - User store operation failed
    async fn login(&self, command: LoginCommand) -> Result<IssuedTokens, AuthError>;

    /// Mint a new access token from a refresh token.
    ///
    /// The refresh token stays valid afterwards.
    ///
    /// # Arguments
    /// * `token` - Refresh token value presented by the client
    ///
    /// # Returns
    /// Fresh access token
    ///
    /// # Errors
    /// * `InvalidRefreshToken` - Token is unknown or expired
    /// * `UserNotFound` - Token owner no longer exists
    /// * `Signing` - Access token could not be signed
    async fn refresh(&self, token: &RefreshTokenValue) -> Result<AccessToken, AuthError>;

    /// Revoke a refresh token. Revoking an unknown token succeeds.
    ///
    /// # Errors
    /// * `RefreshToken` - Refresh token store operation failed
    async fn logout(&self, token: &RefreshTokenValue) -> Result<(), AuthError>;

    /// Verify an access token and return its claims.
    ///
    /// Pure verification: never touches the refresh token store.
    ///
    /// # Errors
    /// * `InvalidAccessToken` - Token is malformed, expired, wrongly signed or uses another algorithm
    async fn authorize(&self, access_token: &str) -> Result<Claims, AuthError>;
}

/// Persistence operations for refresh tokens.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync + 'static {
    /// Persist a newly issued refresh token.
    ///
    /// # Errors
    /// * `AlreadyExists` - Token value collides with an outstanding token
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, token: RefreshToken) -> Result<RefreshToken, RefreshTokenError>;

    /// Retrieve a refresh token by exact value if it expires after `now`.
    ///
    /// # Returns
    /// Optional refresh token (None if unknown or expired)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_valid(
        &self,
        token: &RefreshTokenValue,
        now: DateTime<Utc>,
    ) -> Result<Option<RefreshToken>, RefreshTokenError>;

    /// Record that a refresh token was used at `now`.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn touch_last_used(
        &self,
        token: &RefreshTokenValue,
        now: DateTime<Utc>,
    ) -> Result<(), RefreshTokenError>;

    /// Remove a refresh token. Removing an unknown value is not an error.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, token: &RefreshTokenValue) -> Result<(), RefreshTokenError>;
}

/// Signing capability for access tokens, built once at startup.
pub trait TokenSigner: Send + Sync + 'static {
    /// Sign claims into a compact token.
    ///
    /// # Errors
    /// * `SigningFailed` - Claims could not be signed
    fn sign(&self, claims: &Claims) -> Result<String, TokenError>;

    /// Verify a compact token and return its claims.
    ///
    /// # Errors
    /// * `Expired` - Expiry has passed
    /// * `Invalid` - Token is malformed, wrongly signed or uses another algorithm
    fn verify(&self, token: &str) -> Result<Claims, TokenError>;
}
