use std::sync::Arc;

use async_trait::async_trait;
use auth::Claims;
use auth::PasswordError;
use auth::PasswordHasher;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::authentication::errors::AuthError;
use crate::authentication::models::AccessToken;
use crate::authentication::models::IssuedTokens;
use crate::authentication::models::LoginCommand;
use crate::authentication::models::Password;
use crate::authentication::models::RefreshToken;
use crate::authentication::models::RefreshTokenValue;
use crate::authentication::models::RegisterCommand;
use crate::authentication::models::ACCESS_TOKEN_TTL_SECONDS;
use crate::authentication::ports::AuthServicePort;
use crate::authentication::ports::RefreshTokenRepository;
use crate::authentication::ports::TokenSigner;
use crate::user::errors::UserError;
use crate::user::models::User;
use crate::user::models::UserId;
use crate::user::ports::UserRepository;

/// Domain service implementation for authentication operations.
///
/// Concrete implementation of AuthServicePort with dependency injection.
pub struct AuthService<UR, TR, TS>
where
    UR: UserRepository,
    TR: RefreshTokenRepository,
    TS: TokenSigner,
{
    users: Arc<UR>,
    refresh_tokens: Arc<TR>,
    signer: Arc<TS>,
    password_hasher: PasswordHasher,
}

impl<UR, TR, TS> AuthService<UR, TR, TS>
where
    UR: UserRepository,
    TR: RefreshTokenRepository,
    TS: TokenSigner,
{
    /// Create a new authentication service with injected dependencies.
    ///
    /// # Arguments
    /// * `users` - User persistence implementation
    /// * `refresh_tokens` - Refresh token persistence implementation
    /// * `signer` - Access token signing capability
    pub fn new(users: Arc<UR>, refresh_tokens: Arc<TR>, signer: Arc<TS>) -> Self {
        Self {
            users,
            refresh_tokens,
            signer,
            password_hasher: PasswordHasher::new(),
        }
    }

    /// Replace the default bcrypt cost.
    pub fn with_password_hasher(mut self, password_hasher: PasswordHasher) -> Self {
        self.password_hasher = password_hasher;
        self
    }

    fn issue_access_token(
        &self,
        user: &User,
        issued_at: DateTime<Utc>,
    ) -> Result<AccessToken, AuthError> {
        let claims = Claims::for_user(
            user.username.as_str(),
            user.email.as_str(),
            user.full_name(),
            issued_at,
            Duration::seconds(ACCESS_TOKEN_TTL_SECONDS),
        );

        let token = self.signer.sign(&claims)?;

        Ok(AccessToken {
            token,
            expires_in: ACCESS_TOKEN_TTL_SECONDS,
        })
    }

    // bcrypt is CPU bound; keep it off the async workers.
    async fn hash_password(&self, password: &Password) -> Result<String, AuthError> {
        let hasher = self.password_hasher;
        let password = password.expose().to_owned();

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?
            .map_err(AuthError::from)
    }

    async fn verify_password(
        &self,
        password: &Password,
        password_hash: &str,
    ) -> Result<bool, PasswordError> {
        let hasher = self.password_hasher;
        let password = password.expose().to_owned();
        let password_hash = password_hash.to_owned();

        tokio::task::spawn_blocking(move || hasher.verify(&password, &password_hash))
            .await
            .map_err(|e| PasswordError::VerificationFailed(e.to_string()))?
    }
}

#[async_trait]
impl<UR, TR, TS> AuthServicePort for AuthService<UR, TR, TS>
where
    UR: UserRepository,
    TR: RefreshTokenRepository,
    TS: TokenSigner,
{
    async fn register(&self, command: RegisterCommand) -> Result<UserId, AuthError> {
        if let Some(existing) = self
            .users
            .find_by_username_or_email(&command.username, &command.email)
            .await?
        {
            tracing::warn!(
                existing_user_id = %existing.id,
                "Registration rejected: username or email already taken"
            );
            return Err(AuthError::UserAlreadyExists);
        }

        let password_hash = self.hash_password(&command.password).await?;

        let user = User {
            id: UserId::new(),
            username: command.username,
            email: command.email,
            first_name: command.first_name,
            last_name: command.last_name,
            password_hash,
            created_at: Utc::now(),
        };

        // A concurrent registration can still win the race; the unique
        // constraints surface it here.
        let created = self.users.create(user).await.map_err(|e| match e {
            UserError::UsernameAlreadyExists(_) | UserError::EmailAlreadyExists(_) => {
                AuthError::UserAlreadyExists
            }
            other => AuthError::User(other),
        })?;

        tracing::info!(user_id = %created.id, username = %created.username, "User registered");

        Ok(created.id)
    }

    async fn login(&self, command: LoginCommand) -> Result<IssuedTokens, AuthError> {
        let user = match self.users.find_by_username(&command.username).await? {
            Some(user) => user,
            None => {
                tracing::warn!(username = %command.username, "Login failed: unknown username");
                return Err(AuthError::InvalidCredentials);
            }
        };

        match self
            .verify_password(&command.password, &user.password_hash)
            .await
        {
            Ok(true) => {}
            Ok(false) => {
                tracing::warn!(user_id = %user.id, "Login failed: wrong password");
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => {
                tracing::warn!(user_id = %user.id, error = %e, "Login failed: unreadable password hash");
                return Err(AuthError::InvalidCredentials);
            }
        }

        let now = Utc::now();
        let access_token = self.issue_access_token(&user, now)?;

        let refresh_token = self
            .refresh_tokens
            .create(RefreshToken::issue(user.id, now))
            .await?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(IssuedTokens {
            access_token,
            refresh_token: refresh_token.token,
        })
    }

    async fn refresh(&self, token: &RefreshTokenValue) -> Result<AccessToken, AuthError> {
        let now = Utc::now();

        let stored = self
            .refresh_tokens
            .find_valid(token, now)
            .await?
            .filter(|stored| !stored.is_expired(now))
            .ok_or_else(|| {
                tracing::warn!("Refresh rejected: unknown or expired refresh token");
                AuthError::InvalidRefreshToken
            })?;

        let user = self
            .users
            .find_by_id(&stored.user_id)
            .await?
            .ok_or_else(|| {
                tracing::error!(user_id = %stored.user_id, "Refresh token owner not found");
                AuthError::UserNotFound
            })?;

        let access_token = self.issue_access_token(&user, now)?;

        if let Err(e) = self.refresh_tokens.touch_last_used(token, now).await {
            tracing::warn!(
                refresh_token_id = %stored.id,
                error = %e,
                "Failed to record refresh token use"
            );
        }

        Ok(access_token)
    }

    async fn logout(&self, token: &RefreshTokenValue) -> Result<(), AuthError> {
        self.refresh_tokens.delete(token).await?;
        Ok(())
    }

    async fn authorize(&self, access_token: &str) -> Result<Claims, AuthError> {
        self.signer.verify(access_token).map_err(|e| {
            tracing::warn!(error = %e, "Access token rejected");
            AuthError::InvalidAccessToken
        })
    }
}
