use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::authentication::errors::RefreshTokenError;
use crate::authentication::models::RefreshToken;
use crate::authentication::models::RefreshTokenValue;
use crate::authentication::ports::RefreshTokenRepository;
use crate::user::models::UserId;

#[derive(Debug, FromRow)]
struct RefreshTokenRow {
    id: Uuid,
    user_id: Uuid,
    token: String,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
    last_used_at: Option<DateTime<Utc>>,
}

impl TryFrom<RefreshTokenRow> for RefreshToken {
    type Error = RefreshTokenError;

    fn try_from(row: RefreshTokenRow) -> Result<Self, Self::Error> {
        let token = RefreshTokenValue::new(row.token)
            .map_err(|e| RefreshTokenError::DatabaseError(e.to_string()))?;

        Ok(RefreshToken {
            id: row.id,
            user_id: UserId(row.user_id),
            token,
            expires_at: row.expires_at,
            created_at: row.created_at,
            last_used_at: row.last_used_at,
        })
    }
}

pub struct PostgresRefreshTokenRepository {
    pool: PgPool,
}

impl PostgresRefreshTokenRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RefreshTokenRepository for PostgresRefreshTokenRepository {
    async fn create(&self, token: RefreshToken) -> Result<RefreshToken, RefreshTokenError> {
        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (id, user_id, token, expires_at, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(token.id)
        .bind(token.user_id.0)
        .bind(token.token.as_str())
        .bind(token.expires_at)
        .bind(token.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match e.as_database_error() {
            Some(db_err) if db_err.is_unique_violation() => RefreshTokenError::AlreadyExists,
            _ => RefreshTokenError::DatabaseError(e.to_string()),
        })?;

        Ok(token)
    }

    async fn find_valid(
        &self,
        token: &RefreshTokenValue,
        now: DateTime<Utc>,
    ) -> Result<Option<RefreshToken>, RefreshTokenError> {
        sqlx::query_as::<_, RefreshTokenRow>(
            r#"
            SELECT id, user_id, token, expires_at, created_at, last_used_at
            FROM refresh_tokens
            WHERE token = $1 AND expires_at > $2
            "#,
        )
        .bind(token.as_str())
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RefreshTokenError::DatabaseError(e.to_string()))?
        .map(RefreshToken::try_from)
        .transpose()
    }

    async fn touch_last_used(
        &self,
        token: &RefreshTokenValue,
        now: DateTime<Utc>,
    ) -> Result<(), RefreshTokenError> {
        sqlx::query("UPDATE refresh_tokens SET last_used_at = $1 WHERE token = $2")
            .bind(now)
            .bind(token.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| RefreshTokenError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn delete(&self, token: &RefreshTokenValue) -> Result<(), RefreshTokenError> {
        sqlx::query("DELETE FROM refresh_tokens WHERE token = $1")
            .bind(token.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| RefreshTokenError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
