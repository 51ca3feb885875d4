use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::health::errors::HealthError;
use crate::domain::health::ports::ReadinessProbe;

pub struct PostgresReadinessProbe {
    pool: PgPool,
}

impl PostgresReadinessProbe {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReadinessProbe for PostgresReadinessProbe {
    async fn check_database(&self) -> Result<(), HealthError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| HealthError::DatabaseUnavailable(e.to_string()))
    }
}
