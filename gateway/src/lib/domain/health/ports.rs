use async_trait::async_trait;

use crate::domain::health::errors::HealthError;

/// Dependency checks behind the readiness endpoint.
#[async_trait]
pub trait ReadinessProbe: Send + Sync + 'static {
    /// Check that the credential store answers.
    ///
    /// # Errors
    /// * `DatabaseUnavailable` - Store did not answer
    async fn check_database(&self) -> Result<(), HealthError>;
}
