use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum HealthError {
    #[error("Database unavailable: {0}")]
    DatabaseUnavailable(String),
}
