use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::router::AppState;

pub const SERVICE_NAME: &str = "mini-kiosk-central-gateway";

/// Liveness: answers as long as the process serves requests.
pub async fn health() -> ApiSuccess<HealthResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        HealthResponseData {
            status: "healthy",
            service: SERVICE_NAME,
            version: env!("CARGO_PKG_VERSION"),
        },
    )
}

/// Readiness: the credential store must answer.
pub async fn ready(State(state): State<AppState>) -> Response {
    match state.readiness.check_database().await {
        Ok(()) => (
            StatusCode::OK,
            Json(ReadinessResponseData::new("ready", "ok")),
        )
            .into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ReadinessResponseData::new("not_ready", "unavailable")),
            )
                .into_response()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthResponseData {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadinessResponseData {
    pub status: &'static str,
    pub checks: ReadinessChecks,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReadinessChecks {
    pub database: &'static str,
}

impl ReadinessResponseData {
    fn new(status: &'static str, database: &'static str) -> Self {
        Self {
            status,
            checks: ReadinessChecks { database },
        }
    }
}
