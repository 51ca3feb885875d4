use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Extension;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::request_id::MakeRequestUuid;
use tower_http::request_id::PropagateRequestIdLayer;
use tower_http::request_id::SetRequestIdLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::downstream::forward;
use super::handlers::health::health;
use super::handlers::health::ready;
use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::refresh_token::refresh_token;
use super::handlers::register::register;
use super::middleware::authorize;
use crate::authentication::ports::AuthServicePort;
use crate::domain::health::ports::ReadinessProbe;
use crate::downstream::DownstreamService;
use crate::downstream::DownstreamTargets;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub readiness: Arc<dyn ReadinessProbe>,
    pub downstream: Arc<DownstreamTargets>,
}

pub const X_REQUEST_ID: &str = "x-request-id";

pub fn create_router(
    auth_service: Arc<dyn AuthServicePort>,
    readiness: Arc<dyn ReadinessProbe>,
    downstream: DownstreamTargets,
) -> Router {
    let state = AppState {
        auth_service,
        readiness,
        downstream: Arc::new(downstream),
    };

    let auth_routes = Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh", post(refresh_token).get(refresh_token))
        .route("/logout", post(logout));

    let protected_routes = Router::new()
        .nest("/orders", orders_routes())
        .nest("/inventory", inventory_routes())
        .nest("/payments", payments_routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), authorize));

    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .merge(protected_routes);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            let request_id = request
                .headers()
                .get(X_REQUEST_ID)
                .and_then(|value| value.to_str().ok())
                .unwrap_or_default();

            // The request id is the only header recorded: Authorization carries bearer tokens.
            tracing::info_span!(
                "http_request",
                request_id = %request_id,
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .nest("/api/v1", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(trace_layer)
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

fn orders_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(forward).post(forward))
        .route("/:id", get(forward).put(forward).delete(forward))
        .layer(Extension(DownstreamService::Orders))
}

fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(forward))
        .route("/:id", get(forward).put(forward))
        .layer(Extension(DownstreamService::Inventory))
}

fn payments_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(forward))
        .route("/:id", get(forward))
        .route("/:id/refund", post(forward))
        .layer(Extension(DownstreamService::Payments))
}
