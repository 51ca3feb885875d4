use axum::extract::OriginalUri;
use axum::extract::Path;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::Method;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiSuccess;
use crate::downstream::DownstreamService;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::middleware::X_USER_EMAIL;
use crate::inbound::http::middleware::X_USER_ID;
use crate::inbound::http::middleware::X_USER_NAME;
use crate::inbound::http::router::AppState;

/// Stand-in for forwarding to a downstream service.
///
/// Reports the resolved upstream URL and timeout together with the identity
/// headers a forwarded request would carry.
pub async fn forward(
    State(state): State<AppState>,
    Extension(service): Extension<DownstreamService>,
    Extension(user): Extension<AuthenticatedUser>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    resource_id: Option<Path<String>>,
    headers: HeaderMap,
) -> ApiSuccess<ForwardResponseData> {
    let target = state.downstream.get(service);
    let action = action_for(&method, uri.path(), resource_id.is_some());

    tracing::debug!(
        service = %service,
        action,
        username = %user.username,
        "Downstream forwarding not implemented"
    );

    ApiSuccess::new(
        StatusCode::OK,
        ForwardResponseData {
            message: format!("This endpoint will proxy to {} service", service),
            service: service.as_str(),
            action,
            status: "not_implemented",
            upstream_url: target.url_for(uri.path()),
            upstream_timeout_secs: target.timeout.as_secs(),
            resource_id: resource_id.map(|Path(id)| id),
            identity: ForwardedIdentity {
                user_id: header_string(&headers, X_USER_ID),
                email: header_string(&headers, X_USER_EMAIL),
                name: header_string(&headers, X_USER_NAME),
            },
        },
    )
}

fn action_for(method: &Method, path: &str, has_id: bool) -> &'static str {
    if path.ends_with("/refund") {
        return "refund";
    }

    match (method, has_id) {
        (&Method::GET, false) => "list",
        (&Method::POST, false) => "create",
        (&Method::GET, true) => "get",
        (&Method::PUT, true) => "update",
        (&Method::DELETE, true) => "delete",
        _ => "unsupported",
    }
}

fn header_string(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForwardResponseData {
    pub message: String,
    pub service: &'static str,
    pub action: &'static str,
    pub status: &'static str,
    pub upstream_url: String,
    pub upstream_timeout_secs: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    pub identity: ForwardedIdentity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForwardedIdentity {
    #[serde(rename = "X-User-ID")]
    pub user_id: Option<String>,
    #[serde(rename = "X-User-Email")]
    pub email: Option<String>,
    #[serde(rename = "X-User-Name")]
    pub name: Option<String>,
}
