use crate::api::AppState;
use crate::api::auth::CurrentUser;
use axum::{
    extract::{MatchedPath, Request, State},
    http::Method,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

/// GET /metrics
pub async fn get_metrics(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
) -> impl IntoResponse {
    state.prometheus_handle.as_ref().map_or_else(
        || "Metrics not enabled or failed to initialize".to_string(),
        metrics_exporter_prometheus::PrometheusHandle::render,
    )
}

/// Coarse area of the API a request hit. Used as a low-cardinality label so
/// catalog reads, searches and admin writes can be told apart on dashboards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RouteGroup {
    Catalog,
    Search,
    Admin,
    Auth,
    Metrics,
    Other,
}

impl RouteGroup {
    fn classify(method: &Method, path: &str) -> Self {
        let path = path.strip_prefix("/api").unwrap_or(path);
        let mut segments = path.trim_matches('/').split('/');

        match (segments.next(), segments.next()) {
            (Some("movies"), Some("search" | "suggestions")) => Self::Search,
            (Some("movies"), _) if *method == Method::GET => Self::Catalog,
            (Some("movies"), _) => Self::Admin,
            (Some("auth"), _) => Self::Auth,
            (Some("metrics"), None) => Self::Metrics,
            _ => Self::Other,
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Catalog => "catalog",
            Self::Search => "search",
            Self::Admin => "admin",
            Self::Auth => "auth",
            Self::Metrics => "metrics",
            Self::Other => "other",
        }
    }
}

/// Id segment of `/movies/{id}` requests, for the request span.
fn movie_id(path: &str) -> Option<&str> {
    let rest = path
        .strip_prefix("/api")
        .unwrap_or(path)
        .strip_prefix("/movies/")?;
    match rest.trim_end_matches('/') {
        "" | "search" | "suggestions" => None,
        id if !id.contains('/') => Some(id),
        _ => None,
    }
}

const fn outcome(status: u16) -> &'static str {
    match status {
        500.. => "error",
        400.. => "client_error",
        _ => "success",
    }
}

/// Wraps every request in a span and emits one `http_request_finished` event
/// plus the request counter and latency histogram when it completes.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = Uuid::new_v4().to_string();

    let method = req.method().clone();
    let uri = req.uri().path().to_string();
    let matched_path = req
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_string());
    let route_group = RouteGroup::classify(&method, &uri);

    let user_agent = req
        .headers()
        .get("user-agent")
        .and_then(|h| h.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        path = %uri,
        route = matched_path.clone(),
        route_group = route_group.as_str(),
        movie_id = movie_id(&uri),
        user_id = tracing::field::Empty,
    );

    async move {
        let response = next.run(req).await;
        let status = response.status().as_u16();

        // matched route, not the raw path: movie ids would explode label cardinality
        let labels = [
            ("method", method.to_string()),
            ("path", matched_path.as_deref().unwrap_or(&uri).to_string()),
            ("route_group", route_group.as_str().to_string()),
            ("status", status.to_string()),
        ];
        metrics::counter!("http_requests_total", &labels).increment(1);
        metrics::histogram!("http_request_duration_seconds", &labels)
            .record(start.elapsed().as_secs_f64());

        info!(
            event = "http_request_finished",
            duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            status_code = status,
            route_group = route_group.as_str(),
            user_agent = %user_agent,
            outcome = outcome(status),
            "Request finished"
        );

        response
    }
    .instrument(span)
    .await
}
