//! HTTP surface: `GET /check?email=…` or `GET /check?domain=…`.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::check::{CheckError, CheckOptions, CheckReport, Target, check_with};
use crate::mx::DnsLookup;
use crate::probe::Probe;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Shared, read-only state of the endpoint. Each request runs its own check;
/// nothing here is mutated after startup.
pub struct AppState<R, P> {
    pub resolver: R,
    pub prober: P,
    pub options: CheckOptions,
}

#[derive(Debug, Default, Deserialize)]
pub struct CheckParams {
    pub email: Option<String>,
    pub domain: Option<String>,
}

#[derive(Debug, Serialize)]
struct CheckResponse {
    success: bool,
    #[serde(flatten)]
    report: CheckReport,
}

pub struct ApiError(CheckError);

impl From<CheckError> for ApiError {
    fn from(err: CheckError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            CheckError::MissingTarget => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = json!({ "success": false, "error": self.0.to_string() });
        (status, Json(body)).into_response()
    }
}

pub fn router<R, P>(state: AppState<R, P>) -> Router
where
    R: DnsLookup + 'static,
    P: Probe + 'static,
{
    Router::new()
        .route("/check", get(check::<R, P>))
        .route("/healthy", get(healthy))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

async fn check<R, P>(
    State(state): State<Arc<AppState<R, P>>>,
    Query(params): Query<CheckParams>,
) -> Result<Response, ApiError>
where
    R: DnsLookup + 'static,
    P: Probe + 'static,
{
    let target = Target::from_params(params.email.as_deref(), params.domain.as_deref())?;
    let report = check_with(&target, &state.options, &state.resolver, &state.prober).await?;
    Ok(Json(CheckResponse {
        success: true,
        report,
    })
    .into_response())
}

async fn healthy() -> &'static str {
    "OK"
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve<R, P>(addr: SocketAddr, state: AppState<R, P>) -> Result<(), ServerError>
where
    R: DnsLookup + 'static,
    P: Probe + 'static,
{
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    info!("SMTP verification service listening on http://{addr}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(ServerError::Serve)
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("received shutdown signal, stopping server");
}
