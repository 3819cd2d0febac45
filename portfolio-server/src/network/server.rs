//! HTTP API Server
//!
//! Axum router for the contact form, the GitHub activity feed, the
//! project catalog and the terminal. Handlers stay thin; the work lives
//! in the domain modules.

use std::sync::Arc;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn, error, instrument};

use crate::config::{ConfigError, ServerConfig};
use crate::contact::{ContactError, ContactRequest, ContactService};
use crate::github::{ActivityCache, ActivityFeed};
use crate::network::protocol::{
    ErrorBody, HealthResponse, ProjectList, SendEmailResponse, TerminalRequest,
};
use crate::projects::{filter_projects, ProjectQuery, PROJECTS};
use crate::terminal::{respond, TerminalReply};

/// Server errors.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Failed to bind to address.
    #[error("Failed to bind: {0}")]
    Bind(#[source] std::io::Error),

    /// Server stopped with an I/O error.
    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),

    /// Bad configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Request-level failures, rendered as `{ "error": ... }`.
#[derive(Debug)]
pub enum ApiError {
    /// Contact submission failed.
    Contact(ContactError),
    /// Body or query could not be parsed.
    BadRequest(String),
}

impl From<ContactError> for ApiError {
    fn from(e: ContactError) -> Self {
        ApiError::Contact(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::Contact(e @ (ContactError::MissingFields | ContactError::InvalidEmail)) => {
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            ApiError::Contact(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            ApiError::BadRequest(detail) => {
                warn!(%detail, "Rejected malformed request");
                (StatusCode::BAD_REQUEST, "Invalid request body".to_string())
            }
        };
        (status, Json(ErrorBody { error })).into_response()
    }
}

/// Shared handler state.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Contact relay chain
    pub contact: Arc<ContactService>,
    /// GitHub activity cache
    pub activity: ActivityCache,
}

impl AppState {
    /// Bundle the services.
    pub fn new(contact: ContactService, activity: ActivityCache) -> Self {
        Self { contact: Arc::new(contact), activity }
    }
}

/// Build the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/send-email", post(send_email))
        .route("/api/github/activity", get(github_activity))
        .route("/api/projects", get(projects))
        .route("/api/terminal", post(terminal))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until Ctrl-C.
#[instrument(skip_all, fields(addr = %config.bind_addr))]
pub async fn serve(config: &ServerConfig, state: AppState) -> Result<(), ServerError> {
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .map_err(ServerError::Bind)?;
    info!("Portfolio server listening on {}", config.bind_addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Failed to listen for shutdown signal: {}", e),
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok", version: crate::VERSION })
}

async fn send_email(
    State(state): State<AppState>,
    body: Result<Json<ContactRequest>, JsonRejection>,
) -> Result<Json<SendEmailResponse>, ApiError> {
    // An unreadable form body is a server-side failure, not a validation one
    let Json(request) = body.map_err(|rejection| {
        let detail = rejection.body_text();
        warn!(%detail, "Unreadable contact submission");
        ContactError::Internal(detail)
    })?;
    let delivery = state.contact.submit(request).await.map_err(|e| {
        match &e {
            ContactError::MissingFields | ContactError::InvalidEmail => {
                info!(reason = %e, "Contact submission rejected");
            }
            ContactError::DeliveryFailed => warn!("Contact submission could not be delivered"),
            ContactError::Internal(detail) => error!(%detail, "Contact delivery task failed"),
        }
        e
    })?;
    Ok(Json(delivery.into()))
}

async fn github_activity(State(state): State<AppState>) -> Json<ActivityFeed> {
    Json(state.activity.snapshot().await)
}

async fn projects(
    query: Result<Query<ProjectQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query?;
    let matches = filter_projects(&PROJECTS, &query);
    Ok(Json(ProjectList::new(matches)).into_response())
}

async fn terminal(
    State(state): State<AppState>,
    body: Result<Json<TerminalRequest>, JsonRejection>,
) -> Result<Json<TerminalReply>, ApiError> {
    let Json(request) = body?;
    let repositories = state.activity.repositories().await;
    Ok(Json(respond(&request.command, repositories)))
}

// =============================================================================
// TESTS
// =============================================================================
