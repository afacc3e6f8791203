//! # GroupScope HTTP Server
//!
//! Serves the group-scoped taxonomy engine over HTTP, backed by an in-memory
//! directory seeded from a JSON dataset.
//!
//! ## Endpoints
//!
//! - `POST /v1/widget/render` - Render the field widget
//! - `POST /v1/widget/reshape` - Flatten submitted widget values
//! - `POST /v1/autocomplete` - Scoped term suggestions
//! - `POST /v1/facets` - Grouped facet view
//! - `GET /v1/groups/:group_id/taxonomies?user=` - Group taxonomy overview
//! - `GET /health` - Health check
//!
//! ## Configuration
//!
//! - `--config` / `GROUPSCOPE_CONFIG` - TOML configuration file
//! - `RUST_LOG` - Log filter, falls back to `server.log_level`

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    serve, Router,
};
use clap::Parser;
use groupscope_core::{MatchResult, TermId, VocabularyId};
use groupscope_engine::{
    autocomplete::{AutocompleteMatch, AutocompleteQuery},
    overview::OverviewAccess,
    store::InMemoryDirectory,
    widget::{FieldDefinition, FormContext, WidgetRender},
    EngineError, FacetConfig, FacetView, GroupScopeEngine, ParentFacetState, ServerConfig,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, warn, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "groupscope-server", version, about = "Group-scoped taxonomy server")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, env = "GROUPSCOPE_CONFIG", default_value = "config/groupscope.toml")]
    config: PathBuf,
}

/// Shared application state
#[derive(Clone)]
struct AppState {
    engine: Arc<GroupScopeEngine>,
    start_time: std::time::Instant,
}

/// Error response body
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

/// Application error type
#[derive(Debug)]
enum AppError {
    BadRequest(String),
    Forbidden(String),
    Unavailable(String),
    Engine(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg),
            AppError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, "unavailable", msg),
            AppError::Engine(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "engine_error", msg),
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::InvalidInput(msg) => AppError::BadRequest(msg),
            EngineError::Collaborator(inner) if inner.is_infrastructure() => {
                error!(error = %inner, "Collaborator unavailable");
                AppError::Unavailable(inner.to_string())
            }
            other => {
                error!(error = %other, "Engine request failed");
                AppError::Engine(other.to_string())
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct WidgetRenderRequest {
    user: String,
    form: FormContext,
    field: FieldDefinition,
}

#[derive(Debug, Serialize)]
struct WidgetRenderResponse {
    /// False when the form is not scoped to any group
    scoped: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    widget: Option<WidgetRender>,
}

#[derive(Debug, Deserialize)]
struct ReshapeRequest {
    values: IndexMap<VocabularyId, Vec<TermId>>,
}

#[derive(Debug, Serialize)]
struct TargetReference {
    target_id: TermId,
}

#[derive(Debug, Deserialize)]
struct AutocompleteRequest {
    user: String,
    #[serde(flatten)]
    query: AutocompleteQuery,
}

#[derive(Debug, Deserialize)]
struct FacetRequest {
    results: Vec<MatchResult>,
    facet: FacetConfig,
    #[serde(default)]
    parent: Option<ParentFacetState>,
}

#[derive(Debug, Deserialize)]
struct OverviewParams {
    user: String,
}

/// Health check response
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    uptime_seconds: u64,
    version: String,
}

/// POST /v1/widget/render
async fn render_widget(
    State(state): State<AppState>,
    Json(req): Json<WidgetRenderRequest>,
) -> Result<Json<WidgetRenderResponse>, AppError> {
    let widget = state.engine.render_widget(&req.form, &req.field, &req.user).await?;

    Ok(Json(WidgetRenderResponse {
        scoped: widget.is_some(),
        widget,
    }))
}

/// POST /v1/widget/reshape
async fn reshape_widget(
    State(state): State<AppState>,
    Json(req): Json<ReshapeRequest>,
) -> Json<Vec<TargetReference>> {
    let references = state
        .engine
        .reshape(&req.values)
        .into_iter()
        .map(|target_id| TargetReference { target_id })
        .collect();

    Json(references)
}

/// POST /v1/autocomplete
async fn autocomplete(
    State(state): State<AppState>,
    Json(req): Json<AutocompleteRequest>,
) -> Result<Json<Vec<AutocompleteMatch>>, AppError> {
    let matches = state.engine.suggest(&req.query, &req.user).await?;
    Ok(Json(matches))
}

/// POST /v1/facets
async fn facets(
    State(state): State<AppState>,
    Json(req): Json<FacetRequest>,
) -> Result<Json<FacetView>, AppError> {
    let view = state
        .engine
        .build_facet_view(&req.results, &req.facet, req.parent.as_ref())
        .await?;
    Ok(Json(view))
}

/// GET /v1/groups/:group_id/taxonomies
async fn group_overview(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
    Query(params): Query<OverviewParams>,
) -> Result<Response, AppError> {
    match state.engine.group_overview(&params.user, &group_id).await? {
        OverviewAccess::Granted(overview) => Ok(Json(overview).into_response()),
        OverviewAccess::Denied => {
            warn!(user = %params.user, group = %group_id, "Overview access denied");
            Err(AppError::Forbidden(format!(
                "no access to the taxonomy overview of group {}",
                group_id
            )))
        }
    }
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        version: groupscope_engine::VERSION.to_string(),
    })
}

fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace = TraceLayer::new_for_http().on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/v1/widget/render", post(render_widget))
        .route("/v1/widget/reshape", post(reshape_widget))
        .route("/v1/autocomplete", post(autocomplete))
        .route("/v1/facets", post(facets))
        .route("/v1/groups/:group_id/taxonomies", get(group_overview))
        .route("/health", get(health_check))
        .layer(ServiceBuilder::new().layer(trace).layer(cors))
        .with_state(state)
}

/// Graceful shutdown handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C signal"),
        _ = terminate => info!("Received SIGTERM signal"),
    }

    info!("Starting graceful shutdown");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = ServerConfig::load(&cli.config)?;
    config.validate()?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.server.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting GroupScope server v{}", groupscope_engine::VERSION);

    let dataset_path = config.dataset_path(cli.config.parent());
    info!(path = %dataset_path.display(), "Loading dataset");
    let directory = InMemoryDirectory::load(&dataset_path).await.map_err(|e| {
        error!("Failed to load dataset: {}", e);
        e
    })?;

    let engine = GroupScopeEngine::in_memory(config.engine.clone(), Arc::new(directory))?;

    let state = AppState {
        engine: Arc::new(engine),
        start_time: std::time::Instant::now(),
    };

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Starting HTTP server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    serve(listener, create_router(state).into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}
