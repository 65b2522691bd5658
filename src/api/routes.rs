//! HTTP route handlers.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::analyzer::{DisabledAnalyzer, LlmAnalyzer, SemanticAnalyzer};
use crate::catalog::{AgentProfile, Catalog};
use crate::config::Config;
use crate::llm::OpenRouterClient;
use crate::recommend::{RankError, RecommendOutcome, Recommender};

use super::types::*;

/// Shared application state.
pub struct AppState {
    /// Read-only engine over the startup catalog
    pub recommender: Recommender,
}

impl AppState {
    /// Load the catalog and wire up the analyzer described by `config`.
    ///
    /// Fails when the catalog cannot be loaded; the service must not start
    /// without one.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let catalog = Arc::new(Catalog::load(config.catalog_path.as_deref())?);

        let analyzer: Arc<dyn SemanticAnalyzer> = match &config.analyzer.api_key {
            Some(api_key) => {
                let client =
                    OpenRouterClient::with_timeout(api_key.clone(), config.analyzer.timeout)?;
                tracing::info!(
                    "Semantic analysis enabled: model={}, timeout={:?}",
                    config.analyzer.model,
                    config.analyzer.timeout
                );
                Arc::new(LlmAnalyzer::new(
                    Arc::new(client),
                    config.analyzer.model.clone(),
                ))
            }
            None => {
                tracing::info!("Semantic analysis disabled; ranking on heuristics only");
                Arc::new(DisabledAnalyzer)
            }
        };

        let recommender = Recommender::new(catalog, analyzer, config.recommender_settings());
        Ok(Self { recommender })
    }
}

/// Build the router for `state`.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/health", get(health))
        .route("/api/agents", get(list_agents))
        .route("/api/recommend", post(recommend))
        .route("/recommend", post(recommend))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let state = Arc::new(AppState::from_config(&config)?);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "AI Coding Agent Recommendation System".to_string(),
    })
}

/// Health check endpoint.
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        catalog_size: state.recommender.catalog().len(),
        analyzer_enabled: state.recommender.analyzer_enabled(),
    })
}

/// List the catalog in load order.
async fn list_agents(State(state): State<Arc<AppState>>) -> Json<Vec<AgentProfile>> {
    Json(state.recommender.catalog().all().to_vec())
}

/// Rank the catalog for a task.
///
/// If the client disconnects, the handler future is dropped, which also
/// cancels any analyzer call still in flight.
async fn recommend(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RecommendRequest>,
) -> Result<Json<RecommendOutcome>, (StatusCode, String)> {
    tracing::debug!(
        "Recommendation request: language={:?}, complexity={}, top_n={:?}",
        req.task.language(),
        req.task.complexity,
        req.top_n
    );

    match state
        .recommender
        .recommend(&req.task, req.top_n, req.seed)
        .await
    {
        Ok(outcome) => Ok(Json(outcome)),
        Err(e @ RankError::InvalidTopN(_)) => Err((StatusCode::BAD_REQUEST, e.to_string())),
    }
}
