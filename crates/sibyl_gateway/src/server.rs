use crate::memory::RecentQueries;
use crate::types::{AskRequest, AskResponse, MemoryResponse};
use anyhow::{Context, Result};
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use sibyl_reasoning::Orchestrator;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

/// Shared state for the HTTP handlers.
#[derive(Clone)]
struct AppState {
    orchestrator: Arc<Orchestrator>,
    memory: Arc<RwLock<RecentQueries>>,
    /// Model name reported by /health.
    model: String,
}

/// The HTTP surface:
/// - `POST /ask` — run one query through the orchestrator
/// - `GET /memory` — recent queries, oldest first
/// - `GET /health` — liveness
/// - `GET /` — greeting
pub struct GatewayServer {
    orchestrator: Arc<Orchestrator>,
    memory: Arc<RwLock<RecentQueries>>,
    model: String,
    host: String,
    port: u16,
}

impl GatewayServer {
    pub fn new(
        orchestrator: Arc<Orchestrator>,
        memory_size: usize,
        model: &str,
        host: &str,
        port: u16,
    ) -> Self {
        Self {
            orchestrator,
            memory: Arc::new(RwLock::new(RecentQueries::new(memory_size))),
            model: model.to_string(),
            host: host.to_string(),
            port,
        }
    }

    /// Build the router. Separate from `run` so tests can drive the
    /// handlers without binding a socket.
    pub fn router(&self) -> Router {
        let state = AppState {
            orchestrator: self.orchestrator.clone(),
            memory: self.memory.clone(),
            model: self.model.clone(),
        };

        Router::new()
            .route("/", get(root))
            .route("/ask", post(handle_ask))
            .route("/memory", get(get_memory))
            .route("/health", get(health))
            .layer(CorsLayer::permissive())
            .with_state(state)
    }

    /// Bind and serve until the process is stopped.
    pub async fn run(self) -> Result<()> {
        let addr = format!("{}:{}", self.host, self.port);
        let app = self.router();

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        tracing::info!("Gateway listening on {}", addr);
        axum::serve(listener, app)
            .await
            .context("Gateway server error")?;
        Ok(())
    }
}

// ============================================================================
// Route handlers
// ============================================================================

async fn handle_ask(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Result<Json<AskResponse>, (StatusCode, String)> {
    let request_id = Uuid::new_v4();
    tracing::info!(%request_id, "Handling /ask");

    state.memory.write().await.add(&request.query);

    // The orchestrator itself never fails; only a task fault (the truly
    // unexpected case) surfaces as a server error.
    let orchestrator = state.orchestrator.clone();
    let query = request.query;
    let result = tokio::spawn(async move { orchestrator.process(&query).await })
        .await
        .map_err(|e| {
            tracing::error!(%request_id, "Query task failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Error processing query: {}", e),
            )
        })?;

    Ok(Json(AskResponse {
        reasoning: result.reasoning,
        answer: result.answer,
    }))
}

async fn get_memory(State(state): State<AppState>) -> Json<MemoryResponse> {
    let recent_queries = state.memory.read().await.recent();
    Json(MemoryResponse { recent_queries })
}

async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "healthy", "llm": state.model }))
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "sibyl query service is running" }))
}
