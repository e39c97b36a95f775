//! Common routes: welcome, health (with store check), version.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct WelcomeBody {
    message: String,
}

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
    database: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

async fn root(State(state): State<AppState>) -> Json<WelcomeBody> {
    Json(WelcomeBody {
        message: format!("Welcome to {} API", state.project_name),
    })
}

async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthBody>) {
    match state.classrooms.repository().ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthBody {
                status: "healthy",
                database: "connected",
                error: None,
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthBody {
                    status: "unhealthy",
                    database: "disconnected",
                    error: Some(e.to_string()),
                }),
            )
        }
    }
}

async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// GET /, GET /health, GET /version.
pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/version", get(version))
        .with_state(state)
}
