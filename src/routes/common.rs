//! Common routes: index, health, readiness.

use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
}

#[derive(Serialize)]
struct ReadyBody {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    database: Option<&'static str>,
}

/// Root URL response: service identity and where the resources live.
async fn index() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "Supplier REST API Service",
        "version": env!("CARGO_PKG_VERSION"),
        "paths": "/suppliers"
    }))
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody { status: "OK" })
}

async fn ready(
    State(state): State<AppState>,
) -> Result<Json<ReadyBody>, (axum::http::StatusCode, Json<ReadyBody>)> {
    if sqlx::query("SELECT 1").fetch_optional(&state.pool).await.is_err() {
        return Err((
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadyBody {
                status: "degraded",
                database: Some("unavailable"),
            }),
        ));
    }
    Ok(Json(ReadyBody {
        status: "OK",
        database: Some("ok"),
    }))
}

/// GET /, GET /health, GET /ready (with DB ping).
pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/ready", get(ready))
        .with_state(state)
}
