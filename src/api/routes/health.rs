//! Health check endpoint

use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::api::{error::ApiResult, state::ApiState};

/// GET /health
///
/// Reports whether the report store answers
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Store health"))
)]
pub async fn health_check(State(state): State<ApiState>) -> ApiResult<Json<Value>> {
    let store = state.monitor.store().health_check().await?;

    Ok(Json(json!({
        "status": if store.healthy { "ok" } else { "degraded" },
        "store": store.message,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    })))
}
