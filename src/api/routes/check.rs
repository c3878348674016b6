//! Check endpoint

use axum::{Json, extract::State};

use crate::{
    api::{error::ApiResult, state::ApiState},
    report::Report,
};

/// GET /check
///
/// Runs one full check: sample, probe, persist, evaluate thresholds and alert
#[utoipa::path(
    get,
    path = "/check",
    tag = "check",
    responses(
        (status = 200, description = "The freshly stored report", body = Report),
        (status = 500, description = "Config, sampling or store failure"),
    )
)]
pub async fn run_check(State(state): State<ApiState>) -> ApiResult<Json<Report>> {
    let report = state.monitor.check().await?;
    Ok(Json(report))
}
