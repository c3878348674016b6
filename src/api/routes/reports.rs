//! Report query endpoints

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    api::{
        error::{ApiError, ApiResult},
        state::ApiState,
    },
    report::{AverageReport, Report},
};

/// GET /reports
///
/// All stored reports
#[utoipa::path(
    get,
    path = "/reports",
    tag = "reports",
    responses(
        (status = 200, description = "All stored reports, oldest first", body = [Report]),
        (status = 500, description = "Store failure"),
    )
)]
pub async fn list_reports(State(state): State<ApiState>) -> ApiResult<Json<Vec<Report>>> {
    Ok(Json(state.monitor.reports().await?))
}

/// GET /report/last
///
/// The most recent report, 404 if none exist
#[utoipa::path(
    get,
    path = "/report/last",
    tag = "reports",
    responses(
        (status = 200, description = "Most recent report", body = Report),
        (status = 404, description = "No reports available"),
    )
)]
pub async fn get_last_report(State(state): State<ApiState>) -> ApiResult<Json<Report>> {
    Ok(Json(state.monitor.last_report().await?))
}

/// GET /report/:id
#[utoipa::path(
    get,
    path = "/report/{id}",
    tag = "reports",
    params(("id" = String, Path, description = "SHA-256 hex id of the report")),
    responses(
        (status = 200, description = "The report", body = Report),
        (status = 404, description = "Report not found"),
    )
)]
pub async fn get_report(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Report>> {
    Ok(Json(state.monitor.report(&id).await?))
}

/// GET /average_report/:hours
///
/// Averages over the trailing window; `null` when no report falls in it
#[utoipa::path(
    get,
    path = "/average_report/{hours}",
    tag = "reports",
    params(("hours" = f64, Path, description = "Size of the trailing window in hours")),
    responses(
        (status = 200, description = "Averages, or null for an empty window", body = AverageReport),
        (status = 400, description = "Hours is not a non-negative number"),
    )
)]
pub async fn get_average_report(
    State(state): State<ApiState>,
    Path(hours): Path<String>,
) -> ApiResult<Json<Option<AverageReport>>> {
    let hours: f64 = hours
        .parse()
        .map_err(|_| ApiError::InvalidRequest(format!("invalid number of hours: {hours}")))?;

    Ok(Json(state.monitor.average_report(hours).await?))
}
