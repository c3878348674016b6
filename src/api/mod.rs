//! REST API for the check pipeline
//!
//! ## Architecture
//!
//! - **Axum** web framework with Tower middleware
//! - **Monitor** handle in shared state for running checks and queries
//! - **OpenAPI** documentation via utoipa
//!
//! ## Endpoints
//!
//! - `GET /check` - Run one check and return the new report
//! - `GET /reports` - All stored reports
//! - `GET /report/last` - Most recent report
//! - `GET /report/{id}` - One report by id
//! - `GET /average_report/{hours}` - Averages over the last `hours`
//! - `GET /health` - Store health
//! - `GET /docs` - Swagger UI over `/api-docs/openapi.json`

pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::ApiState;

use std::net::SocketAddr;

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::report::{AverageReport, Report};

/// Path of the generated OpenAPI document
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(title = "API_Monit", description = "Host resource checks, reports and averages"),
    paths(
        routes::check::run_check,
        routes::reports::list_reports,
        routes::reports::get_last_report,
        routes::reports::get_report,
        routes::reports::get_average_report,
        routes::health::health_check,
    ),
    components(schemas(Report, AverageReport))
)]
pub struct ApiDoc;

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Bind address (e.g., "127.0.0.1:8000")
    pub bind_addr: SocketAddr,

    /// Enable CORS for browser dashboards
    pub enable_cors: bool,
}

/// Build the router with all routes
pub fn router(config: &ApiConfig, state: ApiState) -> Router {
    let app = Router::new()
        .route("/check", get(routes::check::run_check))
        .route("/reports", get(routes::reports::list_reports))
        .route("/report/last", get(routes::reports::get_last_report))
        .route("/report/:id", get(routes::reports::get_report))
        .route(
            "/average_report/:hours",
            get(routes::reports::get_average_report),
        )
        .route("/health", get(routes::health::health_check))
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url(OPENAPI_PATH, ApiDoc::openapi()));

    if config.enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app.layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(cors))
    } else {
        app.layer(TraceLayer::new_for_http())
    }
}

/// Bind the listener for `config`
pub async fn bind(config: &ApiConfig) -> anyhow::Result<TcpListener> {
    let listener = TcpListener::bind(config.bind_addr).await?;
    info!("API server listening on {}", listener.local_addr()?);
    Ok(listener)
}

/// Spawn the API server
///
/// This starts an Axum HTTP server in a background task.
/// Returns the server's local address.
pub async fn spawn_api_server(config: ApiConfig, state: ApiState) -> anyhow::Result<SocketAddr> {
    let app = router(&config, state);
    let listener = bind(&config).await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!("API server error: {}", e);
        }
    });

    Ok(addr)
}
