//! Integration tests for API endpoints
//!
//! These tests verify that:
//! - Every route returns the documented status and body shape
//! - Missing reports map to 404 and bad windows to 400
//! - An empty averaging window is `null`, never zeros

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::Arc;

use chrono::{Duration, Local, NaiveDate};
use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use serde_json::{Value, json};
use tempfile::tempdir;

use host_monit::{
    Monitor, Report,
    api::{ApiConfig, ApiState, spawn_api_server},
    config::ConfigProvider,
    monitors::ResourceSample,
    storage::{MemoryReportStore, ReportStore},
};

use crate::helpers::{create_test_monitor, fixed_sampler, write_config};

async fn spawn_test_api(monitor: Monitor) -> SocketAddr {
    let config = ApiConfig {
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        enable_cors: true,
    };

    spawn_api_server(config, ApiState::new(monitor)).await.unwrap()
}

fn stored_report(instant: chrono::NaiveDateTime, cpu: f64) -> Report {
    Report::build_at(
        ResourceSample {
            cpu_percent: cpu,
            ram_percent: 25.0,
            disk_percent: 55.0,
        },
        BTreeMap::from([(22, true), (3306, false)]),
        instant,
    )
}

async fn get(addr: SocketAddr, path: &str) -> (StatusCode, Value) {
    let response = reqwest::get(format!("http://{addr}{path}")).await.unwrap();
    let status = response.status();
    let body = response.json::<Value>().await.unwrap();
    (status, body)
}

#[tokio::test]
async fn test_check_returns_report() {
    let dir = tempdir().unwrap();
    let config = ConfigProvider::new(dir.path().join("monit_config.json"));
    let store: Arc<dyn ReportStore> = Arc::new(MemoryReportStore::new());
    let monitor = create_test_monitor(config, fixed_sampler(12.0, 15.0, 40.0), store.clone());
    let addr = spawn_test_api(monitor).await;

    let (status, body) = get(addr, "/check").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cpu_percent"], 12.0);
    assert_eq!(body["ram_percent"], 15.0);
    assert_eq!(body["disk_percent"], 40.0);
    assert_eq!(body["ports_status"], json!({}));
    assert_eq!(body["id"].as_str().unwrap().len(), 64);

    // default config was created on first access
    assert!(dir.path().join("monit_config.json").exists());
    assert_eq!(store.find_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_check_with_unknown_metric_is_500() {
    let dir = tempdir().unwrap();
    let config = write_config(
        dir.path(),
        json!({ "ports": [], "alert_thresholds": { "bogus": 10 } }),
    );
    let monitor = create_test_monitor(
        config,
        fixed_sampler(1.0, 1.0, 1.0),
        Arc::new(MemoryReportStore::new()),
    );
    let addr = spawn_test_api(monitor).await;

    let (status, body) = get(addr, "/check").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("bogus"));
}

#[tokio::test]
async fn test_reports_and_lookup() {
    let dir = tempdir().unwrap();
    let store = Arc::new(MemoryReportStore::new());
    let base = NaiveDate::from_ymd_opt(2024, 2, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();
    let older = stored_report(base, 10.0);
    let newer = stored_report(base + Duration::minutes(5), 20.0);
    store.insert(&newer).await.unwrap();
    store.insert(&older).await.unwrap();

    let monitor = create_test_monitor(
        ConfigProvider::new(dir.path().join("monit_config.json")),
        fixed_sampler(1.0, 1.0, 1.0),
        store,
    );
    let addr = spawn_test_api(monitor).await;

    let (status, body) = get(addr, "/reports").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (status, body) = get(addr, "/report/last").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timestamp"], "2024-02-01_09-05-00");

    let (status, body) = get(addr, &format!("/report/{}", older.id)).await;
    assert_eq!(status, StatusCode::OK);
    let found: Report = serde_json::from_value(body).unwrap();
    assert_eq!(found, older);
    assert_eq!(found.ports_status.get(&22), Some(&true));
}

#[tokio::test]
async fn test_missing_reports_are_404() {
    let dir = tempdir().unwrap();
    let monitor = create_test_monitor(
        ConfigProvider::new(dir.path().join("monit_config.json")),
        fixed_sampler(1.0, 1.0, 1.0),
        Arc::new(MemoryReportStore::new()),
    );
    let addr = spawn_test_api(monitor).await;

    let (status, body) = get(addr, "/report/last").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "No reports available");

    let (status, body) = get(addr, "/report/deadbeef").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Report not found");

    let (status, body) = get(addr, "/reports").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_average_report() {
    let dir = tempdir().unwrap();
    let store = Arc::new(MemoryReportStore::new());
    let now = Local::now().naive_local();
    for (age, cpu) in [(10, 10.0), (20, 20.0), (30, 30.0)] {
        store
            .insert(&stored_report(now - Duration::minutes(age), cpu))
            .await
            .unwrap();
    }
    // outside a one hour window
    store
        .insert(&stored_report(now - Duration::hours(5), 90.0))
        .await
        .unwrap();

    let monitor = create_test_monitor(
        ConfigProvider::new(dir.path().join("monit_config.json")),
        fixed_sampler(1.0, 1.0, 1.0),
        store,
    );
    let addr = spawn_test_api(monitor).await;

    let (status, body) = get(addr, "/average_report/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "cpu_percent": 20.0, "ram_percent": 25.0, "disk_percent": 55.0 })
    );
}

#[tokio::test]
async fn test_average_report_empty_is_null() {
    let dir = tempdir().unwrap();
    let monitor = create_test_monitor(
        ConfigProvider::new(dir.path().join("monit_config.json")),
        fixed_sampler(1.0, 1.0, 1.0),
        Arc::new(MemoryReportStore::new()),
    );
    let addr = spawn_test_api(monitor).await;

    let (status, body) = get(addr, "/average_report/24").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn test_average_report_rejects_bad_hours() {
    let dir = tempdir().unwrap();
    let monitor = create_test_monitor(
        ConfigProvider::new(dir.path().join("monit_config.json")),
        fixed_sampler(1.0, 1.0, 1.0),
        Arc::new(MemoryReportStore::new()),
    );
    let addr = spawn_test_api(monitor).await;

    let (status, body) = get(addr, "/average_report/-3").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) = get(addr, "/average_report/soon").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health_endpoint() {
    let dir = tempdir().unwrap();
    let monitor = create_test_monitor(
        ConfigProvider::new(dir.path().join("monit_config.json")),
        fixed_sampler(1.0, 1.0, 1.0),
        Arc::new(MemoryReportStore::new()),
    );
    let addr = spawn_test_api(monitor).await;

    let (status, body) = get(addr, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_openapi_document_lists_report_routes() {
    let dir = tempdir().unwrap();
    let monitor = create_test_monitor(
        ConfigProvider::new(dir.path().join("monit_config.json")),
        fixed_sampler(1.0, 1.0, 1.0),
        Arc::new(MemoryReportStore::new()),
    );
    let addr = spawn_test_api(monitor).await;

    let (status, body) = get(addr, "/api-docs/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"]["title"], "API_Monit");

    let paths = body["paths"].as_object().unwrap();
    for route in [
        "/check",
        "/reports",
        "/report/last",
        "/report/{id}",
        "/average_report/{hours}",
    ] {
        assert!(paths.contains_key(route), "{route} missing from the document");
    }
    assert!(body["components"]["schemas"]["Report"].is_object());
}
