//! Integration tests for SQLite-backed checks
//!
//! These tests verify that:
//! - Reports produced by a check are durable across store reopen
//! - Duplicate ids overwrite instead of accumulating
//! - Queries through the pipeline see what the store holds

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::tempdir;

use host_monit::{
    Report,
    monitors::ResourceSample,
    storage::{ReportStore, sqlite::SqliteReportStore},
};

use crate::helpers::{create_test_monitor, fixed_sampler, write_config};

#[tokio::test]
async fn test_check_report_survives_restart() {
    let dir = tempdir().unwrap();
    let db_path = dir.path().join("monit.db");
    let config = write_config(dir.path(), json!({ "ports": [], "alert_thresholds": {} }));

    let store: Arc<dyn ReportStore> = Arc::new(SqliteReportStore::new(&db_path).await.unwrap());
    let monitor = create_test_monitor(config, fixed_sampler(33.5, 44.5, 55.5), store.clone());
    let report = monitor.check().await.unwrap();
    store.close().await.unwrap();

    let reopened = SqliteReportStore::new(&db_path).await.unwrap();
    assert_eq!(reopened.find_by_id(&report.id).await.unwrap(), Some(report.clone()));
    assert_eq!(reopened.find_latest().await.unwrap(), Some(report));
}

#[tokio::test]
async fn test_same_second_reports_overwrite() {
    let dir = tempdir().unwrap();
    let store = SqliteReportStore::new(dir.path().join("monit.db")).await.unwrap();
    let instant = NaiveDate::from_ymd_opt(2023, 12, 31)
        .unwrap()
        .and_hms_milli_opt(23, 59, 59, 100)
        .unwrap();

    let sample = |cpu| ResourceSample {
        cpu_percent: cpu,
        ram_percent: 1.0,
        disk_percent: 1.0,
    };
    let first = Report::build_at(sample(10.0), BTreeMap::new(), instant);
    let second = Report::build_at(
        sample(20.0),
        BTreeMap::from([(443, true)]),
        instant + chrono::Duration::milliseconds(800),
    );

    store.insert(&first).await.unwrap();
    store.insert(&second).await.unwrap();

    let all = store.find_all().await.unwrap();
    assert_eq!(all, vec![second]);
}

#[tokio::test]
async fn test_pipeline_queries_read_through_sqlite() {
    let dir = tempdir().unwrap();
    let config = write_config(dir.path(), json!({ "ports": [], "alert_thresholds": {} }));
    let store: Arc<dyn ReportStore> =
        Arc::new(SqliteReportStore::new(dir.path().join("monit.db")).await.unwrap());
    let monitor = create_test_monitor(config, fixed_sampler(8.0, 16.0, 32.0), store);

    let report = monitor.check().await.unwrap();

    assert_eq!(monitor.reports().await.unwrap(), vec![report.clone()]);
    assert_eq!(monitor.last_report().await.unwrap(), report);

    let avg = monitor.average_report(24.0).await.unwrap().unwrap();
    assert_eq!(avg.ram_percent, 16.0);
}
