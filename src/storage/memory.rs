//! In-memory report store (no persistence)
//!
//! This backend keeps reports in a map behind a lock.
//! It's useful for:
//! - Testing without database dependencies
//! - Throwaway runs started with `--in-memory`
//!
//! All data is lost on restart.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::backend::{HealthStatus, ReportStore};
use super::error::StorageResult;
use crate::report::Report;

/// In-memory report store, keyed by report id
#[derive(Debug, Default)]
pub struct MemoryReportStore {
    reports: RwLock<HashMap<String, Report>>,
}

impl MemoryReportStore {
    /// Create a new, empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReportStore for MemoryReportStore {
    async fn insert(&self, report: &Report) -> StorageResult<()> {
        let previous = self
            .reports
            .write()
            .await
            .insert(report.id.clone(), report.clone());

        if previous.is_some() {
            debug!("overwrote report {} ({})", report.id, report.timestamp);
        }
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> StorageResult<Option<Report>> {
        Ok(self.reports.read().await.get(id).cloned())
    }

    async fn find_all(&self) -> StorageResult<Vec<Report>> {
        let mut reports: Vec<Report> = self.reports.read().await.values().cloned().collect();
        reports.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        Ok(reports)
    }

    async fn find_latest(&self) -> StorageResult<Option<Report>> {
        Ok(self
            .reports
            .read()
            .await
            .values()
            .max_by(|a, b| a.timestamp.cmp(&b.timestamp))
            .cloned())
    }

    async fn health_check(&self) -> StorageResult<HealthStatus> {
        Ok(HealthStatus {
            healthy: true,
            message: "In-memory storage operational".to_string(),
            metadata: HashMap::from([
                ("backend".to_string(), "memory".to_string()),
                (
                    "total_reports".to_string(),
                    self.reports.read().await.len().to_string(),
                ),
            ]),
        })
    }

    async fn close(&self) -> StorageResult<()> {
        debug!("closing in-memory backend (no-op)");
        Ok(())
    }
}
