//! Report store trait definition
//!
//! This module defines the `ReportStore` trait that every persistence
//! backend implements.

use std::collections::HashMap;

use async_trait::async_trait;

use super::error::StorageResult;
use crate::report::Report;

/// Health status of the report store
#[derive(Debug, Clone)]
pub struct HealthStatus {
    /// Is the backend operational?
    pub healthy: bool,

    /// Human-readable status message
    pub message: String,

    /// Additional backend-specific metadata
    pub metadata: HashMap<String, String>,
}

/// Persistence for reports, keyed by report id
///
/// ## Duplicate ids
///
/// Report ids are derived from second-granularity timestamps, so two checks
/// within the same second produce the same id. Every backend **overwrites**
/// the stored report in that case: the later insert wins and the store never
/// holds two reports with one id.
///
/// ## Thread Safety
///
/// Implementations must be `Send + Sync`; a single handle is shared by all
/// request handlers.
#[async_trait]
pub trait ReportStore: Send + Sync {
    /// Persist a report, replacing any report with the same id
    async fn insert(&self, report: &Report) -> StorageResult<()>;

    /// Look up one report by id
    async fn find_by_id(&self, id: &str) -> StorageResult<Option<Report>>;

    /// All stored reports
    ///
    /// Backends return them oldest first, but callers that display reports
    /// should not rely on any ordering.
    async fn find_all(&self) -> StorageResult<Vec<Report>>;

    /// The report with the greatest timestamp
    async fn find_latest(&self) -> StorageResult<Option<Report>>;

    /// Check backend health
    ///
    /// Performs a lightweight operation to verify the backend is operational.
    async fn health_check(&self) -> StorageResult<HealthStatus>;

    /// Close the backend and release resources
    async fn close(&self) -> StorageResult<()>;
}
