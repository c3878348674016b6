//! SQLite report store
//!
//! This module provides a SQLite-based implementation of the `ReportStore` trait.
//!
//! ## Features
//!
//! - **Embedded**: No separate database server required
//! - **WAL mode**: Better concurrency for reads during writes
//! - **Connection pooling**: Efficient resource usage
//! - **Migrations**: Automatic schema versioning with sqlx
//!
//! Scalar metrics are stored as columns; `ports_status` is stored as the
//! same JSON object the API returns.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteRow, SqliteSynchronous,
};
use sqlx::{Pool, Row, Sqlite};
use tracing::{debug, info, instrument, warn};

use super::backend::{HealthStatus, ReportStore};
use super::error::{StorageError, StorageResult};
use crate::report::Report;

const SELECT_REPORTS: &str = r#"
    SELECT id, timestamp, cpu_percent, ram_percent, disk_percent, ports_status
    FROM reports
"#;

/// SQLite report store
pub struct SqliteReportStore {
    pool: Pool<Sqlite>,
    db_path: String,
}

impl SqliteReportStore {
    /// Open (or create) the database and run migrations
    ///
    /// ## Example
    ///
    /// ```no_run
    /// # use host_monit::storage::sqlite::SqliteReportStore;
    /// # async fn example() -> anyhow::Result<()> {
    /// let store = SqliteReportStore::new("./monit.db").await?;
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip_all)]
    pub async fn new(db_path: impl AsRef<Path>) -> StorageResult<Self> {
        let db_path_str = db_path.as_ref().to_string_lossy().to_string();

        info!("initializing SQLite report store at: {}", db_path_str);

        if let Some(parent) = db_path.as_ref().parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let options = SqliteConnectOptions::new()
            .filename(&db_path_str)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(std::time::Duration::from_secs(30));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| StorageError::ConnectionFailed(e.to_string()))?;

        debug!("running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("database migrations complete");

        Ok(Self {
            pool,
            db_path: db_path_str,
        })
    }

    fn row_to_report(row: SqliteRow) -> StorageResult<Report> {
        let ports_status: String = row.try_get("ports_status")?;
        Ok(Report {
            id: row.try_get("id")?,
            timestamp: row.try_get("timestamp")?,
            cpu_percent: row.try_get("cpu_percent")?,
            ram_percent: row.try_get("ram_percent")?,
            disk_percent: row.try_get("disk_percent")?,
            ports_status: serde_json::from_str(&ports_status)?,
        })
    }
}

#[async_trait]
impl ReportStore for SqliteReportStore {
    #[instrument(skip(self, report), fields(id = %report.id))]
    async fn insert(&self, report: &Report) -> StorageResult<()> {
        let ports_status = serde_json::to_string(&report.ports_status)?;

        sqlx::query(
            r#"
            INSERT INTO reports (
                id, timestamp, cpu_percent, ram_percent, disk_percent, ports_status
            )
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT (id) DO UPDATE SET
                timestamp = excluded.timestamp,
                cpu_percent = excluded.cpu_percent,
                ram_percent = excluded.ram_percent,
                disk_percent = excluded.disk_percent,
                ports_status = excluded.ports_status
            "#,
        )
        .bind(&report.id)
        .bind(&report.timestamp)
        .bind(report.cpu_percent)
        .bind(report.ram_percent)
        .bind(report.disk_percent)
        .bind(ports_status)
        .execute(&self.pool)
        .await?;

        debug!("stored report {}", report.timestamp);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &str) -> StorageResult<Option<Report>> {
        let row = sqlx::query(&format!("{SELECT_REPORTS} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Self::row_to_report).transpose()
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> StorageResult<Vec<Report>> {
        let rows = sqlx::query(&format!("{SELECT_REPORTS} ORDER BY timestamp ASC"))
            .fetch_all(&self.pool)
            .await?;

        let reports = rows
            .into_iter()
            .map(Self::row_to_report)
            .collect::<StorageResult<Vec<_>>>()?;
        debug!("query returned {} reports", reports.len());
        Ok(reports)
    }

    #[instrument(skip(self))]
    async fn find_latest(&self) -> StorageResult<Option<Report>> {
        let row = sqlx::query(&format!("{SELECT_REPORTS} ORDER BY timestamp DESC LIMIT 1"))
            .fetch_optional(&self.pool)
            .await?;

        row.map(Self::row_to_report).transpose()
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> StorageResult<HealthStatus> {
        match sqlx::query("SELECT 1").fetch_one(&self.pool).await {
            Ok(_) => Ok(HealthStatus {
                healthy: true,
                message: "SQLite backend operational".to_string(),
                metadata: HashMap::from([
                    ("backend".to_string(), "sqlite".to_string()),
                    ("db_path".to_string(), self.db_path.clone()),
                ]),
            }),
            Err(e) => {
                warn!("health check failed: {}", e);
                Ok(HealthStatus {
                    healthy: false,
                    message: format!("health check failed: {}", e),
                    metadata: HashMap::new(),
                })
            }
        }
    }

    async fn close(&self) -> StorageResult<()> {
        info!("closing SQLite backend");
        self.pool.close().await;
        Ok(())
    }
}
