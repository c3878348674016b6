//! Report persistence
//!
//! This module provides a trait-based abstraction over the durable store that
//! owns every report produced by a check.
//!
//! ## Design
//!
//! - **Trait-based**: `ReportStore` allows swapping implementations
//! - **Async**: All operations are async and shared across request handlers
//! - **Injected**: The store handle is opened once at startup, passed to the
//!   pipeline, and closed at shutdown
//!
//! ## Backends
//!
//! - **SQLite** (default): Embedded database file
//! - **In-Memory**: No persistence, for testing
//!
//! ## Usage
//!
//! ```no_run
//! use host_monit::storage::{ReportStore, sqlite::SqliteReportStore};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let store = SqliteReportStore::new("./monit.db").await?;
//!     let latest = store.find_latest().await?;
//!     store.close().await?;
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod error;
pub mod memory;
#[cfg(feature = "storage-sqlite")]
pub mod sqlite;

pub use backend::{HealthStatus, ReportStore};
pub use error::{StorageError, StorageResult};
pub use memory::MemoryReportStore;
