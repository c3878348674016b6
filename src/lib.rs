//! Host resource monitoring: periodic checks of CPU, RAM, disk and local
//! TCP ports, stored as immutable reports with threshold alerts and
//! windowed averages.

pub mod aggregation;
pub mod alerts;
#[cfg(feature = "api")]
pub mod api;
pub mod config;
pub mod discord;
pub mod error;
pub mod logging;
pub mod monitors;
pub mod pipeline;
pub mod report;
pub mod storage;
pub mod thresholds;
pub mod util;

pub use error::{MonitError, MonitResult};
pub use pipeline::Monitor;
pub use report::{AverageReport, Report};
