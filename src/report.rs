//! Report values produced by a check and their identity

use std::collections::BTreeMap;

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::monitors::ResourceSample;

/// Timestamp format of a report, second granularity
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// One immutable snapshot of host utilization and port reachability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "api", derive(utoipa::ToSchema))]
pub struct Report {
    /// Local time of the check, formatted with [`TIMESTAMP_FORMAT`]
    pub timestamp: String,

    /// SHA-256 hex digest of `timestamp`
    pub id: String,

    pub cpu_percent: f64,
    pub ram_percent: f64,
    pub disk_percent: f64,

    /// Port to reachability; JSON keys are the port numbers as strings
    pub ports_status: BTreeMap<u16, bool>,
}

/// Mean utilization over a window of reports
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "api", derive(utoipa::ToSchema))]
pub struct AverageReport {
    pub cpu_percent: f64,
    pub ram_percent: f64,
    pub disk_percent: f64,
}

/// Identity of a report, derived only from its timestamp.
///
/// Two reports built within the same second share an id.
pub fn report_id(timestamp: &str) -> String {
    let hash = Sha256::digest(timestamp.as_bytes());
    format!("{hash:x}")
}

pub fn format_timestamp(instant: NaiveDateTime) -> String {
    instant.format(TIMESTAMP_FORMAT).to_string()
}

pub fn parse_timestamp(timestamp: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT).ok()
}

impl Report {
    /// Build a report stamped with the current local time.
    pub fn build(sample: ResourceSample, ports_status: BTreeMap<u16, bool>) -> Self {
        Self::build_at(sample, ports_status, Local::now().naive_local())
    }

    pub fn build_at(
        sample: ResourceSample,
        ports_status: BTreeMap<u16, bool>,
        instant: NaiveDateTime,
    ) -> Self {
        let timestamp = format_timestamp(instant);
        Self {
            id: report_id(&timestamp),
            timestamp,
            cpu_percent: sample.cpu_percent,
            ram_percent: sample.ram_percent,
            disk_percent: sample.disk_percent,
            ports_status,
        }
    }

    pub fn parsed_timestamp(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.timestamp)
    }
}
