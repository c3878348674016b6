//! Threshold evaluation of a report against the configured alert limits

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use tracing::{debug, instrument, trace};

use crate::error::{MonitError, MonitResult};
use crate::report::Report;

/// A numeric report field that may carry an alert threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Metric {
    Cpu,
    Ram,
    Disk,
}

impl Metric {
    pub fn as_str(&self) -> &'static str {
        match self {
            Metric::Cpu => "cpu",
            Metric::Ram => "ram",
            Metric::Disk => "disk",
        }
    }

    /// The report field this metric reads from
    pub fn value_of(&self, report: &Report) -> f64 {
        match self {
            Metric::Cpu => report.cpu_percent,
            Metric::Ram => report.ram_percent,
            Metric::Disk => report.disk_percent,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = MonitError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "cpu" => Ok(Metric::Cpu),
            "ram" => Ok(Metric::Ram),
            "disk" => Ok(Metric::Disk),
            _ => Err(MonitError::UnknownMetric(name.to_string())),
        }
    }
}

/// Metrics whose observed value exceeded their threshold, with that value
pub type BreachSet = BTreeMap<Metric, f64>;

/// Compare `report` against `thresholds`.
///
/// Only metrics named in `thresholds` are looked at, and a metric breaches
/// when its value is strictly greater than the threshold. Any name that is
/// not a numeric report field fails the whole evaluation.
#[instrument(skip_all, fields(report = %report.id))]
pub fn evaluate(report: &Report, thresholds: &BTreeMap<String, f64>) -> MonitResult<BreachSet> {
    let limits = thresholds
        .iter()
        .map(|(name, threshold)| Ok((name.parse::<Metric>()?, *threshold)))
        .collect::<MonitResult<Vec<_>>>()?;

    let mut breaches = BreachSet::new();
    for (metric, threshold) in limits {
        let value = metric.value_of(report);
        trace!("{metric}: {value} (max: {threshold})");
        if value > threshold {
            debug!("{metric} exceeds threshold: {value} > {threshold}");
            breaches.insert(metric, value);
        }
    }

    Ok(breaches)
}
