//! Averaging of stored reports over a trailing window

use chrono::NaiveDateTime;
use tracing::{info, instrument, warn};

use crate::error::{MonitError, MonitResult};
use crate::report::{AverageReport, Report};

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Mean CPU, RAM and disk usage of the reports taken within `last_x_hours`
/// of `now`.
///
/// A report exactly `last_x_hours` old is still inside the window. Returns
/// `Ok(None)` when no report falls inside it, so "no data" never looks like
/// an all-zero average.
#[instrument(skip(reports), fields(reports = reports.len()))]
pub fn average(
    reports: &[Report],
    last_x_hours: f64,
    now: NaiveDateTime,
) -> MonitResult<Option<AverageReport>> {
    if last_x_hours.is_nan() || last_x_hours < 0.0 {
        return Err(MonitError::InvalidArgument(format!(
            "hours must be a non-negative number, got {last_x_hours}"
        )));
    }

    let recent: Vec<&Report> = reports
        .iter()
        .filter(|report| match report.parsed_timestamp() {
            Some(taken_at) => {
                let age = (now - taken_at).as_seconds_f64() / SECONDS_PER_HOUR;
                age <= last_x_hours
            }
            None => {
                warn!("skipping report {} with unreadable timestamp", report.id);
                false
            }
        })
        .collect();

    if recent.is_empty() {
        warn!("No reports available in the specified time range.");
        return Ok(None);
    }

    let count = recent.len() as f64;
    let (cpu, ram, disk) = recent.iter().fold((0.0, 0.0, 0.0), |(cpu, ram, disk), report| {
        (
            cpu + report.cpu_percent,
            ram + report.ram_percent,
            disk + report.disk_percent,
        )
    });

    info!(
        "Calculated the average report for the last {} hours over {} reports.",
        last_x_hours, count
    );

    Ok(Some(AverageReport {
        cpu_percent: cpu / count,
        ram_percent: ram / count,
        disk_percent: disk / count,
    }))
}
