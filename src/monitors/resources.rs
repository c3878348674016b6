use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use sysinfo::{Disks, System};
use tracing::{instrument, trace};

use crate::error::{MonitError, MonitResult};

/// Instantaneous host utilization, each value a percentage in [0, 100]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResourceSample {
    pub cpu_percent: f64,
    pub ram_percent: f64,
    pub disk_percent: f64,
}

/// Source of host utilization samples.
///
/// Sampling may block (CPU usage needs two readings some time apart), so the
/// pipeline calls it from tokio's blocking pool.
pub trait ResourceSampler: Send + Sync {
    fn sample(&self) -> MonitResult<ResourceSample>;
}

/// Samples the local host through `sysinfo`.
#[derive(Debug, Clone)]
pub struct SysinfoSampler {
    /// Disk usage is reported for the filesystem containing this path
    disk_path: PathBuf,
}

impl Default for SysinfoSampler {
    fn default() -> Self {
        Self::new("/")
    }
}

impl SysinfoSampler {
    pub fn new(disk_path: impl Into<PathBuf>) -> Self {
        Self {
            disk_path: disk_path.into(),
        }
    }

    fn cpu_percent(sys: &mut System) -> f64 {
        sys.refresh_cpu_usage();
        std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
        sys.refresh_cpu_usage();
        sys.global_cpu_usage() as f64
    }

    fn ram_percent(sys: &mut System) -> MonitResult<f64> {
        sys.refresh_memory();
        let total = sys.total_memory();
        if total == 0 {
            return Err(MonitError::MetricsUnavailable(
                "total memory reported as zero".to_string(),
            ));
        }
        Ok(sys.used_memory() as f64 / total as f64 * 100.0)
    }

    fn disk_percent(&self) -> MonitResult<f64> {
        let disks = Disks::new_with_refreshed_list();

        // the mount point that is the longest prefix of the path owns it
        let disk = disks
            .list()
            .iter()
            .filter(|disk| self.disk_path.starts_with(disk.mount_point()))
            .max_by_key(|disk| disk.mount_point().as_os_str().len())
            .ok_or_else(|| {
                MonitError::MetricsUnavailable(format!(
                    "no disk mounted for {}",
                    self.disk_path.display()
                ))
            })?;

        let total = disk.total_space();
        if total == 0 {
            return Err(MonitError::MetricsUnavailable(format!(
                "disk at {} reports zero capacity",
                disk.mount_point().display()
            )));
        }
        let used = total.saturating_sub(disk.available_space());
        Ok(used as f64 / total as f64 * 100.0)
    }

}

impl ResourceSampler for SysinfoSampler {
    #[instrument(skip(self))]
    fn sample(&self) -> MonitResult<ResourceSample> {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return Err(MonitError::MetricsUnavailable(
                "platform not supported by sysinfo".to_string(),
            ));
        }

        let mut sys = System::new();
        let sample = ResourceSample {
            cpu_percent: clamp_percent(Self::cpu_percent(&mut sys)),
            ram_percent: clamp_percent(Self::ram_percent(&mut sys)?),
            disk_percent: clamp_percent(self.disk_percent()?),
        };

        trace!("sampled resources: {sample:?}");
        Ok(sample)
    }
}

/// Clamp to [0, 100] with one decimal place
fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        (value.clamp(0.0, 100.0) * 10.0).round() / 10.0
    }
}
