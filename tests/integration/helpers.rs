//! Helper functions for integration tests

use std::path::Path;
use std::sync::Arc;

use host_monit::{
    MonitResult, Monitor,
    alerts::AlertDispatcher,
    config::ConfigProvider,
    monitors::{ResourceSample, ResourceSampler},
    storage::ReportStore,
};

/// Sampler that always reports the same utilization
pub struct FixedSampler(pub ResourceSample);

impl ResourceSampler for FixedSampler {
    fn sample(&self) -> MonitResult<ResourceSample> {
        Ok(self.0)
    }
}

pub fn fixed_sampler(cpu: f64, ram: f64, disk: f64) -> Arc<dyn ResourceSampler> {
    Arc::new(FixedSampler(ResourceSample {
        cpu_percent: cpu,
        ram_percent: ram,
        disk_percent: disk,
    }))
}

pub fn write_config(dir: &Path, config: serde_json::Value) -> ConfigProvider {
    let path = dir.join("monit_config.json");
    std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
    ConfigProvider::new(path)
}

pub fn create_test_monitor(
    config: ConfigProvider,
    sampler: Arc<dyn ResourceSampler>,
    store: Arc<dyn ReportStore>,
) -> Monitor {
    Monitor::new(config, sampler, store, AlertDispatcher::discord().unwrap())
}
