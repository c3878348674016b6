//! The check pipeline and the report queries built on top of it
//!
//! One [`Monitor::check`] call runs every step in order:
//!
//! ```text
//! load config → sample → probe ports → build report → persist → evaluate → dispatch
//! ```
//!
//! Failures in any step up to evaluation abort the check. Alert delivery is
//! best-effort and only logged.

use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use tracing::{debug, info, instrument, warn};

use crate::aggregation;
use crate::alerts::{AlertDispatcher, DispatchOutcome};
use crate::config::ConfigProvider;
use crate::error::{MonitError, MonitResult};
use crate::monitors::{DEFAULT_PROBE_HOST, DEFAULT_PROBE_TIMEOUT, ResourceSampler, probe_ports};
use crate::report::{AverageReport, Report};
use crate::storage::ReportStore;
use crate::thresholds;

/// Where and how long to probe configured ports
#[derive(Debug, Clone)]
pub struct ProbeSettings {
    pub host: String,
    pub timeout: Duration,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            host: DEFAULT_PROBE_HOST.to_string(),
            timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }
}

/// Owns handles to every pipeline collaborator.
///
/// Cheap to clone; clones share the same store, sampler and transport.
#[derive(Clone)]
pub struct Monitor {
    config: ConfigProvider,
    sampler: Arc<dyn ResourceSampler>,
    store: Arc<dyn ReportStore>,
    dispatcher: AlertDispatcher,
    probe: ProbeSettings,
}

impl Monitor {
    pub fn new(
        config: ConfigProvider,
        sampler: Arc<dyn ResourceSampler>,
        store: Arc<dyn ReportStore>,
        dispatcher: AlertDispatcher,
    ) -> Self {
        Self {
            config,
            sampler,
            store,
            dispatcher,
            probe: ProbeSettings::default(),
        }
    }

    pub fn with_probe_settings(mut self, probe: ProbeSettings) -> Self {
        self.probe = probe;
        self
    }

    pub fn store(&self) -> &Arc<dyn ReportStore> {
        &self.store
    }

    /// Run one full check and return the stored report.
    #[instrument(skip(self))]
    pub async fn check(&self) -> MonitResult<Report> {
        let config = self.config.load()?;

        let sampler = self.sampler.clone();
        let sample = tokio::task::spawn_blocking(move || sampler.sample())
            .await
            .map_err(|e| MonitError::MetricsUnavailable(e.to_string()))??;

        let ports_status = probe_ports(&self.probe.host, &config.ports, self.probe.timeout).await;

        let report = Report::build(sample, ports_status);
        debug!("built report {} ({})", report.id, report.timestamp);

        self.store.insert(&report).await?;

        let breaches = thresholds::evaluate(&report, &config.alert_thresholds)?;
        match self.dispatcher.dispatch(&breaches, config.webhook_url()).await {
            DispatchOutcome::Delivered => {}
            DispatchOutcome::NoBreaches => debug!("no thresholds exceeded"),
            DispatchOutcome::NotConfigured => {
                warn!("{} thresholds exceeded but no webhook is configured", breaches.len())
            }
            DispatchOutcome::Failed(reason) => {
                warn!("report {} stored, alert not delivered: {reason}", report.id)
            }
        }

        info!("Check completed and report generated.");
        Ok(report)
    }

    /// Every stored report, oldest first.
    pub async fn reports(&self) -> MonitResult<Vec<Report>> {
        let mut reports = self.store.find_all().await?;
        reports.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        Ok(reports)
    }

    pub async fn last_report(&self) -> MonitResult<Report> {
        self.store
            .find_latest()
            .await?
            .ok_or_else(|| MonitError::NotFound("No reports available".to_string()))
    }

    pub async fn report(&self, id: &str) -> MonitResult<Report> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| MonitError::NotFound("Report not found".to_string()))
    }

    /// Averages over the last `last_x_hours`, `None` when nothing was stored
    /// in that window.
    #[instrument(skip(self))]
    pub async fn average_report(&self, last_x_hours: f64) -> MonitResult<Option<AverageReport>> {
        let reports = self.store.find_all().await?;
        aggregation::average(&reports, last_x_hours, Local::now().naive_local())
    }
}
