use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, trace};

use crate::error::{MonitError, MonitResult};

/// Value written to a fresh config file in place of a real webhook URL
pub const WEBHOOK_PLACEHOLDER: &str = "YOUR_DISCORD_WEBHOOK_URL";

pub const DEFAULT_CONFIG_PATH: &str = "/etc/monit/monit_config.json";

/// Monitoring configuration as stored on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Local TCP ports to probe on every check
    #[serde(default)]
    pub ports: Vec<u16>,

    /// Metric name (`cpu`, `ram`, `disk`) to percentage threshold
    #[serde(default)]
    pub alert_thresholds: BTreeMap<String, f64>,

    #[serde(default)]
    pub discord_webhook_url: Option<String>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            ports: vec![],
            alert_thresholds: BTreeMap::from([
                ("cpu".to_string(), 90.0),
                ("ram".to_string(), 20.0),
                ("disk".to_string(), 95.0),
            ]),
            discord_webhook_url: Some(WEBHOOK_PLACEHOLDER.to_string()),
        }
    }
}

impl MonitorConfig {
    /// The webhook target, unless it is missing, blank or still the placeholder.
    pub fn webhook_url(&self) -> Option<&str> {
        self.discord_webhook_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty() && *url != WEBHOOK_PLACEHOLDER)
    }
}

/// Loads the monitoring configuration from a fixed location.
///
/// There is no caching: every `load` reads the file again, so edits on disk
/// apply to the next check without a restart.
#[derive(Debug, Clone)]
pub struct ConfigProvider {
    path: PathBuf,
}

impl ConfigProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the config, creating it with defaults first if it does not exist.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub fn load(&self) -> MonitResult<MonitorConfig> {
        if !self.path.exists() {
            self.write_defaults()?;
        }

        let file_content = std::fs::read_to_string(&self.path).map_err(MonitError::ConfigIo)?;
        serde_json::from_str(&file_content)
            .map_err(|e| MonitError::ConfigParse(e.to_string()))
            .inspect(|config| trace!("loaded config: {config:?}"))
    }

    fn write_defaults(&self) -> MonitResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(MonitError::ConfigIo)?;
        }

        let defaults = serde_json::to_string_pretty(&MonitorConfig::default())
            .map_err(|e| MonitError::ConfigParse(e.to_string()))?;
        std::fs::write(&self.path, defaults).map_err(MonitError::ConfigIo)?;

        info!("created default configuration at {}", self.path.display());
        Ok(())
    }
}
