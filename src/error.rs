//! Error types for the monitoring pipeline

use std::fmt;

use crate::storage::StorageError;

/// Result type alias for pipeline operations
pub type MonitResult<T> = Result<T, MonitError>;

/// Errors that can occur while producing or querying reports
#[derive(Debug)]
pub enum MonitError {
    /// The configuration file could not be created, written or read
    ConfigIo(std::io::Error),

    /// The configuration file exists but is not valid JSON for `MonitorConfig`
    ConfigParse(String),

    /// The host metrics provider could not deliver a sample
    MetricsUnavailable(String),

    /// A threshold names a metric that has no numeric report field
    UnknownMetric(String),

    /// The requested report does not exist
    NotFound(String),

    /// A caller-supplied argument is out of range
    InvalidArgument(String),

    /// The alert could not be delivered (never fatal for a pipeline run)
    NotificationFailure(String),

    /// The report store failed
    Storage(StorageError),
}

impl fmt::Display for MonitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonitError::ConfigIo(err) => write!(f, "configuration I/O failure: {}", err),
            MonitError::ConfigParse(msg) => write!(f, "invalid configuration file: {}", msg),
            MonitError::MetricsUnavailable(msg) => {
                write!(f, "host metrics unavailable: {}", msg)
            }
            MonitError::UnknownMetric(name) => {
                write!(f, "unknown metric in alert thresholds: {}", name)
            }
            MonitError::NotFound(msg) => write!(f, "{}", msg),
            MonitError::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            MonitError::NotificationFailure(msg) => {
                write!(f, "failed to deliver notification: {}", msg)
            }
            MonitError::Storage(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for MonitError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MonitError::ConfigIo(err) => Some(err),
            MonitError::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StorageError> for MonitError {
    fn from(err: StorageError) -> Self {
        MonitError::Storage(err)
    }
}
