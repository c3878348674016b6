//! API shared state

use crate::pipeline::Monitor;

/// Shared state passed to all API handlers
#[derive(Clone)]
pub struct ApiState {
    /// The check pipeline, which also owns the report store handle
    pub monitor: Monitor,
}

impl ApiState {
    pub fn new(monitor: Monitor) -> Self {
        Self { monitor }
    }
}
