//! Host probes: port reachability and resource utilization

pub mod ports;
pub mod resources;

pub use ports::{DEFAULT_PROBE_HOST, DEFAULT_PROBE_TIMEOUT, probe, probe_ports};
pub use resources::{ResourceSample, ResourceSampler, SysinfoSampler};
