use std::collections::BTreeMap;
use std::time::Duration;

use futures::future::join_all;
use tokio::net::TcpStream;
use tracing::{instrument, trace};

pub const DEFAULT_PROBE_HOST: &str = "127.0.0.1";

pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(1);

/// Check whether `host:port` accepts a TCP connection within `timeout`.
///
/// Refusal, timeout and every other connect error all count as "not open".
#[instrument(level = "trace")]
pub async fn probe(host: &str, port: u16, timeout: Duration) -> bool {
    match tokio::time::timeout(timeout, TcpStream::connect((host, port))).await {
        Ok(Ok(_stream)) => true,
        Ok(Err(e)) => {
            trace!("{host}:{port}: connect failed: {e}");
            false
        }
        Err(_) => {
            trace!("{host}:{port}: connect timed out after {timeout:?}");
            false
        }
    }
}

/// Probe every port concurrently, each with its own timeout.
pub async fn probe_ports(host: &str, ports: &[u16], timeout: Duration) -> BTreeMap<u16, bool> {
    let results = join_all(ports.iter().map(|&port| async move {
        (port, probe(host, port, timeout).await)
    }))
    .await;

    results.into_iter().collect()
}
