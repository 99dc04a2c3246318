//! TCP-based liveness: a host is up if any of a few ports accepts a connection.

use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use async_trait::async_trait;
use camscan_core::{ReachabilityProbe, DEFAULT_PROBE_TIMEOUT};
use tokio::net::TcpStream;
use tokio::time::timeout;

/// Ports tried when no liveness ports are configured.
pub const DEFAULT_LIVENESS_PORTS: [u16; 3] = [80, 443, 22];

#[derive(Debug, Clone)]
pub struct TcpLivenessProber {
    ports: Vec<u16>,
    per_attempt: Duration,
}

impl TcpLivenessProber {
    pub fn new(ports: Vec<u16>, per_attempt: Duration) -> Self {
        TcpLivenessProber { ports, per_attempt }
    }

    pub fn ports(&self) -> &[u16] {
        &self.ports
    }
}

impl Default for TcpLivenessProber {
    fn default() -> Self {
        TcpLivenessProber::new(DEFAULT_LIVENESS_PORTS.to_vec(), DEFAULT_PROBE_TIMEOUT)
    }
}

/// Attempt to connect to the given ports in order; live on the first success.
pub async fn is_host_live(ip: Ipv4Addr, ports: &[u16], per_attempt: Duration) -> bool {
    for &p in ports {
        let addr = SocketAddr::from((ip, p));
        if let Ok(Ok(_)) = timeout(per_attempt, TcpStream::connect(addr)).await { return true; }
    }
    false
}

#[async_trait]
impl ReachabilityProbe for TcpLivenessProber {
    async fn is_reachable(&self, addr: Ipv4Addr) -> bool {
        is_host_live(addr, &self.ports, self.per_attempt).await
    }
}
