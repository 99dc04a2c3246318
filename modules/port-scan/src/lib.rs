//! TCP connect probe with a timeout, and port list parsing.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use camscan_core::{PortProbe, DEFAULT_PROBE_TIMEOUT};
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::trace;

/// Parse a comma-separated list of ports/ranges (e.g., "80,554", "8000-8010,37777").
/// Order is kept as written (it is the probe order); repeated ports are dropped.
pub fn parse_ports(spec: &str) -> Result<Vec<u16>> {
    let mut ports = Vec::new();
    let mut push = |p: u16| if !ports.contains(&p) { ports.push(p) };
    for part in spec.split(',').map(|s| s.trim()).filter(|s| !s.is_empty()) {
        if let Some((start, end)) = part.split_once('-') {
            let s: u16 = start.trim().parse()?;
            let e: u16 = end.trim().parse()?;
            if s == 0 || e == 0 || s > e {
                return Err(anyhow!("invalid port range: {}", part));
            }
            (s..=e).for_each(&mut push);
        } else {
            let p: u16 = part.parse()?;
            if p == 0 {
                return Err(anyhow!("invalid port: {}", part));
            }
            push(p);
        }
    }
    if ports.is_empty() {
        return Err(anyhow!("no ports in {:?}", spec));
    }
    Ok(ports)
}

/// Connect-and-close probe. Nothing is written to the socket.
#[derive(Debug, Clone, Copy)]
pub struct ConnectProber {
    timeout: Duration,
}

impl ConnectProber {
    pub fn new(timeout: Duration) -> Self {
        ConnectProber { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for ConnectProber {
    fn default() -> Self {
        ConnectProber::new(DEFAULT_PROBE_TIMEOUT)
    }
}

/// True iff `addr:port` accepts a TCP connection within `timeout_per_port`.
/// Refusal, timeout and any socket error all read as closed; there is no retry.
pub async fn probe_connect(addr: Ipv4Addr, port: u16, timeout_per_port: Duration) -> bool {
    let sa = SocketAddr::from((addr, port));
    match timeout(timeout_per_port, TcpStream::connect(sa)).await {
        Ok(Ok(_stream)) => true,
        Ok(Err(e)) => {
            trace!(%sa, error = %e, "connect failed");
            false
        }
        Err(_) => {
            trace!(%sa, "connect timed out");
            false
        }
    }
}

#[async_trait]
impl PortProbe for ConnectProber {
    async fn is_open(&self, addr: Ipv4Addr, port: u16) -> bool {
        probe_connect(addr, port, self.timeout).await
    }
}
