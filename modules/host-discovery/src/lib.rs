//! Host discovery: subnet expansion, liveness probes and local interfaces.

use std::net::Ipv4Addr;

use async_trait::async_trait;
use camscan_core::ReachabilityProbe;

pub mod interfaces;
pub mod ping;
pub mod targets;
pub mod tcp;

pub use interfaces::{default_interface, list_interfaces, InterfaceInfo};
pub use ping::{PingFlavor, PingProber};
pub use targets::{expand_cidr, network_from_netmask, parse_subnet, TargetList};
pub use tcp::{is_host_live, TcpLivenessProber, DEFAULT_LIVENESS_PORTS};

/// Liveness strategy chosen at runtime.
#[derive(Debug, Clone)]
pub enum Liveness {
    Ping(PingProber),
    Tcp(TcpLivenessProber),
}

#[async_trait]
impl ReachabilityProbe for Liveness {
    async fn is_reachable(&self, addr: Ipv4Addr) -> bool {
        match self {
            Liveness::Ping(p) => p.is_reachable(addr).await,
            Liveness::Tcp(t) => t.is_reachable(addr).await,
        }
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Liveness::Ping(PingProber::default())
    }
}
