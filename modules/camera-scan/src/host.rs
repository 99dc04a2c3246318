//! Liveness plus port checks for a single host.

use std::net::Ipv4Addr;

use camscan_core::{HostResult, PortProbe, PortSet, ReachabilityProbe};
use tracing::debug;

use crate::classifier::is_possible_camera;

/// Scans one host at a time with the given probes and port set.
#[derive(Debug, Clone)]
pub struct HostScanner<R, P> {
    reachability: R,
    ports: P,
    port_set: PortSet,
}

impl<R: ReachabilityProbe, P: PortProbe> HostScanner<R, P> {
    pub fn new(reachability: R, ports: P, port_set: PortSet) -> Self {
        HostScanner { reachability, ports, port_set }
    }

    pub fn port_set(&self) -> &PortSet {
        &self.port_set
    }

    /// Offline hosts get no port probes. Online hosts get one probe per port,
    /// one after the other in port-set order.
    pub async fn scan_host(&self, address: Ipv4Addr) -> HostResult {
        if !self.reachability.is_reachable(address).await {
            return HostResult::offline(address);
        }
        let mut open_ports = Vec::new();
        for port in self.port_set.iter() {
            if self.ports.is_open(address, port).await {
                open_ports.push(port);
            }
        }
        let possible_camera = is_possible_camera(&open_ports);
        debug!(%address, ?open_ports, possible_camera, "host online");
        HostResult { address, is_online: true, open_ports, possible_camera }
    }
}
