//! Per-host and per-scan result records.

use std::net::Ipv4Addr;

use ipnet::Ipv4Net;
use serde::Serialize;

/// Outcome of scanning one host. Built once by the host scanner and then only moved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostResult {
    pub address: Ipv4Addr,
    pub is_online: bool,
    /// Open ports in probe order.
    pub open_ports: Vec<u16>,
    pub possible_camera: bool,
}

impl HostResult {
    /// A host that did not answer the liveness probe. No ports were checked.
    pub fn offline(address: Ipv4Addr) -> Self {
        HostResult { address, is_online: false, open_ports: Vec::new(), possible_camera: false }
    }
}

/// Online hosts found in one subnet, in completion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanResult {
    pub subnet: Ipv4Net,
    /// Number of addresses probed, online or not.
    pub scanned: u64,
    pub hosts: Vec<HostResult>,
}

impl ScanResult {
    pub fn new(subnet: Ipv4Net, scanned: u64) -> Self {
        ScanResult { subnet, scanned, hosts: Vec::new() }
    }

    /// Hosts flagged as a possible camera.
    pub fn cameras(&self) -> impl Iterator<Item = &HostResult> {
        self.hosts.iter().filter(|h| h.possible_camera)
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    /// Same result with hosts ordered by address. Scans complete in arbitrary
    /// order; this is for presentation and comparisons only.
    pub fn sorted(mut self) -> Self {
        self.hosts.sort_by_key(|h| h.address);
        self
    }
}
