//! Local IPv4 adapters and the networks they sit on.

use std::net::Ipv4Addr;

use ipnet::Ipv4Net;
use pnet::datalink::{self, NetworkInterface};
use pnet::ipnetwork::IpNetwork;
use serde::Serialize;

use crate::targets::network_from_netmask;

/// One IPv4 address bound to a local adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterfaceInfo {
    pub name: String,
    pub address: Ipv4Addr,
    pub netmask: Ipv4Addr,
    pub network: Ipv4Net,
    pub is_loopback: bool,
    pub is_up: bool,
}

/// Every IPv4 address on every adapter of this machine.
pub fn list_interfaces() -> Vec<InterfaceInfo> {
    ipv4_entries(&datalink::interfaces())
}

/// Flatten adapters into one entry per IPv4 address.
pub fn ipv4_entries(interfaces: &[NetworkInterface]) -> Vec<InterfaceInfo> {
    let mut out = Vec::new();
    for iface in interfaces {
        for ip in &iface.ips {
            let IpNetwork::V4(v4) = ip else { continue };
            let Ok(network) = network_from_netmask(v4.ip(), v4.mask()) else { continue };
            out.push(InterfaceInfo {
                name: iface.name.clone(),
                address: v4.ip(),
                netmask: v4.mask(),
                network,
                is_loopback: iface.is_loopback(),
                is_up: iface.is_up(),
            });
        }
    }
    out
}

/// First entry that is up and not loopback.
pub fn default_interface(entries: &[InterfaceInfo]) -> Option<&InterfaceInfo> {
    entries.iter().find(|i| i.is_up && !i.is_loopback)
}
