//! Subnet parsing and target enumeration.

use std::net::Ipv4Addr;

use camscan_core::InvalidSubnetError;
use ipnet::{Ipv4AddrRange, Ipv4Net};

/// Parse an IPv4 CIDR such as `192.168.1.0/24`.
///
/// Host bits are cleared instead of rejected (`192.168.1.7/24` scans
/// `192.168.1.0/24`). A bare address means `/32`, and a dotted netmask is
/// accepted in place of the prefix length (`10.0.0.0/255.255.255.0`).
pub fn parse_subnet(input: &str) -> Result<Ipv4Net, InvalidSubnetError> {
    let s = input.trim();
    let (addr, prefix) = match s.split_once('/') {
        Some((a, p)) => (a, Some(p)),
        None => (s, None),
    };
    let addr: Ipv4Addr = addr.parse().map_err(|_| InvalidSubnetError::malformed(input))?;
    let prefix = match prefix {
        None => 32,
        Some(p) if p.contains('.') => {
            let mask: Ipv4Addr = p.parse().map_err(|_| InvalidSubnetError::malformed(input))?;
            return network_from_netmask(addr, mask);
        }
        Some(p) => {
            if p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit()) {
                return Err(InvalidSubnetError::malformed(input));
            }
            let n: u32 = p.parse().map_err(|_| InvalidSubnetError::malformed(input))?;
            if n > 32 {
                return Err(InvalidSubnetError::PrefixOutOfRange { input: input.to_string(), prefix: n });
            }
            n as u8
        }
    };
    let net = Ipv4Net::new(addr, prefix).map_err(|_| InvalidSubnetError::malformed(input))?;
    Ok(net.trunc())
}

/// Network of `ip` under a dotted `netmask`, as reported by an interface.
pub fn network_from_netmask(ip: Ipv4Addr, netmask: Ipv4Addr) -> Result<Ipv4Net, InvalidSubnetError> {
    let prefix = ipnet::ipv4_mask_to_prefix(netmask).map_err(|_| InvalidSubnetError::InvalidNetmask { netmask })?;
    let net = Ipv4Net::new(ip, prefix).map_err(|_| InvalidSubnetError::InvalidNetmask { netmask })?;
    Ok(net.trunc())
}

/// Every address of a block, network and broadcast included, in ascending order.
///
/// The list is a view over the block and is never materialized, so large
/// subnets cost nothing until iterated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetList {
    net: Ipv4Net,
}

impl TargetList {
    pub fn new(net: Ipv4Net) -> Self {
        TargetList { net: net.trunc() }
    }

    pub fn parse(input: &str) -> Result<Self, InvalidSubnetError> {
        parse_subnet(input).map(TargetList::new)
    }

    pub fn subnet(&self) -> Ipv4Net {
        self.net
    }

    /// `2^(32 - prefix)` addresses.
    pub fn len(&self) -> u64 {
        1u64 << (32 - u32::from(self.net.prefix_len()))
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> Ipv4AddrRange {
        Ipv4AddrRange::new(self.net.network(), self.net.broadcast())
    }
}

impl IntoIterator for TargetList {
    type Item = Ipv4Addr;
    type IntoIter = Ipv4AddrRange;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Expand a CIDR into its addresses.
pub fn expand_cidr(cidr: &str) -> Result<Vec<Ipv4Addr>, InvalidSubnetError> {
    Ok(TargetList::parse(cidr)?.iter().collect())
}
