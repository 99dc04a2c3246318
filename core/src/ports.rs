//! The fixed set of ports checked on every reachable host.

use std::fmt;
use std::sync::Arc;

/// Web, RTSP and DVR/NVR ports commonly exposed by network cameras.
pub const CAMERA_PORTS: [u16; 6] = [80, 443, 554, 8000, 8080, 9000];

/// Vendor-specific DVR ports (Dahua 37777, XMeye/HiSilicon 34567).
pub const VENDOR_PORTS: [u16; 2] = [37777, 34567];

/// Ordered, de-duplicated list of ports. Probe order follows this order.
///
/// Cloning shares the underlying slice, so one set can be handed to every
/// scan task without copying or locking.
#[derive(Clone, PartialEq, Eq)]
pub struct PortSet(Arc<[u16]>);

impl PortSet {
    /// Build a set keeping the first occurrence of each port.
    pub fn new<I: IntoIterator<Item = u16>>(ports: I) -> Self {
        let mut out: Vec<u16> = Vec::new();
        for p in ports {
            if !out.contains(&p) { out.push(p); }
        }
        PortSet(out.into())
    }

    /// The camera port set, optionally followed by the vendor DVR ports.
    pub fn camera(include_vendor_ports: bool) -> Self {
        if include_vendor_ports {
            PortSet::new(CAMERA_PORTS.iter().chain(VENDOR_PORTS.iter()).copied())
        } else {
            PortSet::new(CAMERA_PORTS)
        }
    }

    pub fn as_slice(&self) -> &[u16] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
        self.0.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for PortSet {
    fn default() -> Self {
        PortSet::camera(true)
    }
}

impl fmt::Debug for PortSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl fmt::Display for PortSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let list = self.0.iter().map(|p| p.to_string()).collect::<Vec<_>>().join(",");
        f.write_str(&list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_includes_vendor_ports_last() {
        let set = PortSet::default();
        assert_eq!(set.as_slice(), &[80, 443, 554, 8000, 8080, 9000, 37777, 34567]);
    }

    #[test]
    fn camera_without_vendor_ports() {
        assert_eq!(PortSet::camera(false).as_slice(), &[80, 443, 554, 8000, 8080, 9000]);
    }

    #[test]
    fn new_keeps_first_occurrence_order() {
        let set = PortSet::new([8080, 80, 8080, 554, 80]);
        assert_eq!(set.as_slice(), &[8080, 80, 554]);
        assert_eq!(set.to_string(), "8080,80,554");
    }

    #[test]
    fn clones_share_storage() {
        let a = PortSet::default();
        let b = a.clone();
        assert!(std::ptr::eq(a.as_slice(), b.as_slice()));
    }
}
