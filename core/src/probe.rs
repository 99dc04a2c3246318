//! Seams between the scan logic and the network.
//!
//! Both probes are total: every failure (spawn error, refusal, timeout, socket
//! error) is reported as `false`. A scan never aborts because one probe went
//! wrong, and a transient failure looks the same as a real negative.

use std::net::Ipv4Addr;
use std::sync::Arc;

use async_trait::async_trait;

/// Network-layer liveness check for a single host.
#[async_trait]
pub trait ReachabilityProbe: Send + Sync {
    async fn is_reachable(&self, addr: Ipv4Addr) -> bool;
}

/// Transport-layer connect check for a single (host, port) pair.
#[async_trait]
pub trait PortProbe: Send + Sync {
    async fn is_open(&self, addr: Ipv4Addr, port: u16) -> bool;
}

#[async_trait]
impl<T: ReachabilityProbe + ?Sized> ReachabilityProbe for Arc<T> {
    async fn is_reachable(&self, addr: Ipv4Addr) -> bool {
        (**self).is_reachable(addr).await
    }
}

#[async_trait]
impl<T: PortProbe + ?Sized> PortProbe for Arc<T> {
    async fn is_open(&self, addr: Ipv4Addr, port: u16) -> bool {
        (**self).is_open(addr, port).await
    }
}

#[async_trait]
impl<T: ReachabilityProbe + ?Sized> ReachabilityProbe for Box<T> {
    async fn is_reachable(&self, addr: Ipv4Addr) -> bool {
        (**self).is_reachable(addr).await
    }
}

#[async_trait]
impl<T: PortProbe + ?Sized> PortProbe for Box<T> {
    async fn is_open(&self, addr: Ipv4Addr, port: u16) -> bool {
        (**self).is_open(addr, port).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Always(bool);

    #[async_trait]
    impl ReachabilityProbe for Always {
        async fn is_reachable(&self, _addr: Ipv4Addr) -> bool { self.0 }
    }

    #[async_trait]
    impl PortProbe for Always {
        async fn is_open(&self, _addr: Ipv4Addr, _port: u16) -> bool { self.0 }
    }

    #[tokio::test]
    async fn shared_and_boxed_probes_delegate() {
        let shared = Arc::new(Always(true));
        assert!(shared.is_reachable(Ipv4Addr::LOCALHOST).await);
        assert!(shared.is_open(Ipv4Addr::LOCALHOST, 80).await);

        let boxed: Box<dyn PortProbe> = Box::new(Always(false));
        assert!(!boxed.is_open(Ipv4Addr::LOCALHOST, 80).await);
    }
}
