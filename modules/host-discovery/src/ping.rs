//! ICMP echo liveness through the system `ping` utility.
//!
//! Raw ICMP sockets need elevated privileges, so the probe runs `ping` as a
//! child process and only looks at its exit status. A host that filters ICMP
//! is reported as offline, same as a host that is down.

use std::ffi::OsString;
use std::net::Ipv4Addr;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use camscan_core::{ReachabilityProbe, DEFAULT_PROBE_TIMEOUT};
use tokio::process::Command;
use tokio::time::timeout;
use tracing::trace;

/// Argument style of the local `ping` binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PingFlavor {
    /// `ping -n 1 <ip>`
    Windows,
    /// `ping -c 1 <ip>`
    Unix,
}

impl PingFlavor {
    pub fn current() -> Self {
        if cfg!(windows) { PingFlavor::Windows } else { PingFlavor::Unix }
    }

    /// Arguments for a single echo request to `addr`.
    pub fn args(self, addr: Ipv4Addr) -> Vec<String> {
        let count = match self {
            PingFlavor::Windows => "-n",
            PingFlavor::Unix => "-c",
        };
        vec![count.to_string(), "1".to_string(), addr.to_string()]
    }
}

#[derive(Debug, Clone)]
pub struct PingProber {
    program: OsString,
    flavor: PingFlavor,
    timeout: Duration,
}

impl PingProber {
    pub fn new(timeout: Duration) -> Self {
        PingProber { program: "ping".into(), flavor: PingFlavor::current(), timeout }
    }

    /// Use another executable in place of `ping`.
    pub fn with_program(mut self, program: impl Into<OsString>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_flavor(mut self, flavor: PingFlavor) -> Self {
        self.flavor = flavor;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Send one echo request and wait at most `timeout` for `ping` to exit.
    pub async fn ping(&self, addr: Ipv4Addr) -> bool {
        let mut cmd = Command::new(&self.program);
        cmd.args(self.flavor.args(addr))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);
        match timeout(self.timeout, cmd.status()).await {
            Ok(Ok(status)) => {
                trace!(%addr, code = ?status.code(), "ping exited");
                status.success()
            }
            Ok(Err(e)) => {
                trace!(%addr, error = %e, "ping could not be started");
                false
            }
            Err(_) => {
                trace!(%addr, "ping timed out");
                false
            }
        }
    }
}

impl Default for PingProber {
    fn default() -> Self {
        PingProber::new(DEFAULT_PROBE_TIMEOUT)
    }
}

#[async_trait]
impl ReachabilityProbe for PingProber {
    async fn is_reachable(&self, addr: Ipv4Addr) -> bool {
        self.ping(addr).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unix_and_windows_arguments() {
        let ip = Ipv4Addr::new(192, 168, 1, 10);
        assert_eq!(PingFlavor::Unix.args(ip), vec!["-c", "1", "192.168.1.10"]);
        assert_eq!(PingFlavor::Windows.args(ip), vec!["-n", "1", "192.168.1.10"]);
    }

    #[test]
    fn default_timeout_is_one_second() {
        assert_eq!(PingProber::default().timeout(), Duration::from_secs(1));
    }

    #[tokio::test]
    async fn missing_binary_means_unreachable() {
        let p = PingProber::default().with_program("camscan-no-such-ping-binary");
        assert!(!p.is_reachable(Ipv4Addr::LOCALHOST).await);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn exit_status_decides() {
        // `true`/`false` ignore their arguments, which makes them stand-ins for ping.
        let up = PingProber::default().with_program("true");
        let down = PingProber::default().with_program("false");
        assert!(up.is_reachable(Ipv4Addr::LOCALHOST).await);
        assert!(!down.is_reachable(Ipv4Addr::LOCALHOST).await);
    }
}
