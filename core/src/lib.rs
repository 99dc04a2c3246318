//! Core types shared by the camscan probes, the orchestrator and the CLI.

use std::time::Duration;

pub mod error;
pub mod ports;
pub mod probe;
pub mod result;

pub use error::InvalidSubnetError;
pub use ports::PortSet;
pub use probe::{PortProbe, ReachabilityProbe};
pub use result::{HostResult, ScanResult};

/// Per-probe timeout used by both the reachability and the port probers.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(1);

/// Maximum number of hosts scanned at once unless configured otherwise.
pub const DEFAULT_CONCURRENCY: usize = 50;

/// A progress event is emitted after this many completed hosts.
pub const PROGRESS_EVERY: u64 = 10;

pub const fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
