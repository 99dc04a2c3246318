//! Bounded fan-out of host scans over a whole subnet.

use std::sync::Arc;

use camscan_core::{
    HostResult, InvalidSubnetError, PortProbe, PortSet, ReachabilityProbe, ScanResult, DEFAULT_CONCURRENCY,
    PROGRESS_EVERY,
};
use host_discovery::{Liveness, TargetList};
use port_scan::ConnectProber;
use tokio::sync::{mpsc, Semaphore};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::host::HostScanner;

/// Advisory progress event: `completed` of `total` hosts finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: u64,
    pub total: u64,
}

impl Progress {
    pub fn percent(&self) -> f64 {
        if self.total == 0 { return 100.0; }
        self.completed as f64 / self.total as f64 * 100.0
    }
}

/// Runs a [`HostScanner`] over every address of a subnet with at most
/// `concurrency` hosts in flight, and keeps the online ones.
pub struct CameraScanner<R, P> {
    host: Arc<HostScanner<R, P>>,
    concurrency: usize,
    progress: Option<mpsc::Sender<Progress>>,
    progress_every: u64,
}

impl CameraScanner<Liveness, ConnectProber> {
    /// Ping liveness, connect probes and the default camera ports, all with 1 s timeouts.
    pub fn with_defaults() -> Self {
        CameraScanner::new(HostScanner::new(Liveness::default(), ConnectProber::default(), PortSet::default()))
    }
}

impl<R, P> CameraScanner<R, P>
where
    R: ReachabilityProbe + 'static,
    P: PortProbe + 'static,
{
    pub fn new(host: HostScanner<R, P>) -> Self {
        CameraScanner { host: Arc::new(host), concurrency: DEFAULT_CONCURRENCY, progress: None, progress_every: PROGRESS_EVERY }
    }

    /// Upper bound on hosts scanned at once. Zero is treated as one.
    pub fn concurrency(mut self, limit: usize) -> Self {
        self.concurrency = limit.clamp(1, Semaphore::MAX_PERMITS);
        self
    }

    /// Send a [`Progress`] event every `progress_every` completions. Events
    /// are dropped when the receiver is full or gone; the scan never waits on it.
    pub fn progress(mut self, tx: mpsc::Sender<Progress>) -> Self {
        self.progress = Some(tx);
        self
    }

    pub fn progress_every(mut self, every: u64) -> Self {
        self.progress_every = every.max(1);
        self
    }

    pub fn concurrency_limit(&self) -> usize {
        self.concurrency
    }

    /// Parse `subnet` and scan it. A malformed subnet fails before any probe is sent.
    pub async fn scan(&self, subnet: &str) -> Result<ScanResult, InvalidSubnetError> {
        let targets = TargetList::parse(subnet)?;
        Ok(self.scan_targets(targets).await)
    }

    /// Scan every address of `targets`. Hosts come back in completion order.
    pub async fn scan_targets(&self, targets: TargetList) -> ScanResult {
        let total = targets.len();
        let started = Instant::now();
        info!(subnet = %targets.subnet(), total, concurrency = self.concurrency, ports = %self.host.port_set(), "scan started");

        let (tx, mut rx) = mpsc::channel::<HostResult>(self.concurrency);
        let sem = Arc::new(Semaphore::new(self.concurrency));
        let host = self.host.clone();
        let dispatcher = tokio::spawn(async move {
            for addr in targets {
                let Ok(permit) = sem.clone().acquire_owned().await else { break };
                let host = host.clone();
                let tx = tx.clone();
                tokio::spawn(async move {
                    let result = host.scan_host(addr).await;
                    let _ = tx.send(result).await;
                    drop(permit);
                });
            }
        });

        let mut out = ScanResult::new(targets.subnet(), total);
        let mut completed = 0u64;
        while let Some(result) = rx.recv().await {
            completed += 1;
            if completed % self.progress_every == 0 {
                self.report(Progress { completed, total });
            }
            if result.is_online {
                out.hosts.push(result);
            }
        }
        if let Err(e) = dispatcher.await {
            warn!(error = %e, "dispatcher stopped before all targets were scheduled");
        }
        if completed != total {
            warn!(completed, total, "some host scans did not report a result");
        }

        info!(
            subnet = %out.subnet,
            online = out.len(),
            cameras = out.cameras().count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "scan finished"
        );
        out
    }

    fn report(&self, p: Progress) {
        debug!(completed = p.completed, total = p.total, "progress");
        if let Some(tx) = &self.progress {
            let _ = tx.try_send(p);
        }
    }
}

/// Scan `subnet` with the default probes and port set.
pub async fn scan(subnet: &str, concurrency: usize) -> Result<ScanResult, InvalidSubnetError> {
    CameraScanner::with_defaults().concurrency(concurrency).scan(subnet).await
}
