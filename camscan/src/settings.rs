//! Effective scan settings: command line first, then config file, then defaults.

use anyhow::{anyhow, Result};
use camera_scan::{CameraScanner, HostScanner};
use camscan_core::{PortSet, DEFAULT_CONCURRENCY, DEFAULT_PROBE_TIMEOUT, PROGRESS_EVERY};
use clap::{Args, ValueEnum};
use host_discovery::{Liveness, PingProber, TcpLivenessProber, DEFAULT_LIVENESS_PORTS};
use port_scan::{parse_ports, ConnectProber};
use std::time::Duration;

use crate::config::ScanConfig;
use crate::output::OutputFormat;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum LivenessMode {
    /// ICMP echo through the system ping utility
    Ping,
    /// TCP connect to the liveness ports
    Tcp,
}

/// Tunables shared by the command line and the `scan:` config section.
#[derive(Debug, Default, Clone, Args)]
pub struct ScanOptions {
    /// Ports to check on online hosts, in probe order (e.g., 80,554,8000-8010). Default: camera ports.
    #[arg(long)]
    pub ports: Option<String>,
    /// Leave out the vendor DVR ports 37777 and 34567 from the default set
    #[arg(long, default_value_t = false)]
    pub no_vendor_ports: bool,
    /// Timeout per port probe in milliseconds [default: 1000]
    #[arg(long)]
    pub timeout_ms: Option<u64>,
    /// Timeout of the liveness probe in milliseconds [default: 1000]
    #[arg(long)]
    pub liveness_timeout_ms: Option<u64>,
    /// Max hosts scanned concurrently [default: 50]
    #[arg(long)]
    pub concurrency: Option<usize>,
    /// How to decide whether a host is online [default: ping]
    #[arg(long, value_enum)]
    pub liveness: Option<LivenessMode>,
    /// Ports used by --liveness tcp [default: 80,443,22]
    #[arg(long)]
    pub liveness_ports: Option<String>,
    /// Report progress every N completed hosts [default: 10]
    #[arg(long)]
    pub progress_every: Option<u64>,
    /// Output format [default: text]
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Clone)]
pub struct ScanSettings {
    pub port_set: PortSet,
    pub port_timeout: Duration,
    pub liveness: Liveness,
    pub concurrency: usize,
    pub progress_every: u64,
    pub format: OutputFormat,
}

fn enum_value<T: ValueEnum>(what: &str, s: &str) -> Result<T> {
    T::from_str(s.trim(), true).map_err(|_| anyhow!("invalid {} in config: {}", what, s))
}

impl ScanSettings {
    pub fn resolve(opts: &ScanOptions, cfg: Option<&ScanConfig>) -> Result<Self> {
        let cfg = cfg.cloned().unwrap_or_default();

        let port_set = match opts.ports.as_ref().or(cfg.ports.as_ref()) {
            Some(spec) => PortSet::new(parse_ports(spec)?),
            None => PortSet::camera(!opts.no_vendor_ports && cfg.vendor_ports.unwrap_or(true)),
        };

        let ms = |cli: Option<u64>, file: Option<u64>| cli.or(file).map(Duration::from_millis).unwrap_or(DEFAULT_PROBE_TIMEOUT);
        let port_timeout = ms(opts.timeout_ms, cfg.timeout_ms);
        let liveness_timeout = ms(opts.liveness_timeout_ms, cfg.liveness_timeout_ms);

        let mode = match (opts.liveness, cfg.liveness.as_deref()) {
            (Some(m), _) => m,
            (None, Some(s)) => enum_value("liveness", s)?,
            (None, None) => LivenessMode::Ping,
        };
        let liveness = match mode {
            LivenessMode::Ping => Liveness::Ping(PingProber::new(liveness_timeout)),
            LivenessMode::Tcp => {
                let ports = match opts.liveness_ports.as_ref().or(cfg.liveness_ports.as_ref()) {
                    Some(spec) => parse_ports(spec)?,
                    None => DEFAULT_LIVENESS_PORTS.to_vec(),
                };
                Liveness::Tcp(TcpLivenessProber::new(ports, liveness_timeout))
            }
        };

        let format = match (opts.format, cfg.format.as_deref()) {
            (Some(f), _) => f,
            (None, Some(s)) => enum_value("format", s)?,
            (None, None) => OutputFormat::Text,
        };

        Ok(ScanSettings {
            port_set,
            port_timeout,
            liveness,
            concurrency: opts.concurrency.or(cfg.concurrency).unwrap_or(DEFAULT_CONCURRENCY).max(1),
            progress_every: opts.progress_every.or(cfg.progress_every).unwrap_or(PROGRESS_EVERY).max(1),
            format,
        })
    }

    pub fn scanner(&self) -> CameraScanner<Liveness, ConnectProber> {
        let host = HostScanner::new(self.liveness.clone(), ConnectProber::new(self.port_timeout), self.port_set.clone());
        CameraScanner::new(host).concurrency(self.concurrency).progress_every(self.progress_every)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_flags_or_config() {
        let s = ScanSettings::resolve(&ScanOptions::default(), None).unwrap();
        assert_eq!(s.port_set, PortSet::default());
        assert_eq!(s.port_timeout, Duration::from_secs(1));
        assert_eq!(s.concurrency, 50);
        assert_eq!(s.progress_every, 10);
        assert_eq!(s.format, OutputFormat::Text);
        assert!(matches!(s.liveness, Liveness::Ping(ref p) if p.timeout() == Duration::from_secs(1)));
    }

    #[test]
    fn command_line_beats_config() {
        let cfg = ScanConfig { ports: Some("80".into()), concurrency: Some(5), format: Some("json".into()), ..Default::default() };
        let opts = ScanOptions { ports: Some("554,8000".into()), concurrency: Some(9), ..Default::default() };
        let s = ScanSettings::resolve(&opts, Some(&cfg)).unwrap();
        assert_eq!(s.port_set.as_slice(), &[554, 8000]);
        assert_eq!(s.concurrency, 9);
        assert_eq!(s.format, OutputFormat::Json);
    }

    #[test]
    fn vendor_ports_can_be_dropped() {
        let opts = ScanOptions { no_vendor_ports: true, ..Default::default() };
        assert_eq!(ScanSettings::resolve(&opts, None).unwrap().port_set, PortSet::camera(false));
        let cfg = ScanConfig { vendor_ports: Some(false), ..Default::default() };
        assert_eq!(ScanSettings::resolve(&ScanOptions::default(), Some(&cfg)).unwrap().port_set, PortSet::camera(false));
    }

    #[test]
    fn tcp_liveness_from_config() {
        let cfg = ScanConfig { liveness: Some("TCP".into()), liveness_ports: Some("22,8080".into()), ..Default::default() };
        let s = ScanSettings::resolve(&ScanOptions::default(), Some(&cfg)).unwrap();
        match s.liveness {
            Liveness::Tcp(t) => assert_eq!(t.ports(), &[22, 8080]),
            other => panic!("unexpected liveness {:?}", other),
        }
    }

    #[test]
    fn bad_values_are_errors() {
        let cfg = ScanConfig { liveness: Some("arp".into()), ..Default::default() };
        assert!(ScanSettings::resolve(&ScanOptions::default(), Some(&cfg)).is_err());
        let opts = ScanOptions { ports: Some("0".into()), ..Default::default() };
        assert!(ScanSettings::resolve(&opts, None).is_err());
    }

    #[test]
    fn zero_concurrency_is_clamped() {
        let opts = ScanOptions { concurrency: Some(0), ..Default::default() };
        assert_eq!(ScanSettings::resolve(&opts, None).unwrap().concurrency, 1);
    }
}
