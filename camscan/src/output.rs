//! Rendering of scan results and interface listings.

use anyhow::Result;
use camscan_core::{HostResult, PortSet, ScanResult};
use clap::ValueEnum;
use host_discovery::InterfaceInfo;
use std::io::Write;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat { Text, Json, Jsonl }

/// A finished scan plus the facts needed to describe it.
pub struct ScanReport<'a> {
    pub result: &'a ScanResult,
    pub ports: &'a PortSet,
    pub started_at: String,
    pub ended_at: String,
    pub duration_ms: u128,
}

fn join_ports(ports: &[u16], sep: &str) -> String {
    ports.iter().map(|p| p.to_string()).collect::<Vec<_>>().join(sep)
}

/// Summary line, then one line per possible camera. `all` adds online hosts
/// with no camera port open.
pub fn text_lines(report: &ScanReport<'_>, all: bool) -> Vec<String> {
    let r = report.result;
    let cameras = r.cameras().count();
    let mut lines = vec![format!(
        "{}: {} addresses scanned, {} online, {} possible camera(s) ({} ms)",
        r.subnet, r.scanned, r.len(), cameras, report.duration_ms
    )];
    for h in &r.hosts {
        if h.possible_camera {
            lines.push(format!("possible camera: {} open ports [{}]", h.address, join_ports(&h.open_ports, ",")));
        } else if all {
            lines.push(format!("online: {} (no camera ports open)", h.address));
        }
    }
    if cameras == 0 {
        lines.push("no potential cameras found".to_string());
    }
    lines
}

fn host_json(h: &HostResult) -> serde_json::Value {
    serde_json::json!({
        "address": h.address,
        "online": h.is_online,
        "open_ports": h.open_ports,
        "possible_camera": h.possible_camera,
    })
}

pub fn json_summary(report: &ScanReport<'_>) -> serde_json::Value {
    let r = report.result;
    serde_json::json!({
        "subnet": r.subnet,
        "scanned": r.scanned,
        "ports": report.ports.as_slice(),
        "online": r.len(),
        "cameras": r.cameras().count(),
        "hosts": r.hosts.iter().map(host_json).collect::<Vec<_>>(),
        "started_at": report.started_at,
        "ended_at": report.ended_at,
        "duration_ms": report.duration_ms,
    })
}

/// One JSON object per online host.
pub fn jsonl_lines(result: &ScanResult) -> Vec<String> {
    result.hosts.iter().map(|h| host_json(h).to_string()).collect()
}

pub fn write_csv<W: Write>(w: W, result: &ScanResult) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(w);
    wtr.write_record(["address", "online", "open_ports", "possible_camera"])?;
    for h in &result.hosts {
        wtr.write_record([h.address.to_string(), h.is_online.to_string(), join_ports(&h.open_ports, "|"), h.possible_camera.to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Numbered adapter list: `1. eth0: 192.168.1.42 (192.168.1.0/24)`.
pub fn interface_lines(entries: &[InterfaceInfo]) -> Vec<String> {
    if entries.is_empty() {
        return vec!["no IPv4 interfaces found".to_string()];
    }
    entries
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let mut line = format!("{}. {}: {} ({})", i + 1, e.name, e.address, e.network);
            if e.is_loopback { line.push_str(" [loopback]"); }
            if !e.is_up { line.push_str(" [down]"); }
            line
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    fn sample() -> ScanResult {
        let mut r = ScanResult::new("10.0.0.0/30".parse().unwrap(), 4);
        r.hosts.push(HostResult { address: Ipv4Addr::new(10, 0, 0, 1), is_online: true, open_ports: vec![80, 554], possible_camera: true });
        r.hosts.push(HostResult { address: Ipv4Addr::new(10, 0, 0, 2), is_online: true, open_ports: vec![], possible_camera: false });
        r
    }

    fn report<'a>(r: &'a ScanResult, ports: &'a PortSet) -> ScanReport<'a> {
        ScanReport { result: r, ports, started_at: "t0".into(), ended_at: "t1".into(), duration_ms: 42 }
    }

    #[test]
    fn text_lists_cameras_and_optionally_all() {
        let r = sample();
        let ports = PortSet::default();
        let lines = text_lines(&report(&r, &ports), false);
        assert_eq!(lines[0], "10.0.0.0/30: 4 addresses scanned, 2 online, 1 possible camera(s) (42 ms)");
        assert_eq!(lines[1], "possible camera: 10.0.0.1 open ports [80,554]");
        assert_eq!(lines.len(), 2);
        let all = text_lines(&report(&r, &ports), true);
        assert_eq!(all[2], "online: 10.0.0.2 (no camera ports open)");
    }

    #[test]
    fn text_says_when_nothing_found() {
        let r = ScanResult::new("10.0.0.0/30".parse().unwrap(), 4);
        let ports = PortSet::default();
        assert_eq!(text_lines(&report(&r, &ports), false).last().unwrap(), "no potential cameras found");
    }

    #[test]
    fn json_summary_fields() {
        let r = sample();
        let ports = PortSet::camera(false);
        let v = json_summary(&report(&r, &ports));
        assert_eq!(v["subnet"], "10.0.0.0/30");
        assert_eq!(v["online"], 2);
        assert_eq!(v["cameras"], 1);
        assert_eq!(v["ports"], serde_json::json!([80, 443, 554, 8000, 8080, 9000]));
        assert_eq!(v["hosts"][0]["open_ports"], serde_json::json!([80, 554]));
    }

    #[test]
    fn jsonl_one_line_per_host() {
        let lines = jsonl_lines(&sample());
        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(first["address"], "10.0.0.1");
    }

    #[test]
    fn csv_rows() {
        let mut buf = Vec::new();
        write_csv(&mut buf, &sample()).unwrap();
        let s = String::from_utf8(buf).unwrap();
        let rows: Vec<&str> = s.lines().collect();
        assert_eq!(rows[0], "address,online,open_ports,possible_camera");
        assert_eq!(rows[1], "10.0.0.1,true,80|554,true");
        assert_eq!(rows[2], "10.0.0.2,true,,false");
    }
}
