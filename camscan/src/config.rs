use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::warn;

/// File looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "camscan.yaml";

#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
pub struct ScanConfig {
    pub ports: Option<String>,
    pub vendor_ports: Option<bool>,
    pub timeout_ms: Option<u64>,
    pub liveness_timeout_ms: Option<u64>,
    pub concurrency: Option<usize>,
    pub liveness: Option<String>,
    pub liveness_ports: Option<String>,
    pub progress_every: Option<u64>,
    pub format: Option<String>,
}

#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub scan: Option<ScanConfig>,
}

pub fn parse_config(s: &str) -> Result<Config> {
    Ok(serde_yaml::from_str(s)?)
}

/// Load `path`, or `./camscan.yaml` when present. A missing default file is
/// not an error; an unreadable or invalid file is reported and ignored.
pub fn load_config(path: Option<&Path>) -> Option<Config> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => {
            let p = Path::new(DEFAULT_CONFIG_FILE);
            if p.exists() { p.to_path_buf() } else { return None; }
        }
    };
    let loaded = fs::read_to_string(&path)
        .with_context(|| format!("reading {}", path.display()))
        .and_then(|s| parse_config(&s).with_context(|| format!("parsing {}", path.display())));
    match loaded {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            warn!("ignoring config: {:#}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scan_section() {
        let cfg = parse_config(
            "scan:\n  ports: \"80,554\"\n  vendor_ports: false\n  concurrency: 20\n  liveness: tcp\n  format: jsonl\n",
        )
        .unwrap();
        let scan = cfg.scan.unwrap();
        assert_eq!(scan.ports.as_deref(), Some("80,554"));
        assert_eq!(scan.vendor_ports, Some(false));
        assert_eq!(scan.concurrency, Some(20));
        assert_eq!(scan.liveness.as_deref(), Some("tcp"));
        assert_eq!(scan.timeout_ms, None);
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(parse_config("{}").unwrap(), Config::default());
    }

    #[test]
    fn rejects_wrong_types() {
        assert!(parse_config("scan:\n  concurrency: lots\n").is_err());
    }

    #[test]
    fn missing_explicit_file_is_ignored() {
        assert!(load_config(Some(Path::new("/nonexistent/camscan.yaml"))).is_none());
    }
}
