use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

mod config;
mod output;
mod settings;

use output::{OutputFormat, ScanReport};
use settings::{ScanOptions, ScanSettings};

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_else(|_| String::new())
}

#[derive(Debug, Parser)]
#[command(name = "camscan", version, about = "Find possible network cameras on an IPv4 subnet")]
struct Cli {
    /// Optional config file (YAML). If omitted, loads ./camscan.yaml if present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print version information
    Version,
    /// List local IPv4 interfaces and the networks they belong to
    Interfaces {
        /// Include loopback and down interfaces
        #[arg(long, default_value_t = false)]
        all: bool,
        /// Output format: text or json
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Scan a subnet for hosts exposing camera ports
    Scan {
        /// CIDR to scan (e.g., 192.168.1.0/24). Default: network of the first active interface.
        #[arg(conflicts_with = "interface")]
        subnet: Option<String>,
        /// Scan the network of this local interface
        #[arg(long, short = 'i')]
        interface: Option<String>,
        /// Also list online hosts with no camera port open (text output)
        #[arg(long, default_value_t = false)]
        all: bool,
        /// Output file (overwrites)
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
        /// Write CSV instead of text/json when --out is provided
        #[arg(long, default_value_t = false, requires = "out")]
        csv: bool,
        #[command(flatten)]
        opts: ScanOptions,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

/// Subnet given on the command line, or the network of the named/default interface.
fn resolve_subnet(subnet: Option<String>, interface: Option<&str>) -> Result<String> {
    if let Some(s) = subnet { return Ok(s); }
    let entries = host_discovery::list_interfaces();
    let chosen = match interface {
        Some(name) => entries
            .iter()
            .find(|e| e.name == name)
            .ok_or_else(|| anyhow!("no IPv4 address on interface {}", name))?,
        None => host_discovery::default_interface(&entries)
            .ok_or_else(|| anyhow!("no active IPv4 interface found; pass a subnet such as 192.168.1.0/24"))?,
    };
    info!(interface = %chosen.name, address = %chosen.address, network = %chosen.network, "using interface network");
    Ok(chosen.network.to_string())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let loaded_cfg = config::load_config(cli.config.as_deref());
    match cli.command {
        Commands::Version => {
            println!("camscan {} (core {})", env!("CARGO_PKG_VERSION"), camscan_core::version());
        }
        Commands::Interfaces { all, format } => {
            let entries: Vec<_> = host_discovery::list_interfaces()
                .into_iter()
                .filter(|e| all || (e.is_up && !e.is_loopback))
                .collect();
            match format {
                OutputFormat::Text => {
                    for line in output::interface_lines(&entries) { println!("{}", line); }
                }
                OutputFormat::Json => println!("{}", serde_json::to_string(&entries)?),
                OutputFormat::Jsonl => {
                    for e in &entries { println!("{}", serde_json::to_string(e)?); }
                }
            }
        }
        Commands::Scan { subnet, interface, all, out, csv, opts } => {
            let scan_cfg = loaded_cfg.as_ref().and_then(|c| c.scan.as_ref());
            let settings = ScanSettings::resolve(&opts, scan_cfg)?;
            let subnet = resolve_subnet(subnet, interface.as_deref())?;
            let rt = tokio::runtime::Runtime::new()?;

            let started = Instant::now();
            let started_at = now_rfc3339();
            let format = settings.format;
            let result = rt.block_on(async {
                let mut scanner = settings.scanner();
                let mut printer = None;
                if format == OutputFormat::Text {
                    let (tx, mut rx) = mpsc::channel(64);
                    scanner = scanner.progress(tx);
                    printer = Some(tokio::spawn(async move {
                        while let Some(p) = rx.recv().await {
                            eprintln!("progress: {}/{} ({:.1}%)", p.completed, p.total, p.percent());
                        }
                    }));
                }
                let result = scanner.scan(&subnet).await;
                drop(scanner);
                if let Some(h) = printer { let _ = h.await; }
                result
            })?;
            let duration_ms = started.elapsed().as_millis();
            let result = result.sorted();
            let report = ScanReport { result: &result, ports: &settings.port_set, started_at, ended_at: now_rfc3339(), duration_ms };

            if csv {
                if let Some(path) = &out {
                    output::write_csv(std::fs::File::create(path)?, &result)?;
                    return Ok(());
                }
            }
            let lines = match format {
                OutputFormat::Text => output::text_lines(&report, all),
                OutputFormat::Json => vec![serde_json::to_string(&output::json_summary(&report))?],
                OutputFormat::Jsonl => output::jsonl_lines(&result),
            };
            if let Some(path) = out {
                let file = OpenOptions::new().create(true).truncate(true).write(true).open(&path)?;
                let mut w = BufWriter::new(file);
                for line in &lines { writeln!(w, "{}", line)?; }
                w.flush()?;
            } else {
                for line in &lines { println!("{}", line); }
            }
        }
    }
    Ok(())
}
