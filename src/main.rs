use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use nmap_web_rs::{nmap, server};

/// nmap-web-rs — Thin async HTTP front end for nmap with a tiny embedded web UI.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "nmap-web-rs",
    version,
    about = "Thin async HTTP front end for nmap with a tiny embedded web UI.",
    long_about = None
)]
struct Cli {
    /// Address to bind the HTTP server to.
    #[arg(long, default_value = "127.0.0.1:8080")]
    bind: String,

    /// Directory with the static UI files.
    #[arg(long, default_value = "ui")]
    ui: PathBuf,

    /// Wall-clock ceiling for a single scan, in seconds.
    #[arg(long = "timeout-secs", default_value_t = nmap::DEFAULT_SCAN_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Path to the nmap binary.
    #[arg(long = "nmap-path", default_value = "nmap")]
    nmap_path: String,

    /// Run nmap without the sudo prefix (OS detection needs privileges).
    #[arg(long = "no-sudo", default_value_t = false)]
    no_sudo: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("nmap-web-rs configuration:");
    info!("  bind         : {}", cli.bind);
    info!("  ui           : {}", cli.ui.display());
    info!("  timeout_secs : {}", cli.timeout_secs);
    info!("  nmap_path    : {}", cli.nmap_path);
    info!("  sudo         : {}", !cli.no_sudo);
    info!("Scan only networks you own or have explicit permission to scan.");

    let probe = nmap::probe_nmap(&cli.nmap_path).await;
    if probe.available {
        info!("nmap detected: {}", probe.version);
    } else {
        warn!(
            "nmap not found at {:?}; /api/scan will fail until it is installed",
            cli.nmap_path
        );
    }

    let state = server::AppState::new(
        cli.nmap_path,
        !cli.no_sudo,
        Duration::from_secs(cli.timeout_secs),
        cli.ui,
    );
    let router = server::build_router(state);

    // Fail fast on bind errors; an external supervisor owns retries.
    server::serve(&cli.bind, router).await
}
