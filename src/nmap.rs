use std::process::Stdio;
use std::time::Duration;

use serde::Serialize;
use tokio::process::Command;
use tokio::time;
use tracing::{info, warn};

use crate::errors::ScanError;

/// Default wall-clock ceiling for one scan, in seconds.
pub const DEFAULT_SCAN_TIMEOUT_SECS: u64 = 300;

const VERSION_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Run an assembled scan argv and return its XML stdout.
///
/// The first token is the program; the rest are passed as an argument vector
/// (never through a shell). The child is killed if the future is dropped, so
/// a timeout does not leave a stray nmap behind. Stderr is captured and kept
/// for diagnostics on failure rather than discarded.
pub async fn run_scan(argv: &[String], timeout: Duration) -> Result<String, ScanError> {
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| ScanError::InvalidTarget("empty command".to_string()))?;

    info!("running command: {}", argv.join(" "));

    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let output = match time::timeout(timeout, cmd.output()).await {
        Ok(res) => res?,
        Err(_) => {
            warn!("scan exceeded {}s ceiling, killing", timeout.as_secs());
            return Err(ScanError::Timeout {
                secs: timeout.as_secs(),
            });
        }
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(ScanError::ExecutionFailed {
            status: output
                .status
                .code()
                .map(|c| c.to_string())
                .unwrap_or_else(|| "signal".to_string()),
            stderr,
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Availability report for the external tool, served by `/api/nmap-info`.
#[derive(Debug, Clone, Serialize)]
pub struct NmapInfo {
    pub available: bool,
    pub version: String,
}

/// Probe the nmap binary with its version flag under a short timeout.
///
/// Any failure (missing binary, timeout, nonzero exit) reports unavailable;
/// the probe never errors.
pub async fn probe_nmap(nmap_path: &str) -> NmapInfo {
    let mut cmd = Command::new(nmap_path);
    cmd.arg("--version")
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .kill_on_drop(true);

    let output = match time::timeout(VERSION_PROBE_TIMEOUT, cmd.output()).await {
        Ok(Ok(out)) if out.status.success() => out,
        _ => {
            return NmapInfo {
                available: false,
                version: String::new(),
            }
        }
    };

    let stdout = String::from_utf8_lossy(&output.stdout);
    let version = stdout.lines().next().unwrap_or("").trim().to_string();
    NmapInfo {
        available: true,
        version,
    }
}
