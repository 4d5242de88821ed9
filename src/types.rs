use serde::{Deserialize, Serialize};

/// One open port on a discovered host.
///
/// `port` is kept as a string, verbatim from the scanner's `portid`
/// attribute. `state` is always `"open"`; closed and filtered ports are
/// dropped during normalization.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PortRecord {
    pub port: String,
    pub protocol: String,
    pub service: String,
    pub version: String,
    pub state: String,
}

/// Normalized per-host scan result as served to the UI.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HostRecord {
    pub ip: String,
    pub status: String,
    pub os: String,
    pub mac: String,
    pub ports: Vec<PortRecord>,
    pub latency: String,
    pub port_count: usize,
}
