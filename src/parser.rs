use serde::Deserialize;
use tracing::{debug, warn};

use crate::types::{HostRecord, PortRecord};

// Partial model of the nmap XML run report. Only the elements and attributes
// the normalizer reads are declared; quick-xml skips the rest.

#[derive(Debug, Deserialize)]
struct NmapRun {
    #[serde(rename = "host", default)]
    hosts: Vec<XmlHost>,
}

#[derive(Debug, Deserialize)]
struct XmlHost {
    #[serde(rename = "address", default)]
    addresses: Vec<XmlAddress>,
    status: Option<XmlStatus>,
    ports: Option<XmlPorts>,
    os: Option<XmlOs>,
    uptime: Option<XmlUptime>,
}

#[derive(Debug, Deserialize)]
struct XmlAddress {
    #[serde(rename = "@addr")]
    addr: String,
    #[serde(rename = "@addrtype")]
    addrtype: String,
}

#[derive(Debug, Deserialize)]
struct XmlStatus {
    #[serde(rename = "@state")]
    state: String,
}

#[derive(Debug, Deserialize)]
struct XmlPorts {
    #[serde(rename = "port", default)]
    ports: Vec<XmlPort>,
}

#[derive(Debug, Deserialize)]
struct XmlPort {
    #[serde(rename = "@portid")]
    portid: String,
    #[serde(rename = "@protocol", default)]
    protocol: String,
    state: Option<XmlPortState>,
    service: Option<XmlService>,
}

#[derive(Debug, Deserialize)]
struct XmlPortState {
    #[serde(rename = "@state")]
    state: String,
}

#[derive(Debug, Deserialize)]
struct XmlService {
    #[serde(rename = "@name")]
    name: Option<String>,
    #[serde(rename = "@version")]
    version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct XmlOs {
    #[serde(rename = "osmatch", default)]
    matches: Vec<XmlOsMatch>,
}

#[derive(Debug, Deserialize)]
struct XmlOsMatch {
    #[serde(rename = "@name")]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct XmlUptime {
    #[serde(rename = "@seconds")]
    seconds: Option<String>,
}

/// Normalize nmap's XML run report into a flat host list.
///
/// Never fails: malformed XML yields an empty list and a warning in the log.
/// The caller cannot distinguish "no hosts up" from "parse failed" by the
/// return value alone; that matches the wire contract the UI was built on.
pub fn parse_nmap_xml(xml: &str) -> Vec<HostRecord> {
    let run: NmapRun = match quick_xml::de::from_str(xml) {
        Ok(run) => run,
        Err(e) => {
            warn!("failed to parse nmap XML output: {e}");
            return Vec::new();
        }
    };

    let mut hosts = Vec::new();
    for host in run.hosts {
        // A host without an IPv4 address is not reportable to the UI.
        let Some(ip) = host
            .addresses
            .iter()
            .find(|a| a.addrtype == "ipv4")
            .map(|a| a.addr.clone())
        else {
            continue;
        };
        debug!("found host: {ip}");

        let status = host
            .status
            .map(|s| s.state)
            .unwrap_or_else(|| "unknown".to_string());

        let mut ports = Vec::new();
        for port in host.ports.into_iter().flat_map(|p| p.ports) {
            let state = port
                .state
                .map(|s| s.state)
                .unwrap_or_else(|| "unknown".to_string());
            // Filtered and closed ports are dropped, not reported.
            if state != "open" {
                continue;
            }
            let (service, version) = match port.service {
                Some(s) => (
                    s.name.unwrap_or_else(|| "unknown".to_string()),
                    s.version.unwrap_or_default(),
                ),
                None => ("unknown".to_string(), String::new()),
            };
            debug!("open port {}/{}: {service}", port.portid, port.protocol);
            ports.push(PortRecord {
                port: port.portid,
                protocol: port.protocol,
                service,
                version,
                state,
            });
        }

        let os = host
            .os
            .and_then(|o| o.matches.into_iter().next())
            .and_then(|m| m.name)
            .unwrap_or_else(|| "Unknown".to_string());

        let mac = host
            .addresses
            .iter()
            .find(|a| a.addrtype == "mac")
            .map(|a| a.addr.clone())
            .unwrap_or_else(|| "N/A".to_string());

        // NOTE: nmap's uptime attribute is in seconds, but this divides by
        // 1000 as if it were milliseconds. The UI's display format was built
        // against this output, so the behavior is kept as-is.
        let latency = host
            .uptime
            .and_then(|u| u.seconds)
            .and_then(|s| s.parse::<i64>().ok())
            .map(|secs| format!("{:.2}s", secs as f64 / 1000.0))
            .unwrap_or_else(|| "0ms".to_string());

        let port_count = ports.len();
        hosts.push(HostRecord {
            ip,
            status,
            os,
            mac,
            ports,
            latency,
            port_count,
        });
    }

    hosts
}
