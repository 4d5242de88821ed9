use nmap_web_rs::command::{build_command, ScanMode};
use nmap_web_rs::parser::parse_nmap_xml;

const FIXTURE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<nmaprun scanner="nmap" args="nmap -F -sV -O 192.168.1.0/24 -oX -" version="7.94">
  <host starttime="1" endtime="2">
    <status state="up" reason="arp-response"/>
    <address addr="192.168.1.1" addrtype="ipv4"/>
    <address addr="00:11:22:33:44:55" addrtype="mac" vendor="Acme"/>
    <hostnames><hostname name="router.lan" type="PTR"/></hostnames>
    <ports>
      <port protocol="tcp" portid="53">
        <state state="open" reason="syn-ack"/>
        <service name="domain" product="dnsmasq" version="2.90" method="probed"/>
      </port>
      <port protocol="tcp" portid="80">
        <state state="open" reason="syn-ack"/>
        <service name="http" method="table"/>
      </port>
      <port protocol="tcp" portid="443">
        <state state="filtered" reason="no-response"/>
      </port>
    </ports>
    <os>
      <osmatch name="Linux 4.15 - 5.8" accuracy="96"/>
      <osmatch name="Linux 5.0 - 5.4" accuracy="95"/>
    </os>
    <uptime seconds="86400" lastboot="yesterday"/>
  </host>
  <host>
    <status state="down" reason="no-response"/>
  </host>
</nmaprun>"#;

#[test]
fn fixture_normalizes_to_one_host() {
    let hosts = parse_nmap_xml(FIXTURE);
    // The second host has no IPv4 address and is dropped.
    assert_eq!(hosts.len(), 1);

    let h = &hosts[0];
    assert_eq!(h.ip, "192.168.1.1");
    assert_eq!(h.status, "up");
    assert_eq!(h.os, "Linux 4.15 - 5.8");
    assert_eq!(h.mac, "00:11:22:33:44:55");
    assert_eq!(h.latency, "86.40s");

    // Only the two open ports survive; the filtered one is dropped.
    assert_eq!(h.ports.len(), 2);
    assert_eq!(h.port_count, 2);
    assert_eq!(h.ports[0].port, "53");
    assert_eq!(h.ports[0].service, "domain");
    assert_eq!(h.ports[0].version, "2.90");
    assert_eq!(h.ports[1].port, "80");
    assert_eq!(h.ports[1].service, "http");
    assert_eq!(h.ports[1].version, "");
    assert!(h.ports.iter().all(|p| p.state == "open"));
}

#[test]
fn malformed_input_yields_empty_list() {
    assert!(parse_nmap_xml("<nmaprun><host><address").is_empty());
    assert!(parse_nmap_xml("plain text, no xml").is_empty());
}

#[test]
fn normalization_is_independent_of_scan_mode() {
    // Build a command per mode, pretend each produced the same XML, and
    // check the normalized host set never varies: mode only changes the
    // flags sent to nmap, not the parsing.
    let baseline = parse_nmap_xml(FIXTURE);
    for scan_type in ["fast", "standard", "version", "os", "aggressive"] {
        let mode = ScanMode::from_request(scan_type);
        let cmd = build_command("192.168.1.0/24", mode, "", true).expect("valid target");
        assert!(cmd.contains(&"192.168.1.0/24".to_string()));
        let hosts = parse_nmap_xml(FIXTURE);
        assert_eq!(hosts, baseline, "scan_type {scan_type}");
    }
}
