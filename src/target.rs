use std::sync::OnceLock;

use regex::Regex;

/// Dotted-quad shape: four digit groups of 1-3 digits.
///
/// Deliberately does NOT check octet numeric range (so `999.999.999.999`
/// validates). The browser UI that consumes this service was written against
/// that behavior, so we keep it rather than silently tightening.
const IPV4_SHAPE: &str = r"\d{1,3}(\.\d{1,3}){3}";

fn single_ip_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(&format!(r"^{IPV4_SHAPE}$")).expect("valid regex"))
}

fn cidr_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(r"^{IPV4_SHAPE}/(\d|[12]\d|3[0-2])$")).expect("valid regex")
    })
}

fn range_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(&format!(r"^{IPV4_SHAPE}-{IPV4_SHAPE}$")).expect("valid regex"))
}

/// Validate a scan target string.
///
/// Accepted forms, and nothing else:
/// - single IPv4 address: `192.168.1.10`
/// - CIDR block: `192.168.1.0/24` (prefix 0-32)
/// - comma-separated address list: `10.0.0.1,10.0.0.2`
/// - hyphenated address range: `10.0.0.1-10.0.0.50` (both sides full addresses)
///
/// Hostnames and IPv6 are rejected.
pub fn is_valid_target(target: &str) -> bool {
    let target = target.trim();
    if target.is_empty() {
        return false;
    }

    if single_ip_re().is_match(target)
        || cidr_re().is_match(target)
        || range_re().is_match(target)
    {
        return true;
    }

    // Comma list: every member must be a plain address. The UI sends both
    // "a,b" and "a, b" forms.
    if target.contains(',') {
        return target
            .split(',')
            .all(|part| single_ip_re().is_match(part.trim()));
    }

    false
}
