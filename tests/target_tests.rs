use nmap_web_rs::target::is_valid_target;

#[test]
fn all_four_target_forms_accepted() {
    // single IP
    assert!(is_valid_target("192.168.1.1"));
    // CIDR
    assert!(is_valid_target("192.168.1.0/24"));
    // comma list
    assert!(is_valid_target("192.168.1.1,192.168.1.2"));
    // hyphen range
    assert!(is_valid_target("192.168.1.1-192.168.1.254"));
}

#[test]
fn non_matching_shapes_rejected() {
    assert!(!is_valid_target(""));
    assert!(!is_valid_target("localhost"));
    assert!(!is_valid_target("scanme.nmap.org"));
    assert!(!is_valid_target("2001:db8::1"));
    assert!(!is_valid_target("192.168.1"));
    assert!(!is_valid_target("192.168.1.0/64"));
    assert!(!is_valid_target("192.168.1.1 192.168.1.2"));
}

#[test]
fn comma_list_rejects_non_address_members() {
    assert!(!is_valid_target("192.168.1.1,example.com"));
    assert!(!is_valid_target("192.168.1.1,"));
}
