use lazy_static::lazy_static;
use regex::Regex;
use std::net::{IpAddr, Ipv6Addr};
use std::str::FromStr;

/// Parses `candidate` as an IPv4 or IPv6 address.
///
/// Accepts dotted-decimal IPv4 (no leading zeros in octets) and colon-hex
/// IPv6, including `::` compression and the embedded IPv4 tail
/// (`::ffff:10.0.0.1`). An IPv6 address may carry a zone suffix such as
/// `fe80::1%eth0`; the zone is checked and then dropped from the result.
pub fn parse_ip(candidate: &str) -> Option<IpAddr> {
    lazy_static! {
        static ref SCOPED: Regex = Regex::new(r"^([^%\s]+)%([^%/\s]+)$").expect("Not possible");
    }
    if let Ok(ip) = IpAddr::from_str(candidate) {
        return Some(ip);
    }
    let caps = SCOPED.captures(candidate)?;
    let addr = caps.get(1)?.as_str();
    Ipv6Addr::from_str(addr).ok().map(IpAddr::V6)
}

/// Returns true when `candidate` is a syntactically valid IP address.
pub fn is_valid_ip(candidate: &str) -> bool {
    parse_ip(candidate).is_some()
}
