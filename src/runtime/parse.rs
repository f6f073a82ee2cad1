// ABOUTME: Parsers for `ip -o link show` and `ip -o addr show` output.
// ABOUTME: Turns one-line-per-record iproute2 listings into NetworkInterface values.

use super::traits::NetworkInterface;
use crate::types::MacAddress;
use std::net::IpAddr;

/// Parse `ip -o link show` into interfaces, in listing order.
///
/// All-zero hardware addresses (loopback, tunnels) are reported as `None`.
pub fn parse_ip_link(output: &str) -> Result<Vec<NetworkInterface>, String> {
    let mut interfaces = Vec::new();

    for line in output.lines().filter(|l| !l.trim().is_empty()) {
        let mut fields = line.splitn(3, ':');
        let index = fields.next().unwrap_or_default().trim();
        if index.parse::<u32>().is_err() {
            return Err(format!("missing interface index: {line}"));
        }
        let name = fields
            .next()
            .map(interface_name)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| format!("missing interface name: {line}"))?;
        let rest = fields.next().unwrap_or_default();

        let mut iface = NetworkInterface::new(name);
        let tokens: Vec<&str> = rest.split_whitespace().collect();
        if let Some(pos) = tokens.iter().position(|t| t.starts_with("link/"))
            && let Some(raw) = tokens.get(pos + 1)
            && let Ok(mac) = MacAddress::parse(raw)
            && !mac.is_zero()
        {
            iface.mac_address = Some(mac.to_string());
        }
        interfaces.push(iface);
    }

    Ok(interfaces)
}

/// Parse `ip -o addr show` into `(interface, address)` pairs, in listing order.
///
/// Only global-scope addresses are returned; loopback (`scope host`) and
/// link-local (`scope link`) entries are skipped.
pub fn parse_ip_addr(output: &str) -> Result<Vec<(String, IpAddr)>, String> {
    let mut addresses = Vec::new();

    for line in output.lines().filter(|l| !l.trim().is_empty()) {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 4 {
            return Err(format!("short address record: {line}"));
        }
        if !matches!(tokens[2], "inet" | "inet6") {
            continue;
        }

        let scope = tokens
            .iter()
            .position(|t| *t == "scope")
            .and_then(|pos| tokens.get(pos + 1))
            .copied()
            .unwrap_or("global");
        if scope != "global" {
            continue;
        }

        let cidr = tokens[3];
        let addr = cidr.split('/').next().unwrap_or(cidr);
        let ip: IpAddr = addr
            .parse()
            .map_err(|_| format!("invalid address '{addr}' in: {line}"))?;
        addresses.push((interface_name(tokens[1]), ip));
    }

    Ok(addresses)
}

/// Attach addresses to their interfaces, keeping both listing orders.
///
/// Addresses on an interface missing from the link listing create a new
/// interface at the end.
pub fn merge_addresses(
    mut interfaces: Vec<NetworkInterface>,
    addresses: Vec<(String, IpAddr)>,
) -> Vec<NetworkInterface> {
    for (name, ip) in addresses {
        match interfaces.iter_mut().find(|i| i.name == name) {
            Some(iface) => iface.addresses.push(ip),
            None => {
                let mut iface = NetworkInterface::new(name);
                iface.addresses.push(ip);
                interfaces.push(iface);
            }
        }
    }
    interfaces
}

/// Strip the `@ifN` peer suffix and trailing colon from an interface name.
fn interface_name(raw: &str) -> String {
    let raw = raw.trim().trim_end_matches(':');
    raw.split('@').next().unwrap_or(raw).to_string()
}
