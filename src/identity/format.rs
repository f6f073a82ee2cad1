// ABOUTME: Leveled, human-readable rendering of a ContainerIdentity.
// ABOUTME: Level 0 is one identity line; higher levels add connection and timing lines.

use super::ContainerIdentity;

const UNSET: &str = "-";

fn or_unset(value: &str) -> &str {
    if value.is_empty() { UNSET } else { value }
}

/// Render `identity` at the requested verbosity.
///
/// - 0: `uuid=.. hostname=.. parent=.. mac=.. ip=a,b`
/// - 1: plus one `connection.*=` line per non-empty connection parameter
/// - 2: plus `resolved_at=` when known
pub fn render(identity: &ContainerIdentity, level: u32) -> String {
    let ips = if identity.ip_addresses.is_empty() {
        UNSET.to_string()
    } else {
        identity.ip_addresses.join(",")
    };

    let mut out = format!(
        "uuid={} hostname={} parent={} mac={} ip={}",
        or_unset(&identity.uuid),
        or_unset(&identity.hostname),
        or_unset(&identity.parent_hostname),
        or_unset(&identity.mac_address),
        ips,
    );

    if level >= 1 {
        let connection = [
            ("url", &identity.connection_url),
            ("port", &identity.connection_port),
            ("options", &identity.connection_options),
        ];
        for (key, value) in connection {
            if !value.is_empty() {
                out.push_str(&format!("\nconnection.{key}={value}"));
            }
        }
    }

    if level >= 2
        && let Some(at) = identity.resolved_at
    {
        out.push_str(&format!("\nresolved_at={}", at.to_rfc3339()));
    }

    out
}
