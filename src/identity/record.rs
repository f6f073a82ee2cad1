// ABOUTME: The identity record cached for one container.
// ABOUTME: Every field is optional in spirit: empty means "not resolved".

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Identity and connection parameters of a container.
///
/// Empty strings and an empty address list are the "unset" values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContainerIdentity {
    pub uuid: String,
    pub hostname: String,
    pub parent_hostname: String,
    pub mac_address: String,
    /// Addresses in interface enumeration order.
    pub ip_addresses: Vec<String>,
    pub connection_url: String,
    pub connection_port: String,
    pub connection_options: String,
    /// When `resolve_all` last ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_at: Option<DateTime<Utc>>,
}

impl ContainerIdentity {
    /// True when at least one connection parameter has been resolved.
    pub fn has_connection(&self) -> bool {
        !(self.connection_url.is_empty()
            && self.connection_port.is_empty()
            && self.connection_options.is_empty())
    }
}

impl fmt::Display for ContainerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&super::render(self, 0))
    }
}
