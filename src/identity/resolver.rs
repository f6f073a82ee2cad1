// ABOUTME: IdentityResolver: populates a ContainerIdentity from a live handle and its config store.
// ABOUTME: Each resolve step is independent, reports success as bool and never unwinds.

use super::{ContainerIdentity, IdGenerator, UuidV4Generator, render};
use crate::logging::{LogLevel, LogSink, TracingSink};
use crate::runtime::{HostOps, NetworkInterface, NetworkOps, StateOps};
use crate::store::{ConfigStore, StoreError, keys};
use chrono::Utc;

/// Discovers and caches the identity of one container.
///
/// The resolver borrows the handle, so it cannot outlive the container
/// reference it was built from. Accessors only read the cache; the
/// `resolve_*` methods refresh it. A failed step leaves its fields at their
/// previous values.
pub struct IdentityResolver<'h, H, C, G = UuidV4Generator, L = TracingSink>
where
    H: ?Sized,
{
    handle: &'h H,
    store: C,
    ids: G,
    log: L,
    identity: ContainerIdentity,
}

impl<'h, H, C> IdentityResolver<'h, H, C>
where
    H: StateOps + NetworkOps + HostOps + ?Sized,
    C: ConfigStore,
{
    /// Resolver with random UUIDs and tracing output.
    pub fn new(handle: &'h H, store: C) -> Self {
        Self {
            handle,
            store,
            ids: UuidV4Generator,
            log: TracingSink,
            identity: ContainerIdentity::default(),
        }
    }
}

impl<'h, H, C, G, L> IdentityResolver<'h, H, C, G, L>
where
    H: StateOps + NetworkOps + HostOps + ?Sized,
    C: ConfigStore,
    G: IdGenerator,
    L: LogSink,
{
    /// Replace the identifier generator.
    pub fn with_id_generator<G2: IdGenerator>(
        self,
        ids: G2,
    ) -> IdentityResolver<'h, H, C, G2, L> {
        IdentityResolver {
            handle: self.handle,
            store: self.store,
            ids,
            log: self.log,
            identity: self.identity,
        }
    }

    /// Replace the diagnostic sink.
    pub fn with_log_sink<L2: LogSink>(self, log: L2) -> IdentityResolver<'h, H, C, G, L2> {
        IdentityResolver {
            handle: self.handle,
            store: self.store,
            ids: self.ids,
            log,
            identity: self.identity,
        }
    }

    pub fn handle(&self) -> &'h H {
        self.handle
    }

    pub fn store(&self) -> &C {
        &self.store
    }

    fn name(&self) -> &'h str {
        self.handle.name()
    }

    fn store_failure(&self, what: &str, err: &StoreError) {
        let level = if err.is_data_unavailable() {
            LogLevel::Warn
        } else {
            LogLevel::Error
        };
        self.log.log(level, &format!("{}: {what}: {err}", self.name()));
    }

    // =========================================================================
    // Resolution
    // =========================================================================

    /// Run every resolution step; true only if all of them succeeded.
    ///
    /// Steps do not short-circuit: a container without a network still gets
    /// its UUID and hostnames resolved. Interfaces are enumerated once and
    /// shared by the MAC and IP steps.
    pub fn resolve_all(&mut self) -> bool {
        let uuid = self.resolve_uuid();
        let interfaces = self.handle.interfaces();
        let mac = match &interfaces {
            Ok(list) => self.mac_from(list),
            Err(e) => {
                self.log.warn(&format!("{}: enumerating interfaces: {e}", self.name()));
                false
            }
        };
        let hostname = self.resolve_hostname();
        let parent = self.resolve_parent_hostname();
        let ips = match &interfaces {
            Ok(list) => self.ips_from(list),
            Err(_) => false,
        };
        let results = [uuid, mac, hostname, parent, ips, self.resolve_settings()];
        self.identity.resolved_at = Some(Utc::now());

        let ok = results.iter().all(|r| *r);
        if !ok {
            let failed = results.iter().filter(|r| !**r).count();
            self.log.warn(&format!(
                "{}: identity partially resolved ({failed} of {} steps failed)",
                self.name(),
                results.len()
            ));
        }
        ok
    }

    /// Load the UUID from the config store, generating and persisting one if absent.
    pub fn resolve_uuid(&mut self) -> bool {
        match self.store.get(keys::UUID) {
            Err(e) => {
                self.store_failure("reading uuid", &e);
                false
            }
            Ok(Some(existing)) if !existing.trim().is_empty() => {
                self.identity.uuid = existing.trim().to_string();
                true
            }
            Ok(_) => {
                let fresh = self.ids.generate();
                match self.store.set(keys::UUID, &fresh) {
                    Ok(()) => {
                        self.log.info(&format!("{}: assigned new uuid {fresh}", self.name()));
                        self.identity.uuid = fresh;
                        true
                    }
                    Err(e) => {
                        self.store_failure("persisting uuid", &e);
                        false
                    }
                }
            }
        }
    }

    /// Hardware address of the first non-loopback interface that has one.
    pub fn resolve_mac_address(&mut self) -> bool {
        match self.handle.interfaces() {
            Ok(interfaces) => self.mac_from(&interfaces),
            Err(e) => {
                self.log.warn(&format!("{}: enumerating interfaces: {e}", self.name()));
                false
            }
        }
    }

    fn mac_from(&mut self, interfaces: &[NetworkInterface]) -> bool {
        match interfaces
            .iter()
            .filter(|i| !i.is_loopback())
            .find_map(|i| i.mac_address.as_deref())
        {
            Some(mac) => {
                self.identity.mac_address = mac.to_string();
                true
            }
            None => {
                self.log.warn(&format!("{}: no network interface configured", self.name()));
                false
            }
        }
    }

    /// Hostname as reported by the container.
    pub fn resolve_hostname(&mut self) -> bool {
        match self.handle.hostname() {
            Ok(hostname) if !hostname.is_empty() => {
                self.identity.hostname = hostname;
                true
            }
            Ok(_) => {
                self.log.warn(&format!("{}: container reported an empty hostname", self.name()));
                false
            }
            Err(e) => {
                self.log.warn(&format!("{}: reading hostname: {e}", self.name()));
                false
            }
        }
    }

    /// Hostname of the host supervising the container.
    pub fn resolve_parent_hostname(&mut self) -> bool {
        match self.handle.parent_hostname() {
            Ok(hostname) if !hostname.is_empty() => {
                self.identity.parent_hostname = hostname;
                true
            }
            Ok(_) => {
                self.log.warn(&format!("{}: parent host has an empty hostname", self.name()));
                false
            }
            Err(e) => {
                self.log.warn(&format!("{}: reading parent hostname: {e}", self.name()));
                false
            }
        }
    }

    /// Every non-loopback address, in interface enumeration order.
    ///
    /// No addresses (network isolated, DHCP pending) is a success with an
    /// empty list.
    pub fn resolve_ip_address(&mut self) -> bool {
        match self.handle.interfaces() {
            Ok(interfaces) => self.ips_from(&interfaces),
            Err(e) => {
                self.log.warn(&format!("{}: enumerating addresses: {e}", self.name()));
                false
            }
        }
    }

    fn ips_from(&mut self, interfaces: &[NetworkInterface]) -> bool {
        let addresses: Vec<String> = interfaces
            .iter()
            .filter(|i| !i.is_loopback())
            .flat_map(|i| i.addresses.iter())
            .filter(|ip| !ip.is_loopback())
            .map(ToString::to_string)
            .collect();

        if addresses.is_empty() {
            self.log.info(&format!("{}: no IP addresses assigned yet", self.name()));
        }
        self.identity.ip_addresses = addresses;
        true
    }

    /// Connection URL, port and options from the config store.
    ///
    /// Missing keys resolve to empty strings. A store failure leaves all
    /// three fields untouched.
    pub fn resolve_settings(&mut self) -> bool {
        let read = |key: &str| self.store.get(key).map(Option::unwrap_or_default);

        let settings = read(keys::CONNECTION_URL).and_then(|url| {
            let port = read(keys::CONNECTION_PORT)?;
            let options = read(keys::CONNECTION_OPTIONS)?;
            Ok((url, port, options))
        });

        match settings {
            Ok((url, port, options)) => {
                self.identity.connection_url = url;
                self.identity.connection_port = port;
                self.identity.connection_options = options;
                true
            }
            Err(e) => {
                self.store_failure("reading connection settings", &e);
                false
            }
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn identity(&self) -> &ContainerIdentity {
        &self.identity
    }

    pub fn uuid(&self) -> &str {
        &self.identity.uuid
    }

    pub fn hostname(&self) -> &str {
        &self.identity.hostname
    }

    pub fn parent_hostname(&self) -> &str {
        &self.identity.parent_hostname
    }

    pub fn mac_address(&self) -> &str {
        &self.identity.mac_address
    }

    pub fn ip_addresses(&self) -> &[String] {
        &self.identity.ip_addresses
    }

    pub fn connection_url(&self) -> &str {
        &self.identity.connection_url
    }

    pub fn connection_port(&self) -> &str {
        &self.identity.connection_port
    }

    pub fn connection_options(&self) -> &str {
        &self.identity.connection_options
    }

    /// Render the cached identity; see [`render`].
    pub fn to_string_at(&self, level: u32) -> String {
        render(&self.identity, level)
    }
}
