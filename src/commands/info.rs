// ABOUTME: Identity commands: info, uuid and ips.
// ABOUTME: Each opens the container, runs the needed resolve steps and prints the result.

use corral::config::Config;
use corral::connection::{OpenedContainer, config_store_for, open_container};
use corral::error::{Error, Result};
use corral::identity::IdentityResolver;
use corral::output::Output;
use corral::store::LxcConfigFile;
use corral::types::ContainerName;

fn open(
    config: &Config,
    container: &str,
    output: &Output,
) -> Result<(OpenedContainer, LxcConfigFile)> {
    let name: ContainerName = container.parse()?;
    output.progress(&format!("  → Opening container {name}..."));
    let opened = open_container(config, name.clone())?;
    output.progress(&format!("  → Using {}", opened.runtime_type()));
    let store = config_store_for(config, &name)?;
    Ok((opened, store))
}

/// Resolve every identity field and print it at `level`.
///
/// The identity is printed even when some steps failed; the command then
/// reports the partial result as an error.
pub fn info(config: &Config, container: &str, level: u32, output: &Output) -> Result<()> {
    let (opened, store) = open(config, container, output)?;
    let mut resolver = IdentityResolver::new(opened.handle(), &store);

    let complete = resolver.resolve_all();
    output.identity(resolver.identity(), level);

    if !complete {
        return Err(Error::Incomplete(container.to_string()));
    }
    Ok(())
}

/// Print the container's UUID, persisting a new one on first use.
pub fn uuid(config: &Config, container: &str, output: &Output) -> Result<()> {
    let (opened, store) = open(config, container, output)?;
    let mut resolver = IdentityResolver::new(opened.handle(), &store);

    if !resolver.resolve_uuid() {
        return Err(Error::Incomplete(container.to_string()));
    }
    output.value("uuid", resolver.uuid());
    Ok(())
}

/// Print every non-loopback address of the container.
pub fn ips(config: &Config, container: &str, output: &Output) -> Result<()> {
    let (opened, store) = open(config, container, output)?;
    let mut resolver = IdentityResolver::new(opened.handle(), &store);

    if !resolver.resolve_ip_address() {
        return Err(Error::Incomplete(container.to_string()));
    }
    if resolver.ip_addresses().is_empty() {
        output.warning(&format!("{container} has no IP addresses"));
    }
    output.addresses(resolver.ip_addresses());
    Ok(())
}
