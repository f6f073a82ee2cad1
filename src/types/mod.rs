// ABOUTME: Validated domain types shared by the runtime backends and the CLI.
// ABOUTME: Container names and hardware addresses.

mod container_name;
mod mac_address;

pub use container_name::{ContainerName, ContainerNameError};
pub use mac_address::{MacAddress, MacAddressError};
