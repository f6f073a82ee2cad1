// ABOUTME: Composable capability traits for a running container handle.
// ABOUTME: Defines StateOps, NetworkOps, HostOps, ExecOps and the ContainerHandle bundle.

mod exec;
mod host;
mod network;
mod shared_types;
mod state;

pub use exec::{ExecError, ExecOps};
pub use host::{HostError, HostOps};
pub use network::{NetworkError, NetworkOps};
pub use shared_types::*;
pub use state::{StateError, StateOps};

/// Everything the identity resolver and command executor need from a container.
///
/// Automatically implemented for any type implementing all capability traits.
pub trait ContainerHandle: StateOps + NetworkOps + HostOps + ExecOps {}

impl<T> ContainerHandle for T where T: StateOps + NetworkOps + HostOps + ExecOps {}
