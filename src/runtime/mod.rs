// ABOUTME: Container runtime backends behind the ContainerHandle capability traits.
// ABOUTME: LXC via lxc-* tools, Docker and Podman via bollard, plus socket detection.

mod bollard;
mod detection;
mod error;
mod lxc;
pub mod parse;
pub mod traits;
mod types;

pub use self::bollard::BollardContainer;
pub use detection::{DetectionError, resolve_socket, socket_path_for};
pub use error::{RuntimeError, RuntimeErrorKind};
pub use lxc::{DEFAULT_LXC_PATH, LXC_STORE_FILE, LxcContainer};
pub use traits::*;
pub use types::{RuntimeInfo, RuntimeType};
