// ABOUTME: Command module aggregator for the corral CLI.
// ABOUTME: Re-exports the identity and exec command handlers.

mod exec;
mod info;

pub use exec::exec_command;
pub use info::{info, ips, uuid};
