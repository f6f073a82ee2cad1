// ABOUTME: Library root for corral - exposes public types for testing.
// ABOUTME: The main binary is in main.rs.

pub mod config;
pub mod connection;
pub mod error;
pub mod executor;
pub mod identity;
pub mod logging;
pub mod output;
pub mod runtime;
pub mod store;
pub mod types;
