// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "corral")]
#[command(about = "Container identity discovery and in-container command execution")]
#[command(version)]
pub struct Cli {
    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Agent configuration file (overrides discovery)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Emit results as JSON
    #[arg(long, global = true, conflicts_with = "quiet")]
    pub json: bool,

    /// Print results only
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve and print a container's identity
    Info {
        /// Container name
        container: String,

        /// Detail level: 0 identity only, 1 adds connection settings, 2 adds timing
        #[arg(short, long, default_value_t = 1)]
        level: u32,
    },

    /// Print a container's UUID, assigning one if it has none
    Uuid {
        /// Container name
        container: String,
    },

    /// List a container's IP addresses
    Ips {
        /// Container name
        container: String,
    },

    /// Run a program inside a container
    Exec {
        /// Container name
        container: String,

        /// Program to run
        program: String,

        /// Arguments passed to the program unchanged
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}
