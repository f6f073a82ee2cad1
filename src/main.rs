// ABOUTME: Entry point for the corral CLI application.
// ABOUTME: Parses arguments and dispatches to appropriate command handlers.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use corral::config::Config;
use corral::error::{Error, Result};
use corral::executor::{RunError, RunErrorKind};
use corral::output::{Output, OutputMode};
use std::env;
use tracing_subscriber::EnvFilter;

/// Exit status when the container or its runtime cannot be reached.
const EXIT_UNREACHABLE: i32 = 125;
/// Exit status when the requested program does not exist in the container.
const EXIT_PROGRAM_NOT_FOUND: i32 = 127;

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mode = if cli.json {
        OutputMode::Json
    } else if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };
    let output = Output::new(mode);

    if let Err(e) = run(cli, &output) {
        let code = exit_code_for(&e);
        // A failing program has already relayed its own stderr.
        if !matches!(e, Error::Run(RunError::NonZeroExit { .. })) {
            output.error(&e.to_string());
        }
        std::process::exit(code);
    }
}

fn exit_code_for(e: &Error) -> i32 {
    match e {
        Error::Run(run) => match run.kind() {
            RunErrorKind::Unreachable => EXIT_UNREACHABLE,
            RunErrorKind::ProgramNotFound => EXIT_PROGRAM_NOT_FOUND,
            RunErrorKind::NonZeroExit => run
                .exit_code()
                .and_then(|c| i32::try_from(c).ok())
                .filter(|c| (1..=255).contains(c))
                .unwrap_or(1),
        },
        Error::Runtime(_) => EXIT_UNREACHABLE,
        _ => 1,
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => Config::load(path),
        None => {
            let cwd = env::current_dir()?;
            Config::discover(&cwd)
        }
    }
}

fn run(cli: Cli, output: &Output) -> Result<()> {
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Info { container, level } => commands::info(&config, &container, level, output),
        Commands::Uuid { container } => commands::uuid(&config, &container, output),
        Commands::Ips { container } => commands::ips(&config, &container, output),
        Commands::Exec {
            container,
            program,
            args,
        } => commands::exec_command(&config, &container, &program, &args, output),
    }
}
