// ABOUTME: Exec command implementation.
// ABOUTME: Runs a program inside a container and relays its output and exit status.

use corral::config::Config;
use corral::connection::open_container;
use corral::error::Result;
use corral::executor::{CommandExecutor, RunError};
use corral::output::Output;
use corral::types::ContainerName;

/// Run `program` with `args` in `container`.
///
/// Output is relayed before the exit status is checked, so a failing
/// program's streams still reach the caller.
pub fn exec_command(
    config: &Config,
    container: &str,
    program: &str,
    args: &[String],
    output: &Output,
) -> Result<()> {
    let name: ContainerName = container.parse()?;
    output.progress(&format!("  → Opening container {name}..."));
    let opened = open_container(config, name)?;
    output.progress(&format!("  → Using {}", opened.runtime_type()));

    output.progress(&format!("  → Running {program}..."));
    let executor = CommandExecutor::new(opened.handle());
    let result = executor.run_program_output(program, args)?;
    output.program(&result);

    if result.exit_code != 0 {
        return Err(RunError::NonZeroExit {
            program: program.to_string(),
            exit_code: result.exit_code,
            stdout: result.stdout,
            stderr: result.stderr,
        }
        .into());
    }
    Ok(())
}
