// ABOUTME: CommandExecutor: runs a program with arguments inside a container and captures its output.
// ABOUTME: Distinguishes unreachable containers, missing programs and non-zero exits from success.

use crate::logging::{LogSink, TracingSink};
use crate::runtime::{ContainerState, ExecError, ExecOps, ExecRequest, StateError, StateOps};
use serde::Serialize;

/// Exit status shells and OCI runtimes use for "command not found".
const EXIT_NOT_FOUND: i64 = 127;

/// Captured result of a completed program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgramOutput {
    pub exit_code: i64,
    /// Standard output with trailing newlines removed.
    pub stdout: String,
    /// Standard error, captured separately and left as-is.
    pub stderr: String,
}

/// Why `run_program` did not produce output.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("container not found: {0}")]
    ContainerNotFound(String),

    #[error("container {container} is not running (state: {state})")]
    NotRunning {
        container: String,
        state: ContainerState,
    },

    #[error("program not found in container: {0}")]
    ProgramNotFound(String),

    #[error("{program} exited with status {exit_code}: {stderr}")]
    NonZeroExit {
        program: String,
        exit_code: i64,
        stdout: String,
        stderr: String,
    },

    #[error("exec failed: {0}")]
    Runtime(String),
}

/// Coarse failure category for callers that only branch on the kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunErrorKind {
    /// Container missing, stopped or its runtime unreachable.
    Unreachable,
    /// The program does not exist inside the container.
    ProgramNotFound,
    /// The program ran and exited non-zero.
    NonZeroExit,
}

impl RunError {
    pub fn kind(&self) -> RunErrorKind {
        match self {
            RunError::ContainerNotFound(_)
            | RunError::NotRunning { .. }
            | RunError::Runtime(_) => RunErrorKind::Unreachable,
            RunError::ProgramNotFound(_) => RunErrorKind::ProgramNotFound,
            RunError::NonZeroExit { .. } => RunErrorKind::NonZeroExit,
        }
    }

    /// Process exit status, when the program ran at all.
    pub fn exit_code(&self) -> Option<i64> {
        match self {
            RunError::NonZeroExit { exit_code, .. } => Some(*exit_code),
            _ => None,
        }
    }
}

impl From<StateError> for RunError {
    fn from(e: StateError) -> Self {
        match e {
            StateError::ContainerNotFound(name) => RunError::ContainerNotFound(name),
            StateError::Runtime(msg) => RunError::Runtime(msg),
        }
    }
}

/// Strip trailing `\n` and `\r\n` sequences; other whitespace is kept.
pub fn normalize_output(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw)
        .trim_end_matches(['\n', '\r'])
        .to_string()
}

/// Runs programs inside one container.
///
/// Calls block until the program exits; there is no built-in timeout.
pub struct CommandExecutor<'h, H: ?Sized, L = TracingSink> {
    handle: &'h H,
    log: L,
}

impl<'h, H> CommandExecutor<'h, H>
where
    H: StateOps + ExecOps + ?Sized,
{
    pub fn new(handle: &'h H) -> Self {
        Self {
            handle,
            log: TracingSink,
        }
    }
}

impl<'h, H, L> CommandExecutor<'h, H, L>
where
    H: StateOps + ExecOps + ?Sized,
    L: LogSink,
{
    pub fn with_log_sink<L2: LogSink>(self, log: L2) -> CommandExecutor<'h, H, L2> {
        CommandExecutor {
            handle: self.handle,
            log,
        }
    }

    /// Run `program` with `params` and return its normalised stdout.
    ///
    /// A non-zero exit is an error carrying both streams.
    pub fn run_program<S: AsRef<str>>(
        &self,
        program: &str,
        params: &[S],
    ) -> Result<String, RunError> {
        let output = self.run_program_output(program, params)?;
        if output.exit_code != 0 {
            self.log.warn(&format!(
                "{}: {program} exited with status {}",
                self.handle.name(),
                output.exit_code
            ));
            return Err(RunError::NonZeroExit {
                program: program.to_string(),
                exit_code: output.exit_code,
                stdout: output.stdout,
                stderr: output.stderr,
            });
        }
        Ok(output.stdout)
    }

    /// Run `program` with `params` and return the full result, whatever the exit status.
    pub fn run_program_output<S: AsRef<str>>(
        &self,
        program: &str,
        params: &[S],
    ) -> Result<ProgramOutput, RunError> {
        let name = self.handle.name();

        let state = self.handle.state().inspect_err(|e| {
            self.log.error(&format!("{name}: cannot reach container: {e}"));
        })?;
        if state != ContainerState::Running {
            self.log.error(&format!("{name}: cannot run {program}, container is {state}"));
            return Err(RunError::NotRunning {
                container: name.to_string(),
                state,
            });
        }

        let request = ExecRequest::new(program, params.iter().map(|p| p.as_ref()));
        self.log.info(&format!("{name}: running {:?}", request.argv()));

        let output = self.handle.exec(&request).map_err(|e| {
            self.log.error(&format!("{name}: {program}: {e}"));
            match e {
                ExecError::ContainerNotFound(c) => RunError::ContainerNotFound(c),
                ExecError::ContainerNotRunning(c) => RunError::NotRunning {
                    container: c,
                    state: ContainerState::Unknown,
                },
                ExecError::ProgramNotFound(p) => RunError::ProgramNotFound(p),
                ExecError::Failed(msg) | ExecError::Runtime(msg) => RunError::Runtime(msg),
            }
        })?;

        if output.exit_code == EXIT_NOT_FOUND {
            self.log.error(&format!("{name}: {program} not found in container"));
            return Err(RunError::ProgramNotFound(program.to_string()));
        }

        Ok(ProgramOutput {
            exit_code: output.exit_code,
            stdout: normalize_output(&output.stdout),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
