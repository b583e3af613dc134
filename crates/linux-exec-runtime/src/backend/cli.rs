//! Engine backend that shells out to a Docker-compatible CLI.

use std::io::Write;
use std::process::{Command, ExitStatus, Stdio};

use super::{EngineBackend, EngineInput, EngineOutput};

/// Backend invoking an engine executable such as `docker` or `podman`.
#[derive(Debug, Clone)]
pub struct CliEngine {
    program: String,
}

impl CliEngine {
    /// Creates a backend for the given executable name or path.
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl EngineBackend for CliEngine {
    fn program(&self) -> &str {
        &self.program
    }

    fn is_available(&self) -> bool {
        which::which(&self.program).is_ok()
    }

    fn capture(&self, args: &[String]) -> std::io::Result<EngineOutput> {
        tracing::debug!(engine = %self.program, ?args, "querying engine");
        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .output()?;
        Ok(EngineOutput {
            exit_code: exit_code(output.status),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn execute(&self, args: &[String], input: &EngineInput) -> std::io::Result<i32> {
        tracing::debug!(engine = %self.program, ?args, "executing engine");
        let mut command = Command::new(&self.program);
        let _ = command.args(args);

        match input {
            EngineInput::Inherit => {
                let status = command.stdin(Stdio::inherit()).status()?;
                Ok(exit_code(status))
            }
            EngineInput::Bytes(bytes) => {
                let mut child = command.stdin(Stdio::piped()).spawn()?;
                if let Some(mut stdin) = child.stdin.take() {
                    match stdin.write_all(bytes) {
                        // The child may exit without draining its input.
                        Err(e) if e.kind() == std::io::ErrorKind::BrokenPipe => {
                            tracing::debug!("engine closed stdin early");
                        }
                        other => other?,
                    }
                }
                Ok(exit_code(child.wait()?))
            }
        }
    }
}

/// Maps an exit status to a shell-style code (`128 + signal` when killed).
fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}
