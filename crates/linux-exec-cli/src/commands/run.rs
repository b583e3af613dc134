//! Run a command in a disposable container.

use std::process::ExitCode;

use linux_exec_common::config::Config;
use linux_exec_runtime::backend::EngineBackend;
use linux_exec_runtime::runner::CommandRunner;
use linux_exec_runtime::stdin::StdinMode;

/// Runs `command` with `args`, returning the container's exit status.
///
/// Non-terminal stdin is read completely once the image is present and
/// before the container starts.
///
/// # Errors
///
/// Returns an error if stdin cannot be read, the image cannot be ensured,
/// or the container cannot be started.
pub fn execute(
    engine: &impl EngineBackend,
    config: &Config,
    command: &str,
    args: &[String],
) -> anyhow::Result<ExitCode> {
    let code = CommandRunner::new(engine, config).run(command, args, StdinMode::detect)?;
    Ok(super::exit_code(code))
}
