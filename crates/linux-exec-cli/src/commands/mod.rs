//! Handlers for each dispatched action.

pub mod build;
pub mod inspect;
pub mod run;

use std::process::ExitCode;

use linux_exec_common::config::Config;
use linux_exec_runtime::backend::CliEngine;

use crate::dispatch::Dispatch;

/// Executes a dispatched action against the configured engine.
///
/// # Errors
///
/// Returns an error if the engine query, build, or container start fails.
pub fn execute(dispatch: Dispatch, config: &Config) -> anyhow::Result<ExitCode> {
    let engine = CliEngine::new(config.engine_command());
    match dispatch {
        Dispatch::Build => build::execute(&engine, config),
        Dispatch::Run { command, args } => run::execute(&engine, config, &command, &args),
        Dispatch::PrintDockerfile => inspect::print_dockerfile(config),
        Dispatch::PrintConfig => inspect::print_config(config),
    }
}

/// Maps a container exit code onto this process's exit status.
pub fn exit_code(code: i32) -> ExitCode {
    ExitCode::from(status_byte(code))
}

/// Truncates an exit code to its low byte, as a shell reports it.
fn status_byte(code: i32) -> u8 {
    u8::try_from(code & 0xff).unwrap_or(1)
}
