//! `--print-dockerfile` and `--print-config`.

use std::io::Write;
use std::process::ExitCode;

use linux_exec_common::config::Config;
use linux_exec_image::dockerfile;

/// Writes the synthesized build script to stdout.
///
/// # Errors
///
/// Returns an error if stdout cannot be written.
pub fn print_dockerfile(config: &Config) -> anyhow::Result<ExitCode> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(dockerfile::synthesize(config).as_bytes())?;
    Ok(ExitCode::SUCCESS)
}

/// Writes the resolved configuration as pretty JSON to stdout.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn print_config(config: &Config) -> anyhow::Result<ExitCode> {
    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, config)?;
    writeln!(stdout)?;
    Ok(ExitCode::SUCCESS)
}
