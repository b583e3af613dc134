//! Argument parsing for direct (non-symlink) invocations.
//!
//! Symlink invocations never reach this parser: every argument belongs to
//! the in-container command.

use clap::Parser;

/// linux-exec — run commands in a disposable container built from
/// `LE_PACKAGES`.
///
/// Without a command, (re)builds the image.
#[derive(Parser, Debug)]
#[command(name = "linux-exec", version, about, long_about = None)]
pub struct Cli {
    /// Print the synthesized build script and exit.
    #[arg(long, conflicts_with = "print_config")]
    pub print_dockerfile: bool,

    /// Print the resolved configuration as JSON and exit.
    #[arg(long)]
    pub print_config: bool,

    /// Command to run inside the container, followed by its arguments.
    #[arg(trailing_var_arg = true, value_name = "COMMAND")]
    pub command: Vec<String>,
}
