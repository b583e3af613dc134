//! Multi-call dispatch.
//!
//! One executable is installed once and linked under many names. How it
//! was invoked decides what runs in the container:
//!
//! | invoked as | arguments | result |
//! |---|---|---|
//! | the binary itself | none | build the image |
//! | the binary itself | `cmd args...` | run `cmd args...` |
//! | symlink `<prefix>cmd` | `args...` | run `cmd args...` |
//! | symlink `name` | `args...` | run `name args...` |

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use clap::Parser;

use crate::cli::Cli;

/// What a single invocation asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Build the image, run nothing.
    Build,
    /// Run a command in the container.
    Run {
        /// Command name.
        command: String,
        /// Arguments passed to the command.
        args: Vec<String>,
    },
    /// Print the synthesized build script.
    PrintDockerfile,
    /// Print the resolved configuration.
    PrintConfig,
}

/// Resolves the in-container command from how the program was invoked.
///
/// `name` is the base name of the invoked path. A symlink whose name is
/// exactly the prefix is treated as not matching it, so the command is
/// never empty.
pub fn resolve_command(name: &str, is_symlink: bool, prefix: &str, args: Vec<String>) -> Dispatch {
    if !is_symlink {
        let mut args = args.into_iter();
        return match args.next() {
            None => Dispatch::Build,
            Some(command) => Dispatch::Run {
                command,
                args: args.collect(),
            },
        };
    }

    let command = match name.strip_prefix(prefix) {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => name,
    };
    Dispatch::Run {
        command: command.to_owned(),
        args,
    }
}

/// The raw facts about how this process was started.
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Path the program was invoked as, resolved on `PATH` when bare.
    pub program: PathBuf,
    /// Whether `program` is a symbolic link.
    pub is_symlink: bool,
    /// Arguments after the program name.
    pub args: Vec<String>,
}

impl Invocation {
    /// Captures the current process's invocation.
    pub fn from_env() -> Self {
        let mut argv = std::env::args_os();
        let argv0 = argv
            .next()
            .unwrap_or_else(|| OsString::from(linux_exec_common::constants::BIN_NAME));
        let args = argv.map(|a| a.to_string_lossy().into_owned()).collect();
        Self::from_parts(Path::new(&argv0), args)
    }

    /// Builds an invocation from an `argv[0]` and its arguments.
    ///
    /// A bare name (no path separator) is what the shell received from the
    /// user, so it is looked up on `PATH` before checking for a symlink.
    pub fn from_parts(argv0: &Path, args: Vec<String>) -> Self {
        let program = if argv0.components().count() > 1 {
            argv0.to_path_buf()
        } else {
            which::which(argv0).unwrap_or_else(|_| argv0.to_path_buf())
        };
        let is_symlink = std::fs::symlink_metadata(&program)
            .map(|m| m.file_type().is_symlink())
            .unwrap_or(false);
        tracing::debug!(program = %program.display(), is_symlink, "invocation detected");
        Self {
            program,
            is_symlink,
            args,
        }
    }

    /// Base name of the invoked path.
    pub fn name(&self) -> String {
        self.program
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Decides what to do. Direct invocations go through the CLI parser,
    /// which handles `--help` and `--version` itself.
    pub fn resolve(self, prefix: &str) -> Dispatch {
        let name = self.name();
        if self.is_symlink {
            return resolve_command(&name, true, prefix, self.args);
        }

        let cli = Cli::parse_from(std::iter::once(name.clone()).chain(self.args));
        if cli.print_dockerfile {
            Dispatch::PrintDockerfile
        } else if cli.print_config {
            Dispatch::PrintConfig
        } else {
            resolve_command(&name, false, prefix, cli.command)
        }
    }
}
