//! Container engine abstraction.
//!
//! Everything linux-exec asks of the engine goes through [`EngineBackend`],
//! so the registry and runner can be driven by a recording double in tests.

pub mod cli;

pub use cli::CliEngine;

/// Captured result of a short engine query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineOutput {
    /// Exit code of the engine process.
    pub exit_code: i32,
    /// Standard output, lossily decoded.
    pub stdout: String,
    /// Standard error, lossily decoded.
    pub stderr: String,
}

impl EngineOutput {
    /// Returns whether the engine exited successfully.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Where an engine process reads its standard input from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineInput {
    /// Share the caller's standard input (terminal sessions).
    Inherit,
    /// Feed the given bytes, then close the stream.
    Bytes(Vec<u8>),
}

/// A container engine reachable through its command-line interface.
pub trait EngineBackend {
    /// Name or path of the engine executable.
    fn program(&self) -> &str;

    /// Returns whether the engine executable can be found.
    fn is_available(&self) -> bool;

    /// Runs the engine with null stdin and captures its output.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine process cannot be spawned.
    fn capture(&self, args: &[String]) -> std::io::Result<EngineOutput>;

    /// Runs the engine with stdout and stderr attached to the caller,
    /// returning its exit code.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine process cannot be spawned or waited on.
    fn execute(&self, args: &[String], input: &EngineInput) -> std::io::Result<i32>;
}
