//! Caller standard-input handling.
//!
//! A terminal on stdin gets a pseudo-terminal in the container. Anything
//! else is read to the end before the container starts and forwarded as a
//! single buffer: there is no streaming.

use std::io::{IsTerminal, Read};

use linux_exec_common::error::{LinuxExecError, Result};

/// How the caller's standard input reaches the container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StdinMode {
    /// Interactive terminal: allocate a TTY, forward nothing up front.
    Terminal,
    /// Redirected input, fully materialized.
    Buffered(Vec<u8>),
}

impl StdinMode {
    /// Inspects the process's standard input, reading it fully unless it is
    /// a terminal.
    ///
    /// # Errors
    ///
    /// Returns `LinuxExecError::Io` if reading stdin fails.
    pub fn detect() -> Result<Self> {
        let stdin = std::io::stdin();
        if stdin.is_terminal() {
            return Ok(Self::Terminal);
        }
        Self::read_from(stdin.lock())
    }

    /// Reads `reader` to the end into a buffered mode.
    ///
    /// # Errors
    ///
    /// Returns `LinuxExecError::Io` if reading fails.
    pub fn read_from(mut reader: impl Read) -> Result<Self> {
        let mut buffer = Vec::new();
        let _ = reader
            .read_to_end(&mut buffer)
            .map_err(|e| LinuxExecError::Io {
                path: "<stdin>".into(),
                source: e,
            })?;
        tracing::debug!(bytes = buffer.len(), "buffered stdin");
        Ok(Self::Buffered(buffer))
    }

    /// Returns whether a pseudo-terminal should be allocated.
    #[must_use]
    pub const fn allocates_tty(&self) -> bool {
        matches!(self, Self::Terminal)
    }
}
