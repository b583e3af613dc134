//! # linux-exec
//!
//! Runs commands transparently inside disposable Linux containers whose
//! image is derived from a declared package set.
//!
//! Install once, then symlink it under many names: a link named `le-vim`
//! runs `vim` in the container, a link named `python3` runs `python3`.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

mod cli;
mod commands;
mod dispatch;

use std::process::ExitCode;

use linux_exec_common::config::Config;
use tracing_subscriber::EnvFilter;

use crate::dispatch::Invocation;

/// Log filter used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "warn";

fn main() -> ExitCode {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(code) => code,
        Err(e) => report_failure(&e),
    }
}

/// Prints a fatal error once on stderr. The log event stays below the
/// default filter so the message is not repeated.
fn report_failure(e: &anyhow::Error) -> ExitCode {
    tracing::debug!(error = ?e, "invocation failed");
    #[allow(clippy::print_stderr)]
    {
        eprintln!("Error: {e:#}");
    }
    ExitCode::FAILURE
}

fn run() -> anyhow::Result<ExitCode> {
    let config = Config::from_env()?;
    let invocation = Invocation::from_env();
    let dispatch = invocation.resolve(config.command_prefix());
    commands::execute(dispatch, &config)
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().expect("lock").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn failure_is_not_logged_under_default_filter() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(DEFAULT_LOG_FILTER))
            .with_writer(move || writer.clone())
            .finish();

        let err = anyhow::anyhow!("container engine query failed (docker): gone");
        let _ = tracing::subscriber::with_default(subscriber, || report_failure(&err));

        assert!(captured.0.lock().expect("lock").is_empty());
    }

    #[test]
    fn failure_is_logged_when_debugging() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("debug"))
            .with_writer(move || writer.clone())
            .finish();

        let err = anyhow::anyhow!("boom");
        let _ = tracing::subscriber::with_default(subscriber, || report_failure(&err));

        let logged = String::from_utf8_lossy(&captured.0.lock().expect("lock")).into_owned();
        assert!(logged.contains("invocation failed"));
    }
}
