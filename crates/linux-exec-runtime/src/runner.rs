//! One-shot container execution.
//!
//! The command and its arguments are joined with single spaces and run as
//! `sh -c "<joined>"` inside the container. Argument boundaries are not
//! preserved: an argument containing whitespace or shell metacharacters is
//! reinterpreted by the container shell. Pipelines typed as one quoted
//! argument rely on this.

use std::path::Path;

use linux_exec_common::config::Config;
use linux_exec_common::constants::CONTAINER_SHELL;
use linux_exec_common::error::{LinuxExecError, Result};

use crate::backend::{EngineBackend, EngineInput};
use crate::registry::ImageRegistry;
use crate::stdin::StdinMode;

/// Composed engine invocation for one container run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    /// Engine arguments, excluding the engine executable itself.
    pub args: Vec<String>,
    /// Standard input handed to the engine.
    pub input: EngineInput,
}

impl RunRequest {
    /// Composes the `run` invocation for `command` and `args`.
    ///
    /// # Errors
    ///
    /// Returns `LinuxExecError::Config` if the working directory or a mount
    /// path is not valid UTF-8.
    pub fn compose(
        config: &Config,
        command: &str,
        args: &[String],
        stdin: StdinMode,
    ) -> Result<Self> {
        let cwd = utf8_path(config.working_directory())?;
        let mut engine_args: Vec<String> = vec![
            "run".into(),
            "-m".into(),
            config.memory_limit().to_owned(),
            "--rm".into(),
            "--init".into(),
            "-i".into(),
            "-v".into(),
            bind_spec(cwd),
            "-w".into(),
            cwd.to_owned(),
        ];

        for mount in config.mount_paths() {
            if mount.as_os_str().is_empty() {
                continue;
            }
            engine_args.push("-v".into());
            engine_args.push(bind_spec(utf8_path(mount)?));
        }

        let input = match stdin {
            StdinMode::Terminal => {
                engine_args.push("-t".into());
                EngineInput::Inherit
            }
            StdinMode::Buffered(bytes) => EngineInput::Bytes(bytes),
        };

        engine_args.push(config.image_ref().to_string());
        engine_args.push(CONTAINER_SHELL.into());
        engine_args.push("-c".into());
        engine_args.push(shell_command(command, args));

        Ok(Self {
            args: engine_args,
            input,
        })
    }
}

/// Joins a command and its arguments with single spaces.
#[must_use]
pub fn shell_command(command: &str, args: &[String]) -> String {
    std::iter::once(command)
        .chain(args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Host paths are passed to the engine verbatim, so they must be UTF-8.
fn utf8_path(path: &Path) -> Result<&str> {
    path.to_str().ok_or_else(|| LinuxExecError::Config {
        message: format!("path is not valid UTF-8: {}", path.display()),
    })
}

/// `<path>:<path>` bind specification mounting a host path at the same
/// location in the container.
fn bind_spec(path: &str) -> String {
    format!("{path}:{path}")
}

/// Runs commands in disposable containers for one configuration.
#[derive(Debug)]
pub struct CommandRunner<'a, B: EngineBackend + ?Sized> {
    backend: &'a B,
    config: &'a Config,
}

impl<'a, B: EngineBackend + ?Sized> CommandRunner<'a, B> {
    /// Creates a runner over `backend`.
    #[must_use]
    pub const fn new(backend: &'a B, config: &'a Config) -> Self {
        Self { backend, config }
    }

    /// Ensures the image exists, then runs `command` with `args` in a fresh
    /// container and returns the container's exit code.
    ///
    /// `stdin` is only called once the image is known to be present, so a
    /// failing engine never waits on the caller's input.
    ///
    /// # Errors
    ///
    /// Returns `LinuxExecError::EngineQuery` or `LinuxExecError::Build` if the
    /// image cannot be ensured, any error from `stdin`, and
    /// `LinuxExecError::Run` if the container process cannot be started.
    pub fn run<F>(&self, command: &str, args: &[String], stdin: F) -> Result<i32>
    where
        F: FnOnce() -> Result<StdinMode>,
    {
        let _ = ImageRegistry::new(self.backend, self.config).ensure_image()?;

        let request = RunRequest::compose(self.config, command, args, stdin()?)?;
        let image = self.config.image_ref().to_string();
        tracing::info!(
            image = %image,
            command = %command,
            tty = matches!(request.input, EngineInput::Inherit),
            "running container"
        );

        let code = self
            .backend
            .execute(&request.args, &request.input)
            .map_err(|e| LinuxExecError::Run {
                image,
                reason: e.to_string(),
            })?;
        tracing::debug!(exit_code = code, "container exited");
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::path::PathBuf;

    use super::*;
    use crate::backend::mock::MockEngine;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn compose_buffered_run_has_no_tty() {
        let config = Config::new("/home/u/proj").with_packages("git");
        let request = RunRequest::compose(
            &config,
            "ls",
            &args(&["-la"]),
            StdinMode::Buffered(b"input".to_vec()),
        )
        .expect("compose");
        let image = config.image_ref().to_string();
        assert_eq!(
            request.args,
            [
                "run",
                "-m",
                "1g",
                "--rm",
                "--init",
                "-i",
                "-v",
                "/home/u/proj:/home/u/proj",
                "-w",
                "/home/u/proj",
                image.as_str(),
                "sh",
                "-c",
                "ls -la",
            ]
        );
        assert_eq!(request.input, EngineInput::Bytes(b"input".to_vec()));
    }

    #[test]
    fn compose_terminal_run_allocates_tty_and_inherits_stdin() {
        let config = Config::new("/w");
        let request =
            RunRequest::compose(&config, "vim", &[], StdinMode::Terminal).expect("compose");
        assert!(request.args.contains(&"-t".to_string()));
        assert_eq!(request.input, EngineInput::Inherit);
        let tty = request.args.iter().position(|a| a == "-t").expect("-t");
        let image = request
            .args
            .iter()
            .position(|a| *a == config.image_ref().to_string())
            .expect("image");
        assert!(tty < image, "engine flags must precede the image");
    }

    #[test]
    fn compose_mounts_extra_paths_and_skips_empty_entries() {
        let config = Config::new("/w").with_mount_paths(vec![
            PathBuf::from("/data"),
            PathBuf::new(),
            PathBuf::from("/opt/cache"),
        ]);
        let request = RunRequest::compose(&config, "true", &[], StdinMode::Buffered(Vec::new()))
            .expect("compose");
        let mounts: Vec<&str> = request
            .args
            .windows(2)
            .filter(|w| w[0] == "-v")
            .map(|w| w[1].as_str())
            .collect();
        assert_eq!(mounts, ["/w:/w", "/data:/data", "/opt/cache:/opt/cache"]);
    }

    #[test]
    fn compose_applies_memory_limit() {
        let config = Config::new("/w").with_memory_limit("256m");
        let request = RunRequest::compose(&config, "true", &[], StdinMode::Buffered(Vec::new()))
            .expect("compose");
        let pos = request.args.iter().position(|a| a == "-m").expect("-m");
        assert_eq!(request.args[pos + 1], "256m");
    }

    #[test]
    fn shell_command_joins_with_single_spaces() {
        assert_eq!(shell_command("echo", &args(&["a b", "c"])), "echo a b c");
        assert_eq!(shell_command("ls", &[]), "ls");
        assert_eq!(
            shell_command("grep", &args(&["x", "|", "wc", "-l"])),
            "grep x | wc -l"
        );
    }

    #[test]
    fn run_builds_missing_image_before_running() {
        let config = Config::new("/w").with_packages("python");
        let engine = MockEngine {
            run_exit_code: 0,
            ..MockEngine::default()
        };
        let code = CommandRunner::new(&engine, &config)
            .run("python", &args(&["-V"]), || Ok(StdinMode::Buffered(Vec::new())))
            .expect("run");
        assert_eq!(code, 0);

        let subcommands: Vec<String> = engine
            .calls
            .borrow()
            .iter()
            .map(|c| c.args[0].clone())
            .collect();
        assert_eq!(subcommands, ["image", "build", "run"]);
        let run = &engine.calls_to("run")[0];
        assert_eq!(run.args.last().map(String::as_str), Some("python -V"));
    }

    #[test]
    fn run_returns_container_exit_code() {
        let config = Config::new("/w");
        let listed = config.image_ref().to_string();
        let engine = MockEngine {
            run_exit_code: 42,
            ..MockEngine::with_images(&[listed.as_str()])
        };
        let code = CommandRunner::new(&engine, &config)
            .run("false", &[], || Ok(StdinMode::Buffered(Vec::new())))
            .expect("run");
        assert_eq!(code, 42);
        assert!(engine.calls_to("build").is_empty());
    }

    #[test]
    fn run_forwards_buffered_stdin() {
        let config = Config::new("/w");
        let listed = config.image_ref().to_string();
        let engine = MockEngine::with_images(&[listed.as_str()]);
        let _ = CommandRunner::new(&engine, &config)
            .run("cat", &[], || Ok(StdinMode::Buffered(b"payload".to_vec())))
            .expect("run");
        let run = &engine.calls_to("run")[0];
        assert_eq!(run.input, Some(EngineInput::Bytes(b"payload".to_vec())));
        assert!(!run.args.contains(&"-t".to_string()));
    }

    #[test]
    fn run_aborts_before_container_when_build_fails() {
        let config = Config::new("/w");
        let engine = MockEngine {
            build_exit_code: 2,
            ..MockEngine::default()
        };
        let err = CommandRunner::new(&engine, &config)
            .run("ls", &[], || Ok(StdinMode::Buffered(Vec::new())))
            .expect_err("build failure is fatal");
        assert!(matches!(err, LinuxExecError::Build { .. }));
        assert!(engine.calls_to("run").is_empty());
    }

    #[test]
    fn run_does_not_read_stdin_when_listing_fails() {
        let config = Config::new("/w");
        let engine = MockEngine {
            list_exit_code: 1,
            ..MockEngine::default()
        };
        let stdin_read = Cell::new(false);
        let err = CommandRunner::new(&engine, &config)
            .run("cat", &[], || {
                stdin_read.set(true);
                Ok(StdinMode::Buffered(Vec::new()))
            })
            .expect_err("listing failure is fatal");
        assert!(matches!(err, LinuxExecError::EngineQuery { .. }));
        assert!(
            !stdin_read.get(),
            "stdin must not be touched before the image is ensured"
        );
        assert!(engine.calls_to("run").is_empty());
    }

    #[test]
    fn run_propagates_stdin_read_failure_without_starting_container() {
        let config = Config::new("/w");
        let listed = config.image_ref().to_string();
        let engine = MockEngine::with_images(&[listed.as_str()]);
        let err = CommandRunner::new(&engine, &config)
            .run("cat", &[], || {
                Err(LinuxExecError::Io {
                    path: "<stdin>".into(),
                    source: std::io::Error::other("closed"),
                })
            })
            .expect_err("stdin failure is fatal");
        assert!(matches!(err, LinuxExecError::Io { .. }));
        assert!(engine.calls_to("run").is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn compose_rejects_non_utf8_paths() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let bad = PathBuf::from(OsStr::from_bytes(b"/tmp/\xff"));
        let config = Config::new(bad.clone());
        let err = RunRequest::compose(&config, "ls", &[], StdinMode::Terminal)
            .expect_err("non-UTF-8 working directory");
        assert!(matches!(err, LinuxExecError::Config { .. }));

        let config = Config::new("/w").with_mount_paths(vec![bad]);
        let err = RunRequest::compose(&config, "ls", &[], StdinMode::Terminal)
            .expect_err("non-UTF-8 mount");
        assert!(matches!(err, LinuxExecError::Config { .. }));
    }

    #[test]
    fn run_reports_unreachable_engine_as_query_error() {
        let config = Config::new("/w");
        let engine = MockEngine {
            unreachable: true,
            ..MockEngine::default()
        };
        let err = CommandRunner::new(&engine, &config)
            .run("ls", &[], || Ok(StdinMode::Terminal))
            .expect_err("engine missing");
        assert!(matches!(err, LinuxExecError::EngineQuery { .. }));
    }
}
