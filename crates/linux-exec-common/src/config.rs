//! Invocation configuration resolved from defaults and environment overrides.
//!
//! A [`Config`] is built once at startup and never mutated afterwards. The
//! image tag is derived from the package string at construction time.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::constants::{
    DEFAULT_COMMAND_PREFIX, DEFAULT_ENGINE_COMMAND, DEFAULT_IMAGE_REPOSITORY,
    DEFAULT_MEMORY_LIMIT, ENV_ENGINE_COMMAND, ENV_MEMORY, ENV_MOUNTS, ENV_PACKAGES, ENV_PREFIX,
    ENV_REPOSITORY, ENV_WORKING_DIRECTORY, MOUNT_SEPARATOR,
};
use crate::error::{LinuxExecError, Result};
use crate::types::{ImageRef, ImageTag};

/// Immutable configuration for a single invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    command_prefix: String,
    memory_limit: String,
    engine_command: String,
    packages: String,
    mount_paths: Vec<PathBuf>,
    working_directory: PathBuf,
    image_repository: String,
    image_tag: ImageTag,
}

impl Config {
    /// Creates a configuration with default values rooted at `working_directory`.
    #[must_use]
    pub fn new(working_directory: impl Into<PathBuf>) -> Self {
        Self {
            command_prefix: DEFAULT_COMMAND_PREFIX.into(),
            memory_limit: DEFAULT_MEMORY_LIMIT.into(),
            engine_command: DEFAULT_ENGINE_COMMAND.into(),
            packages: String::new(),
            mount_paths: Vec::new(),
            working_directory: working_directory.into(),
            image_repository: DEFAULT_IMAGE_REPOSITORY.into(),
            image_tag: ImageTag::for_packages(""),
        }
    }

    /// Resolves the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `LinuxExecError::Config` if `LE_CWD` is unset and the current
    /// directory cannot be determined.
    pub fn from_env() -> Result<Self> {
        let lookup = |key: &str| std::env::var(key).ok();
        let cwd = match lookup(ENV_WORKING_DIRECTORY) {
            Some(dir) => PathBuf::from(dir),
            None => std::env::current_dir().map_err(|e| LinuxExecError::Config {
                message: format!("cannot determine current directory: {e}"),
            })?,
        };
        Ok(Self::from_lookup(lookup, cwd))
    }

    /// Resolves the configuration through an arbitrary variable lookup.
    ///
    /// `default_cwd` is used when `LE_CWD` is not set.
    #[must_use]
    pub fn from_lookup<F>(lookup: F, default_cwd: impl Into<PathBuf>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new(default_cwd);
        if let Some(prefix) = lookup(ENV_PREFIX) {
            config.command_prefix = prefix;
        }
        if let Some(memory) = lookup(ENV_MEMORY) {
            config.memory_limit = memory;
        }
        if let Some(engine) = lookup(ENV_ENGINE_COMMAND) {
            config.engine_command = engine;
        }
        if let Some(dir) = lookup(ENV_WORKING_DIRECTORY) {
            config.working_directory = PathBuf::from(dir);
        }
        if let Some(repo) = lookup(ENV_REPOSITORY) {
            config.image_repository = repo;
        }
        if let Some(mounts) = lookup(ENV_MOUNTS) {
            config.mount_paths = mounts.split(MOUNT_SEPARATOR).map(PathBuf::from).collect();
        }
        let config = config.with_packages(lookup(ENV_PACKAGES).unwrap_or_default());
        tracing::debug!(
            image = %config.image_ref(),
            packages = %config.packages,
            "configuration resolved"
        );
        config
    }

    /// Replaces the package list and recomputes the image tag.
    #[must_use]
    pub fn with_packages(mut self, packages: impl Into<String>) -> Self {
        self.packages = packages.into();
        self.image_tag = ImageTag::for_packages(&self.packages);
        self
    }

    /// Replaces the symlink command prefix.
    #[must_use]
    pub fn with_command_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.command_prefix = prefix.into();
        self
    }

    /// Replaces the memory limit.
    #[must_use]
    pub fn with_memory_limit(mut self, limit: impl Into<String>) -> Self {
        self.memory_limit = limit.into();
        self
    }

    /// Replaces the engine executable.
    #[must_use]
    pub fn with_engine_command(mut self, engine: impl Into<String>) -> Self {
        self.engine_command = engine.into();
        self
    }

    /// Replaces the extra bind mounts.
    #[must_use]
    pub fn with_mount_paths(mut self, mounts: Vec<PathBuf>) -> Self {
        self.mount_paths = mounts;
        self
    }

    /// Replaces the image repository namespace.
    #[must_use]
    pub fn with_image_repository(mut self, repository: impl Into<String>) -> Self {
        self.image_repository = repository.into();
        self
    }

    /// Prefix stripped from symlink names.
    #[must_use]
    pub fn command_prefix(&self) -> &str {
        &self.command_prefix
    }

    /// Memory limit, passed verbatim to the engine.
    #[must_use]
    pub fn memory_limit(&self) -> &str {
        &self.memory_limit
    }

    /// Engine executable name or path.
    #[must_use]
    pub fn engine_command(&self) -> &str {
        &self.engine_command
    }

    /// Literal package string.
    #[must_use]
    pub fn packages(&self) -> &str {
        &self.packages
    }

    /// Extra bind mounts, possibly containing empty entries.
    #[must_use]
    pub fn mount_paths(&self) -> &[PathBuf] {
        &self.mount_paths
    }

    /// Directory mounted and used as the container working directory.
    #[must_use]
    pub fn working_directory(&self) -> &Path {
        &self.working_directory
    }

    /// Repository namespace for built images.
    #[must_use]
    pub fn image_repository(&self) -> &str {
        &self.image_repository
    }

    /// Tag derived from the package string.
    #[must_use]
    pub const fn image_tag(&self) -> &ImageTag {
        &self.image_tag
    }

    /// `repository:tag` of the image this configuration runs in.
    #[must_use]
    pub fn image_ref(&self) -> ImageRef {
        ImageRef::new(self.image_repository.clone(), self.image_tag.clone())
    }
}
