//! Image presence checks and the ensure-or-build policy.
//!
//! Presence is queried from the engine on every call and never cached.
//! Two concurrent invocations may both see the image missing and both build
//! it; the build is reproducible and the engine's tagging is idempotent, so
//! the second build converges on the same image.

use linux_exec_common::config::Config;
use linux_exec_common::constants::IMAGE_LIST_FORMAT;
use linux_exec_common::error::{LinuxExecError, Result};
use linux_exec_image::build::BuildRequest;

use crate::backend::{EngineBackend, EngineInput};

/// Outcome of [`ImageRegistry::ensure_image`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnsureOutcome {
    /// The image was already listed by the engine.
    Present,
    /// The image was missing and has been built.
    Built,
}

/// View of the engine's image store for one configuration.
#[derive(Debug)]
pub struct ImageRegistry<'a, B: EngineBackend + ?Sized> {
    backend: &'a B,
    config: &'a Config,
}

impl<'a, B: EngineBackend + ?Sized> ImageRegistry<'a, B> {
    /// Creates a registry view over `backend`.
    #[must_use]
    pub const fn new(backend: &'a B, config: &'a Config) -> Self {
        Self { backend, config }
    }

    /// Lists every image known to the engine as `repository:tag`.
    ///
    /// # Errors
    ///
    /// Returns `LinuxExecError::EngineQuery` if the engine executable cannot
    /// be found or spawned, or exits non-zero.
    pub fn list_images(&self) -> Result<Vec<String>> {
        let args: Vec<String> = ["image", "ls", "--format", IMAGE_LIST_FORMAT]
            .into_iter()
            .map(String::from)
            .collect();
        if !self.backend.is_available() {
            return Err(LinuxExecError::EngineQuery {
                engine: self.backend.program().to_owned(),
                reason: "engine not found on PATH".into(),
            });
        }
        let output = self
            .backend
            .capture(&args)
            .map_err(|e| LinuxExecError::EngineQuery {
                engine: self.backend.program().to_owned(),
                reason: e.to_string(),
            })?;
        if !output.success() {
            return Err(LinuxExecError::EngineQuery {
                engine: self.backend.program().to_owned(),
                reason: format!(
                    "image listing exited with status {}: {}",
                    output.exit_code,
                    output.stderr.trim()
                ),
            });
        }
        Ok(output
            .stdout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(String::from)
            .collect())
    }

    /// Returns whether the configured image is present in the engine.
    ///
    /// # Errors
    ///
    /// Propagates [`Self::list_images`] failures.
    pub fn is_present(&self) -> Result<bool> {
        let image = self.config.image_ref();
        Ok(self.list_images()?.iter().any(|listed| image.matches(listed)))
    }

    /// Builds the configured image unconditionally.
    ///
    /// # Errors
    ///
    /// Returns `LinuxExecError::Build` if the engine cannot be spawned or the
    /// build exits non-zero.
    pub fn build_image(&self) -> Result<()> {
        let request = BuildRequest::for_config(self.config);
        let image = request.image.to_string();
        tracing::info!(image = %image, packages = %self.config.packages(), "building image");

        let input = EngineInput::Bytes(request.script.clone().into_bytes());
        let code = self
            .backend
            .execute(&request.args(), &input)
            .map_err(|e| LinuxExecError::Build {
                image: image.clone(),
                reason: e.to_string(),
            })?;
        if code != 0 {
            return Err(LinuxExecError::Build {
                image,
                reason: format!("engine build exited with status {code}"),
            });
        }
        tracing::info!(image = %image, "image built");
        Ok(())
    }

    /// Builds the configured image if the engine does not list it.
    ///
    /// # Errors
    ///
    /// Returns `LinuxExecError::EngineQuery` if the listing fails, or
    /// `LinuxExecError::Build` if a required build fails.
    pub fn ensure_image(&self) -> Result<EnsureOutcome> {
        if self.is_present()? {
            tracing::debug!(image = %self.config.image_ref(), "image present");
            return Ok(EnsureOutcome::Present);
        }
        #[allow(clippy::print_stderr)]
        {
            eprintln!("Required image is missing. Building...");
        }
        self.build_image()?;
        Ok(EnsureOutcome::Built)
    }
}
