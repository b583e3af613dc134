//! `linux-exec` with no arguments: build the image.

use std::process::ExitCode;

use linux_exec_common::config::Config;
use linux_exec_runtime::backend::EngineBackend;
use linux_exec_runtime::registry::ImageRegistry;

/// Builds the configured image unconditionally.
///
/// The engine's layer cache makes rebuilding an existing image cheap.
///
/// # Errors
///
/// Returns an error if the build fails.
pub fn execute(engine: &impl EngineBackend, config: &Config) -> anyhow::Result<ExitCode> {
    tracing::info!(image = %config.image_ref(), "build-only invocation");
    ImageRegistry::new(engine, config).build_image()?;
    Ok(ExitCode::SUCCESS)
}
