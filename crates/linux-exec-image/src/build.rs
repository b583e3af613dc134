//! Image build requests.
//!
//! The build script is handed to the engine on stdin (`-` as the context),
//! so nothing is written to disk.

use linux_exec_common::config::Config;
use linux_exec_common::constants::PACKAGES_LABEL;
use linux_exec_common::types::ImageRef;

use crate::dockerfile;

/// Everything the engine needs to build and tag one image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    /// Image produced by the build.
    pub image: ImageRef,
    /// Memory limit applied to build containers.
    pub memory_limit: String,
    /// `key=value` label recording the literal package string.
    pub label: String,
    /// Build script fed to the engine's stdin.
    pub script: String,
}

impl BuildRequest {
    /// Prepares the build for a configuration.
    #[must_use]
    pub fn for_config(config: &Config) -> Self {
        Self {
            image: config.image_ref(),
            memory_limit: config.memory_limit().to_owned(),
            label: format!("{PACKAGES_LABEL}={}", config.packages()),
            script: dockerfile::synthesize(config),
        }
    }

    /// Engine arguments, excluding the engine executable itself.
    #[must_use]
    pub fn args(&self) -> Vec<String> {
        vec![
            "build".into(),
            "-m".into(),
            self.memory_limit.clone(),
            "--label".into(),
            self.label.clone(),
            "-t".into(),
            self.image.to_string(),
            "-".into(),
        ]
    }
}
