//! Build-script synthesis.
//!
//! Each package gets its own `RUN` step so that configurations sharing a
//! package prefix reuse the engine's cached layers. Changing the last
//! package only rebuilds the last layer.

use std::fmt;

use linux_exec_common::config::Config;
use linux_exec_common::constants::{BASE_IMAGE, INSTALL_COMMAND, UPDATE_COMMAND};

/// A single instruction in a synthesized build script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildStep {
    /// `FROM <image>`.
    Base(String),
    /// Full system update.
    Update,
    /// Installation of one package.
    Install(String),
}

impl fmt::Display for BuildStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Base(image) => write!(f, "FROM {image}"),
            Self::Update => write!(f, "RUN {UPDATE_COMMAND}"),
            Self::Install(package) => write!(f, "RUN {INSTALL_COMMAND} {package}"),
        }
    }
}

/// Splits a package string into its non-empty tokens, in order.
pub fn package_tokens(packages: &str) -> impl Iterator<Item = &str> {
    packages.split_whitespace()
}

/// Returns the ordered build steps for a configuration.
#[must_use]
pub fn build_steps(config: &Config) -> Vec<BuildStep> {
    let mut steps = vec![BuildStep::Base(BASE_IMAGE.into()), BuildStep::Update];
    steps.extend(package_tokens(config.packages()).map(|p| BuildStep::Install(p.to_owned())));
    steps
}

/// Renders the build script for a configuration.
///
/// Never fails: an empty package list yields the base image plus the
/// update step.
#[must_use]
pub fn synthesize(config: &Config) -> String {
    let steps = build_steps(config);
    tracing::debug!(steps = steps.len(), image = %config.image_ref(), "synthesized build script");
    let mut script = steps
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");
    script.push('\n');
    script
}
