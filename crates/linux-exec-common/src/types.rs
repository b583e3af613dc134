//! Image identity and reference types.
//!
//! An image tag is a pure function of the literal package string: two
//! configurations share an image exactly when their package strings are
//! byte-for-byte equal.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Content-derived tag identifying the image built for a package set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageTag(String);

impl ImageTag {
    /// Derives the tag for a package string.
    ///
    /// SHA-256 over the UTF-8 bytes, rendered as lowercase hex. The string is
    /// hashed as given, so `"git vim"` and `"vim git"` are distinct images.
    #[must_use]
    pub fn for_packages(packages: &str) -> Self {
        let digest = Sha256::digest(packages.as_bytes());
        Self(digest.iter().map(|byte| format!("{byte:02x}")).collect())
    }

    /// Returns the hex-encoded tag.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fully qualified `repository:tag` reference to an engine image.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageRef {
    /// Repository namespace.
    pub repository: String,
    /// Content-derived tag.
    pub tag: ImageTag,
}

impl ImageRef {
    /// Creates a reference from its parts.
    #[must_use]
    pub fn new(repository: impl Into<String>, tag: ImageTag) -> Self {
        Self {
            repository: repository.into(),
            tag,
        }
    }

    /// Returns whether an engine listing entry names this image.
    ///
    /// The entry must equal `repository:tag` exactly. Repositories may
    /// themselves contain `:` (a registry port), so the entry is not split.
    #[must_use]
    pub fn matches(&self, listed: &str) -> bool {
        listed
            .trim()
            .strip_suffix(self.tag.as_str())
            .and_then(|rest| rest.strip_suffix(':'))
            == Some(self.repository.as_str())
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.repository, self.tag)
    }
}
