//! # linux-exec-image
//!
//! Image construction for linux-exec.
//!
//! Handles:
//! - **Dockerfile**: Layered build scripts, one cacheable step per package.
//! - **Build**: The engine request that turns a script into a tagged image.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod build;
pub mod dockerfile;
