//! Container lifecycle for linux-exec: engine access, image presence, and
//! one-shot container runs.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod backend;
pub mod registry;
pub mod runner;
pub mod stdin;
