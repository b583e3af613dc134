//! # linux-exec-common
//!
//! Shared configuration, image identity, error definitions, and constants
//! used across the linux-exec workspace.
//!
//! This crate is the leaf of the dependency graph. It depends on no other
//! internal crate.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
