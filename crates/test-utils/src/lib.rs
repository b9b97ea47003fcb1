//! Shared test utilities for the qr-studio workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Temporary directory helpers
//! - Synthetic logo pixel generators
//! - Common payload and color fixtures
//!
//! Generators return raw RGBA buffers so this crate stays independent of the
//! image stack; tests encode them with `qr_renderer::png` when they need
//! upload bytes.
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```

pub mod fixtures;
pub mod generators;
pub mod paths;

pub use fixtures::*;
pub use generators::*;
pub use paths::*;
