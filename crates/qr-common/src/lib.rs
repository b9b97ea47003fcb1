//! Common types shared across the qr-studio crates and services.

pub mod color;
pub mod error;
pub mod level;

pub use color::Color;
pub use error::{QrError, QrResult};
pub use level::ErrorCorrection;
