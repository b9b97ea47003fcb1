//! QR code rendering with custom colors and an optional centered logo.
//!
//! The pipeline for one request:
//! - Encode the payload into a QR symbol (`symbol`)
//! - Rasterize modules with the chosen foreground/background colors
//! - Fit and alpha-composite a logo over the center (`logo`)
//! - Encode the result as PNG for display or download (`png`)

pub mod logo;
pub mod options;
pub mod output;
pub mod png;
pub mod renderer;
pub mod request;
pub mod symbol;

pub use logo::Logo;
pub use options::RenderOptions;
pub use output::{LogoPlacement, OutputImage};
pub use renderer::Renderer;
pub use request::GenerationRequest;
pub use symbol::QrSymbol;

pub use qr_common::{Color, ErrorCorrection, QrError, QrResult};
