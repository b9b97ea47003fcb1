//! Common payload and color fixtures.

/// Payloads that encode at every error-correction level.
pub mod payloads {
    pub const URL: &str = "https://example.com";
    pub const LONG_URL: &str =
        "https://example.com/products/qr-studio/downloads?campaign=spring&utm_source=poster";
    pub const NUMERIC: &str = "0123456789012345";
    pub const UNICODE: &str = "Café crème brûlée";
    pub const WIFI: &str = "WIFI:T:WPA;S:cafe-guest;P:espresso42;;";

    /// All of the above, for property-style loops.
    pub const ALL: [&str; 5] = [URL, LONG_URL, NUMERIC, UNICODE, WIFI];

    /// Longer than version 40 holds at any level in byte mode.
    pub fn too_long() -> String {
        "z".repeat(3000)
    }
}

/// Color specifications in the forms the UI sends.
pub mod colors {
    pub const PICKER_BLACK: &str = "#000000";
    pub const PICKER_WHITE: &str = "#ffffff";
    pub const RGBA_NAVY: &str = "rgba(0, 0, 128, 1)";
    pub const NAMED_MAROON: &str = "maroon";
    pub const INVALID: &str = "not-a-color";
}
