//! Colours for particles, arcs and the shockwave ring.
//! Formatted as CSS colour strings for the canvas backend.

use serde::{Deserialize, Serialize};

/// An sRGB colour with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Alpha in [0, 1].
    #[serde(default = "opaque")]
    pub a: f32,
}

fn opaque() -> f32 {
    1.0
}

impl Rgba {
    /// Ambient particle tint.
    pub const PARTICLE: Rgba = Rgba::rgb(120, 160, 255);
    /// Lightning stroke.
    pub const ARC: Rgba = Rgba::rgba(180, 220, 255, 0.9);
    /// Lightning glow (#9fb8ff).
    pub const ARC_GLOW: Rgba = Rgba::rgb(0x9f, 0xb8, 0xff);
    /// Shockwave ring stroke.
    pub const RING: Rgba = Rgba::rgb(160, 200, 255);
    /// Shockwave glow (#aaccff).
    pub const RING_GLOW: Rgba = Rgba::rgb(0xaa, 0xcc, 0xff);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Rgba { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Rgba { r, g, b, a }
    }

    /// Same colour with a different alpha, clamped to [0, 1].
    pub fn with_alpha(self, a: f32) -> Self {
        Rgba { a: a.clamp(0.0, 1.0), ..self }
    }

    /// CSS `rgba(...)` string, as accepted by canvas fill/stroke styles.
    pub fn to_css(&self) -> String {
        format!("rgba({},{},{},{})", self.r, self.g, self.b, self.a)
    }
}
