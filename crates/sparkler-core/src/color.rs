use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// 8-bit RGBA color. Laid out so a renderer can upload particle colors as-is.
#[repr(C)]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Pod, Zeroable, Serialize, Deserialize,
)]
#[serde(from = "[u8; 4]", into = "[u8; 4]")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);
    pub const SPARKLE: Rgba = Rgba::new(255, 230, 150, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Random opaque color with every channel in `100..=255`.
    pub fn random_bright(rng: &mut fastrand::Rng) -> Self {
        Self::new(rng.u8(100..=255), rng.u8(100..=255), rng.u8(100..=255), 255)
    }
}

impl From<[u8; 4]> for Rgba {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }
}

impl From<Rgba> for [u8; 4] {
    fn from(c: Rgba) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}
