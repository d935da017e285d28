use serde::{Deserialize, Serialize};
use std::fmt;

mod distance;
mod hex;
mod nearest;

pub use distance::{MAX_DISTANCE, distance};
pub use hex::{channels_to_hex, hex_to_rgb, is_valid_hex_color, normalize_hex, rgb_to_hex};
pub use nearest::{
    NearestColor, PARALLEL_THRESHOLD, find_nearest_colors, find_nearest_colors_with_threshold,
};

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&rgb_to_hex(*self))
    }
}
