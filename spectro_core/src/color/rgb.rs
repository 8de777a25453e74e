//! 8-bit RGB value type and its `#rrggbb` codec.
//!
//! Every color the engine produces is an [`Rgb`]. Hex strings are only a
//! rendering of it, so callers can compare colors exactly and format them
//! lazily. Parsing comes in two flavours: [`Rgb::parse_hex`] reports what was
//! wrong with the input, while [`hex_to_rgb`] treats anything malformed as
//! black so an interactive surface never has to handle a failure.

use std::fmt;
use std::str::FromStr;

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Opaque sRGB color with one byte per channel.
#[repr(C)]
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Pod, Zeroable,
)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[must_use]
    #[inline]
    pub fn into_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Lowercase, zero-padded `#rrggbb`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Strict hex parser: six hex digits, optionally prefixed by a single `#`.
    pub fn parse_hex(hex: &str) -> Result<Self, ColorParseError> {
        use ColorParseError::*;

        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.is_empty() {
            return Err(Empty);
        }

        let bytes = digits.as_bytes();
        if bytes.len() != 6 {
            return Err(InvalidLength);
        }

        let nibble = |c: u8| -> Result<u8, ColorParseError> {
            match c {
                b'0'..=b'9' => Ok(c - b'0'),
                b'a'..=b'f' => Ok(c - b'a' + 10),
                b'A'..=b'F' => Ok(c - b'A' + 10),
                _ => Err(InvalidHex),
            }
        };
        let byte = |hi: u8, lo: u8| -> Result<u8, ColorParseError> {
            Ok(nibble(hi)? << 4 | nibble(lo)?)
        };

        Ok(Self {
            r: byte(bytes[0], bytes[1])?,
            g: byte(bytes[2], bytes[3])?,
            b: byte(bytes[4], bytes[5])?,
        })
    }

    /// Per-channel `255 - v` inversion.
    #[must_use]
    #[inline]
    pub fn complement(self) -> Self {
        Self {
            r: 255 - self.r,
            g: 255 - self.g,
            b: 255 - self.b,
        }
    }

    // Linear interpolation in sRGB space, t clamped to [0, 1].
    #[must_use]
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
        let lerp8 = |a: u8, b: u8| -> u8 {
            let a = a as f64;
            let b = b as f64;
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        };

        Rgb {
            r: lerp8(self.r, other.r),
            g: lerp8(self.g, other.g),
            b: lerp8(self.b, other.b),
        }
    }

    /// Unweighted per-channel mean, rounded to the nearest integer.
    ///
    /// Returns `None` for an empty slice.
    pub fn mean(colors: &[Rgb]) -> Option<Rgb> {
        if colors.is_empty() {
            return None;
        }

        let (r, g, b) = colors.iter().fold((0u32, 0u32, 0u32), |(r, g, b), c| {
            (r + c.r as u32, g + c.g as u32, b + c.b as u32)
        });
        let count = colors.len() as f64;
        let channel = |sum: u32| (sum as f64 / count).round().min(255.0) as u8;

        Some(Rgb::new(channel(r), channel(g), channel(b)))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(rgb: [u8; 3]) -> Self {
        Rgb::new(rgb[0], rgb[1], rgb[2])
    }
}

impl From<(u8, u8, u8)> for Rgb {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Rgb::new(r, g, b)
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rgb::parse_hex(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorParseError {
    Empty,
    InvalidLength,
    InvalidHex,
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ColorParseError::*;
        let msg = match self {
            Empty => "empty color string",
            InvalidLength => "hex color must have exactly 6 digits",
            InvalidHex => "invalid hex digits",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for ColorParseError {}

/// Formats three channels as `#rrggbb`.
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    Rgb::new(r, g, b).to_hex()
}

/// Lenient hex parser: malformed input is black.
pub fn hex_to_rgb(hex: &str) -> Rgb {
    Rgb::parse_hex(hex).unwrap_or(Rgb::BLACK)
}

pub fn complementary_rgb(r: u8, g: u8, b: u8) -> Rgb {
    Rgb::new(r, g, b).complement()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_is_lowercase_and_zero_padded() {
        assert_eq!(rgb_to_hex(0, 10, 255), "#000aff");
        assert_eq!(Rgb::new(139, 0, 255).to_string(), "#8b00ff");
    }

    #[test]
    fn hex_round_trip_on_well_formed_strings() {
        for hex in ["#000000", "#ffffff", "#8b00ff", "#ff8000", "#0a0b0c"] {
            assert_eq!(hex_to_rgb(hex).to_hex(), hex);
        }
        // uppercase input normalises to lowercase output
        assert_eq!(hex_to_rgb("#FF00FF").to_hex(), "#ff00ff");
    }

    #[test]
    fn prefix_is_optional() {
        assert_eq!(hex_to_rgb("00ffff"), Rgb::new(0, 255, 255));
    }

    #[test]
    fn malformed_hex_is_black() {
        for bad in ["", "#", "#fff", "#fffffff", "##ffffff", "#gg0000", " #ffffff", "rgb(1,2,3)"] {
            assert_eq!(hex_to_rgb(bad), Rgb::BLACK, "input {bad:?}");
        }
    }

    #[test]
    fn strict_parser_reports_the_failure() {
        assert_eq!(Rgb::parse_hex("#"), Err(ColorParseError::Empty));
        assert_eq!(Rgb::parse_hex("#abc"), Err(ColorParseError::InvalidLength));
        assert_eq!(Rgb::parse_hex("#abcdeg"), Err(ColorParseError::InvalidHex));
        assert_eq!("#ABCDEF".parse::<Rgb>(), Ok(Rgb::new(0xab, 0xcd, 0xef)));
    }

    #[test]
    fn complement_inverts_each_channel() {
        assert_eq!(complementary_rgb(0, 51, 255), Rgb::new(255, 204, 0));
        assert_eq!(Rgb::WHITE.complement(), Rgb::BLACK);
    }

    #[test]
    fn mean_rounds_half_up() {
        let mean = Rgb::mean(&[Rgb::new(254, 0, 1), Rgb::new(255, 0, 0)]).unwrap();
        assert_eq!(mean, Rgb::new(255, 0, 1));
        assert_eq!(Rgb::mean(&[]), None);
    }

    #[test]
    fn lerp_clamps_t() {
        let a = Rgb::BLACK;
        let b = Rgb::WHITE;
        assert_eq!(a.lerp(b, -1.0), a);
        assert_eq!(a.lerp(b, 2.0), b);
        assert_eq!(a.lerp(b, 0.5), Rgb::new(128, 128, 128));
    }

    #[test]
    fn colors_cast_to_raw_bytes() {
        let colors = [Rgb::new(1, 2, 3), Rgb::new(4, 5, 6)];
        let bytes: &[u8] = bytemuck::cast_slice(&colors);
        assert_eq!(bytes, &[1, 2, 3, 4, 5, 6]);
    }
}
