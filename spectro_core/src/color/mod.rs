pub mod rgb;

pub use rgb::{complementary_rgb, hex_to_rgb, rgb_to_hex, ColorParseError, Rgb};
