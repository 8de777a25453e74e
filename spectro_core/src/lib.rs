//! # Spectro Color Core
//!
//! A deterministic color engine for absorption spectroscopy. It answers the
//! question "if a substance absorbs these wavelengths, what color does it
//! look?" and simulates the spinning color disk used to teach additive
//! mixing. Every engine operation is a pure function of its inputs.
//!
//! ## Quick Start
//!
//! ```rust
//! use spectro_color_core::{
//!     observed_color, observed_color_for_wavelengths, wavelength_to_rgb, ColorMode, Rgb,
//! };
//!
//! // β-carotene absorbs blue light at 450 nm
//! assert_eq!(wavelength_to_rgb(450.0), Rgb::new(0, 51, 255));
//! assert_eq!(observed_color(450.0, ColorMode::Ideal).to_hex(), "#ff8000");
//!
//! // chlorophyll-a absorbs at 430 nm and 662 nm
//! let leaf = observed_color_for_wavelengths(&[430.0, 662.0], ColorMode::Ideal);
//! assert_eq!(leaf, Rgb::new(128, 255, 128));
//! ```
//!
//! ## Core Modules
//!
//! - [`color`] - RGB value type and hex codec
//! - [`spectrum`] - Wavelength conversion, bands, observed color, strip raster and wheel
//! - [`mixing`] - Multi-range blending, continuous spectrum and palette disks
//! - [`input`] - Validation for user-entered ranges and wavelengths
//! - [`config`] - Engine configuration via TOML
//! - [`logging`] - JSON line-delimited mix journal
//! - [`disk_integration`] - Spinning disks driven by `spectro_shared`

pub mod color;
pub mod config;
pub mod disk_integration;
pub mod input;
pub mod logging;
pub mod mixing;
pub mod spectrum;

pub use color::{complementary_rgb, hex_to_rgb, rgb_to_hex, ColorParseError, Rgb};
pub use config::{ConfigError, EngineConfig};
pub use disk_integration::{ContinuousDisk, DiskSegment, DiskView, SpinningDisk};
pub use input::{clamp_wavelength_input, InputError, RangePolicy, WavelengthSet};
pub use logging::{log_mix, MixJournal, MixLogEntry};
pub use mixing::{
    mix_active_spectrum, mix_palette, observed_color_for_wavelengths, observed_color_multi_range,
    AbsorptionRange, Hue, PaletteEntry, PaletteSelection, SpectrumMix, SpectrumMixer, WhiteRule,
    PALETTE,
};
pub use spectrum::{
    absorbed_color, click_to_wavelength, color_band, observed_color, pixel_to_wavelength,
    wavelength_to_pixel, wavelength_to_rgb, wheel_angle, Band, ColorMode, SpectrumStrip,
    WheelMarkers, VISIBLE_MAX_NM, VISIBLE_MIN_NM,
};
