//! Wavelength conversion, band classification and observed-color resolution.

pub mod band;
pub mod observe;
pub mod strip;
pub mod wavelength;
pub mod wheel;

pub use band::{color_band, Band, BandSpec, UnknownBand, BAND_TABLE};
pub use observe::{absorbed_color, observed_color, ColorMode, UnknownColorMode};
pub use strip::{click_to_wavelength, pixel_to_wavelength, wavelength_to_pixel, SpectrumStrip};
pub use wavelength::{intensity_factor, wavelength_to_rgb, VISIBLE_MAX_NM, VISIBLE_MIN_NM};
pub use wheel::{wheel_angle, WheelMarkers, WHEEL_ANGLES};
