//! Observed color when several bands are absorbed at once.
//!
//! Each absorption range is reduced to its midpoint, resolved on its own, and
//! the resolved colors are averaged with equal weight. Width does not matter,
//! only the number of ranges does.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::spectrum::{observed_color, ColorMode};

/// Half-width of the synthetic range built around a discrete wavelength.
pub const DISCRETE_HALF_WIDTH_NM: f64 = 5.0;

/// A band of wavelengths absorbed together.
///
/// The engine does not validate ranges; see [`crate::input::RangePolicy`] for
/// the checks applied to user input.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AbsorptionRange {
    pub min_nm: f64,
    pub max_nm: f64,
}

impl AbsorptionRange {
    pub const fn new(min_nm: f64, max_nm: f64) -> Self {
        Self { min_nm, max_nm }
    }

    /// Range of `half_width` on either side of `center`.
    pub fn around(center: f64, half_width: f64) -> Self {
        Self::new(center - half_width, center + half_width)
    }

    pub fn midpoint(&self) -> f64 {
        (self.min_nm + self.max_nm) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.max_nm - self.min_nm
    }

    /// Closed-interval membership.
    pub fn contains(&self, wavelength: f64) -> bool {
        wavelength >= self.min_nm && wavelength <= self.max_nm
    }
}

/// Blends the observed colors of every range into one.
///
/// No ranges means nothing is absorbed, so the result is white. A single
/// range is returned exactly as the single-wavelength resolver gives it.
pub fn observed_color_multi_range(ranges: &[AbsorptionRange], mode: ColorMode) -> Rgb {
    let resolved: Vec<Rgb> = ranges
        .iter()
        .map(|range| observed_color(range.midpoint(), mode))
        .collect();

    match resolved.as_slice() {
        [] => Rgb::WHITE,
        [single] => *single,
        colors => {
            let blended = Rgb::mean(colors).unwrap_or(Rgb::WHITE);
            tracing::trace!(
                ranges = colors.len(),
                %mode,
                color = %blended,
                "blended observed colors"
            );
            blended
        }
    }
}

/// Treats each wavelength as a ±5 nm absorption range and blends them.
pub fn observed_color_for_wavelengths(wavelengths: &[f64], mode: ColorMode) -> Rgb {
    let ranges: Vec<AbsorptionRange> = wavelengths
        .iter()
        .map(|&w| AbsorptionRange::around(w, DISCRETE_HALF_WIDTH_NM))
        .collect();
    observed_color_multi_range(&ranges, mode)
}
