//! Empirical wavelength → RGB curve.
//!
//! Six piecewise-linear segments over 380–780 nm approximate the hue of
//! monochromatic light, and an intensity factor dims both ends of the visible
//! range where the eye is least sensitive. This is deliberately not CIE
//! colorimetry: it is the classic "spectrum bar" approximation.
//!
//! Anything outside [380, 780] is black. Downstream code relies on that to
//! treat out-of-range samples as contributing nothing.

use crate::color::Rgb;

pub const VISIBLE_MIN_NM: f64 = 380.0;
pub const VISIBLE_MAX_NM: f64 = 780.0;

// Segment breakpoints: violet→blue, blue→cyan, cyan→green, green→yellow,
// yellow→red, red.
const BREAKPOINTS_NM: [f64; 7] = [380.0, 440.0, 490.0, 510.0, 580.0, 645.0, 780.0];

const FADE_FLOOR: f64 = 0.3;
const FADE_IN_END_NM: f64 = 420.0;
const FADE_OUT_START_NM: f64 = 700.0;

/// Channel fractions in [0, 1] before attenuation.
fn segment_fractions(wavelength: f64) -> (f64, f64, f64) {
    let [w0, w1, w2, w3, w4, w5, w6] = BREAKPOINTS_NM;

    if (w0..w1).contains(&wavelength) {
        (-(wavelength - w1) / (w1 - w0), 0.0, 1.0)
    } else if (w1..w2).contains(&wavelength) {
        (0.0, (wavelength - w1) / (w2 - w1), 1.0)
    } else if (w2..w3).contains(&wavelength) {
        (0.0, 1.0, -(wavelength - w3) / (w3 - w2))
    } else if (w3..w4).contains(&wavelength) {
        ((wavelength - w3) / (w4 - w3), 1.0, 0.0)
    } else if (w4..w5).contains(&wavelength) {
        (1.0, -(wavelength - w5) / (w5 - w4), 0.0)
    } else if (w5..=w6).contains(&wavelength) {
        (1.0, 0.0, 0.0)
    } else {
        (0.0, 0.0, 0.0)
    }
}

/// Edge attenuation: ramps 0.3 → 1.0 over [380, 420) and 1.0 → 0.3 over
/// [700, 780]; 1.0 everywhere else, including outside the visible range.
pub fn intensity_factor(wavelength: f64) -> f64 {
    if (VISIBLE_MIN_NM..FADE_IN_END_NM).contains(&wavelength) {
        let ramp = (wavelength - VISIBLE_MIN_NM) / (FADE_IN_END_NM - VISIBLE_MIN_NM);
        FADE_FLOOR + (1.0 - FADE_FLOOR) * ramp
    } else if (FADE_OUT_START_NM..=VISIBLE_MAX_NM).contains(&wavelength) {
        let ramp = (VISIBLE_MAX_NM - wavelength) / (VISIBLE_MAX_NM - FADE_OUT_START_NM);
        FADE_FLOOR + (1.0 - FADE_FLOOR) * ramp
    } else {
        1.0
    }
}

/// Spectral color of monochromatic light at `wavelength` nanometers.
pub fn wavelength_to_rgb(wavelength: f64) -> Rgb {
    let (r, g, b) = segment_fractions(wavelength);
    let factor = intensity_factor(wavelength);
    let channel = |fraction: f64| (fraction * factor * 255.0).round().clamp(0.0, 255.0) as u8;

    Rgb::new(channel(r), channel(g), channel(b))
}
