//! Absorbed vs. observed color for a single wavelength.
//!
//! The absorbed color is always the spectral color of the wavelength. The
//! observed color depends on [`ColorMode`]: `Ideal` reads the fixed complement
//! from the band table, `Real` inverts the spectral RGB.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::band::color_band;
use super::wavelength::wavelength_to_rgb;
use crate::color::Rgb;

/// Selects how the observed (complementary) color is computed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Fixed complementary hue per band.
    #[default]
    Ideal,
    /// RGB inversion of the spectral color.
    Real,
}

impl ColorMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ColorMode::Ideal => "ideal",
            ColorMode::Real => "real",
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownColorMode(pub String);

impl fmt::Display for UnknownColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown color mode '{}', expected 'ideal' or 'real'", self.0)
    }
}

impl std::error::Error for UnknownColorMode {}

impl FromStr for ColorMode {
    type Err = UnknownColorMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ideal" => Ok(ColorMode::Ideal),
            "real" => Ok(ColorMode::Real),
            _ => Err(UnknownColorMode(s.to_string())),
        }
    }
}

/// Color a sample appears when light at `wavelength` is absorbed.
///
/// Wavelengths with no band (including exactly 780 nm) fall back to white.
pub fn observed_color(wavelength: f64, mode: ColorMode) -> Rgb {
    let Some(band) = color_band(wavelength) else {
        return Rgb::WHITE;
    };

    match mode {
        ColorMode::Ideal => band.ideal_observed(),
        ColorMode::Real => wavelength_to_rgb(wavelength).complement(),
    }
}

/// Spectral color of the absorbed light; independent of the mode.
pub fn absorbed_color(wavelength: f64) -> Rgb {
    wavelength_to_rgb(wavelength)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ideal_mode_reads_the_table() {
        assert_eq!(observed_color(450.0, ColorMode::Ideal).to_hex(), "#ff8000");
        assert_eq!(observed_color(525.0, ColorMode::Ideal).to_hex(), "#ff00ff");
        assert_eq!(observed_color(430.0, ColorMode::Ideal).to_hex(), "#ffff00");
        assert_eq!(observed_color(662.0, ColorMode::Ideal).to_hex(), "#00ffff");
    }

    #[test]
    fn real_mode_inverts_spectral_rgb() {
        assert_eq!(observed_color(450.0, ColorMode::Real), Rgb::new(255, 204, 0));
        assert_eq!(observed_color(645.0, ColorMode::Real), Rgb::new(0, 255, 255));
    }

    #[test]
    fn no_band_is_white_in_both_modes() {
        for mode in [ColorMode::Ideal, ColorMode::Real] {
            assert_eq!(observed_color(780.0, mode), Rgb::WHITE);
            assert_eq!(observed_color(200.0, mode), Rgb::WHITE);
        }
    }

    #[test]
    fn absorbed_ignores_mode() {
        assert_eq!(absorbed_color(450.0), Rgb::new(0, 51, 255));
        // 780 has no band but still converts
        assert_eq!(absorbed_color(780.0), Rgb::new(77, 0, 0));
    }

    #[test]
    fn mode_parses_case_insensitively() {
        assert_eq!("Ideal".parse::<ColorMode>(), Ok(ColorMode::Ideal));
        assert_eq!(" real ".parse::<ColorMode>(), Ok(ColorMode::Real));
        assert!("both".parse::<ColorMode>().is_err());
        assert_eq!(ColorMode::default(), ColorMode::Ideal);
    }
}
