//! Validation for user-supplied wavelengths and absorption ranges.
//!
//! The engine accepts whatever it is given; this layer is what keeps
//! malformed ranges away from it. Limits follow typical absorption band
//! widths (10–150 nm) and ranges entered by one user must not touch.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::mixing::{observed_color_for_wavelengths, AbsorptionRange};
use crate::spectrum::{observed_color, ColorMode, VISIBLE_MAX_NM, VISIBLE_MIN_NM};

pub const DEFAULT_MIN_RANGE_WIDTH_NM: f64 = 10.0;
pub const DEFAULT_MAX_RANGE_WIDTH_NM: f64 = 150.0;

#[derive(Debug, Clone, PartialEq)]
pub enum InputError {
    NotANumber,
    /// Requires `380 <= min < max <= 780`.
    OutOfBounds { min_nm: f64, max_nm: f64 },
    TooWide { width_nm: f64, limit_nm: f64 },
    TooNarrow { width_nm: f64, limit_nm: f64 },
    Overlaps { existing: AbsorptionRange },
    Duplicate { wavelength_nm: f64 },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::NotANumber => write!(f, "please enter valid wavelength values"),
            InputError::OutOfBounds { min_nm, max_nm } => write!(
                f,
                "invalid range {min_nm}-{max_nm} nm: ensure {VISIBLE_MIN_NM} <= min < max <= {VISIBLE_MAX_NM}"
            ),
            InputError::TooWide { width_nm, limit_nm } => write!(
                f,
                "range too wide ({width_nm} nm): absorption bands are typically <= {limit_nm} nm"
            ),
            InputError::TooNarrow { width_nm, limit_nm } => write!(
                f,
                "range too narrow ({width_nm} nm): minimum width is {limit_nm} nm"
            ),
            InputError::Overlaps { existing } => write!(
                f,
                "range overlaps existing absorption range {}-{} nm",
                existing.min_nm, existing.max_nm
            ),
            InputError::Duplicate { wavelength_nm } => {
                write!(f, "wavelength {wavelength_nm} nm is already added")
            }
        }
    }
}

impl std::error::Error for InputError {}

/// Width limits applied to new absorption ranges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangePolicy {
    pub min_width_nm: f64,
    pub max_width_nm: f64,
}

impl Default for RangePolicy {
    fn default() -> Self {
        Self {
            min_width_nm: DEFAULT_MIN_RANGE_WIDTH_NM,
            max_width_nm: DEFAULT_MAX_RANGE_WIDTH_NM,
        }
    }
}

impl RangePolicy {
    /// Checks a candidate range against the bounds, the width limits and the
    /// ranges already accepted. Touching endpoints count as overlap.
    pub fn validate(
        &self,
        min_nm: f64,
        max_nm: f64,
        existing: &[AbsorptionRange],
    ) -> Result<AbsorptionRange, InputError> {
        if !min_nm.is_finite() || !max_nm.is_finite() {
            return Err(InputError::NotANumber);
        }
        if min_nm < VISIBLE_MIN_NM || max_nm > VISIBLE_MAX_NM || min_nm >= max_nm {
            return Err(InputError::OutOfBounds { min_nm, max_nm });
        }

        let width_nm = max_nm - min_nm;
        if width_nm > self.max_width_nm {
            return Err(InputError::TooWide {
                width_nm,
                limit_nm: self.max_width_nm,
            });
        }
        if width_nm < self.min_width_nm {
            return Err(InputError::TooNarrow {
                width_nm,
                limit_nm: self.min_width_nm,
            });
        }

        if let Some(existing) = existing
            .iter()
            .find(|range| min_nm <= range.max_nm && max_nm >= range.min_nm)
        {
            tracing::debug!(min_nm, max_nm, "rejected overlapping absorption range");
            return Err(InputError::Overlaps {
                existing: *existing,
            });
        }

        Ok(AbsorptionRange::new(min_nm, max_nm))
    }
}

/// Parses the leading integer of `text`, ignoring surrounding whitespace and
/// anything after the digits.
fn parse_leading_int(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (sign, digits) = match text.as_bytes().first() {
        Some(b'-') => (-1, &text[1..]),
        Some(b'+') => (1, &text[1..]),
        _ => (1, text),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|value| sign * value)
}

/// Coerces typed wavelength input into the visible range: unparsable or too
/// small becomes 380, too large becomes 780.
pub fn clamp_wavelength_input(text: &str) -> f64 {
    match parse_leading_int(text) {
        Some(value) if (value as f64) > VISIBLE_MAX_NM => VISIBLE_MAX_NM,
        Some(value) if (value as f64) >= VISIBLE_MIN_NM => value as f64,
        _ => VISIBLE_MIN_NM,
    }
}

/// Additional absorbed wavelengths next to a primary one, in insertion order
/// and without duplicates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WavelengthSet {
    wavelengths: Vec<f64>,
}

impl WavelengthSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, wavelength_nm: f64) -> Result<(), InputError> {
        if !wavelength_nm.is_finite() {
            return Err(InputError::NotANumber);
        }
        if !(VISIBLE_MIN_NM..=VISIBLE_MAX_NM).contains(&wavelength_nm) {
            return Err(InputError::OutOfBounds {
                min_nm: wavelength_nm,
                max_nm: wavelength_nm,
            });
        }
        if self.wavelengths.contains(&wavelength_nm) {
            return Err(InputError::Duplicate { wavelength_nm });
        }
        self.wavelengths.push(wavelength_nm);
        Ok(())
    }

    /// Returns whether the wavelength was present.
    pub fn remove(&mut self, wavelength_nm: f64) -> bool {
        let before = self.wavelengths.len();
        self.wavelengths.retain(|&w| w != wavelength_nm);
        self.wavelengths.len() != before
    }

    pub fn clear(&mut self) {
        self.wavelengths.clear();
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.wavelengths
    }

    pub fn len(&self) -> usize {
        self.wavelengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wavelengths.is_empty()
    }

    /// Observed color with `primary` absorbed alongside every wavelength in
    /// the set. With an empty set this is the single-wavelength resolver.
    pub fn observed_color(&self, primary: f64, mode: ColorMode) -> Rgb {
        if self.wavelengths.is_empty() {
            return observed_color(primary, mode);
        }

        let mut all = Vec::with_capacity(self.wavelengths.len() + 1);
        all.push(primary);
        all.extend_from_slice(&self.wavelengths);
        observed_color_for_wavelengths(&all, mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_a_well_formed_range() {
        let policy = RangePolicy::default();
        assert_eq!(
            policy.validate(420.0, 480.0, &[]),
            Ok(AbsorptionRange::new(420.0, 480.0))
        );
    }

    #[test]
    fn rejects_out_of_bounds_and_inverted() {
        let policy = RangePolicy::default();
        for (min, max) in [(370.0, 400.0), (700.0, 790.0), (500.0, 500.0), (520.0, 510.0)] {
            assert!(matches!(
                policy.validate(min, max, &[]),
                Err(InputError::OutOfBounds { .. })
            ));
        }
        assert_eq!(policy.validate(f64::NAN, 500.0, &[]), Err(InputError::NotANumber));
    }

    #[test]
    fn enforces_width_limits() {
        let policy = RangePolicy::default();
        assert!(matches!(
            policy.validate(400.0, 551.0, &[]),
            Err(InputError::TooWide { .. })
        ));
        assert!(matches!(
            policy.validate(400.0, 409.0, &[]),
            Err(InputError::TooNarrow { .. })
        ));
        assert!(policy.validate(400.0, 550.0, &[]).is_ok());
        assert!(policy.validate(400.0, 410.0, &[]).is_ok());
    }

    #[test]
    fn touching_ranges_overlap() {
        let policy = RangePolicy::default();
        let existing = [AbsorptionRange::new(450.0, 500.0)];
        assert_eq!(
            policy.validate(500.0, 520.0, &existing),
            Err(InputError::Overlaps {
                existing: existing[0]
            })
        );
        assert!(policy.validate(501.0, 520.0, &existing).is_ok());
    }

    #[test]
    fn typed_input_is_clamped() {
        assert_eq!(clamp_wavelength_input("450"), 450.0);
        assert_eq!(clamp_wavelength_input("  512nm"), 512.0);
        assert_eq!(clamp_wavelength_input("12"), 380.0);
        assert_eq!(clamp_wavelength_input("-600"), 380.0);
        assert_eq!(clamp_wavelength_input("abc"), 380.0);
        assert_eq!(clamp_wavelength_input(""), 380.0);
        assert_eq!(clamp_wavelength_input("9000"), 780.0);
    }

    #[test]
    fn wavelength_set_rejects_duplicates() {
        let mut set = WavelengthSet::new();
        assert!(set.add(662.0).is_ok());
        assert_eq!(
            set.add(662.0),
            Err(InputError::Duplicate {
                wavelength_nm: 662.0
            })
        );
        assert!(matches!(set.add(800.0), Err(InputError::OutOfBounds { .. })));
        assert_eq!(set.as_slice(), &[662.0]);
        assert!(set.remove(662.0));
        assert!(!set.remove(662.0));
        assert!(set.is_empty());
    }

    #[test]
    fn wavelength_set_blends_with_primary() {
        let mut set = WavelengthSet::new();
        assert_eq!(
            set.observed_color(450.0, ColorMode::Ideal),
            observed_color(450.0, ColorMode::Ideal)
        );
        set.add(662.0).unwrap();
        // chlorophyll: 430 (yellow) + 662 (cyan)
        assert_eq!(
            set.observed_color(430.0, ColorMode::Ideal),
            Rgb::new(128, 255, 128)
        );
    }

    #[test]
    fn errors_render_readable_messages() {
        let err = InputError::TooNarrow {
            width_nm: 5.0,
            limit_nm: 10.0,
        };
        assert_eq!(
            err.to_string(),
            "range too narrow (5 nm): minimum width is 10 nm"
        );
    }
}
