//! Continuous-spectrum mixing: what a disk painted with the whole visible
//! spectrum looks like when spun fast, with some sub-ranges blanked out.
//!
//! The visible range is sampled at a fixed step; samples inside an excluded
//! range are skipped and the rest are averaged. A plain average of saturated
//! spectral hues is dim and muddy, so the mean is brightened toward full scale
//! (at most by `max_boost`) while keeping the channel ratios. Two outcomes are
//! special-cased before averaging: nothing active is black, and (per the
//! configured [`WhiteRule`]) an essentially complete spectrum is white.

use serde::{Deserialize, Serialize};

use super::multi::AbsorptionRange;
use crate::color::Rgb;
use crate::spectrum::{wavelength_to_rgb, VISIBLE_MAX_NM, VISIBLE_MIN_NM};

/// Reference sampling density.
pub const FINE_STEP_NM: f64 = 2.0;
/// Simplified sampling density.
pub const COARSE_STEP_NM: f64 = 5.0;
/// Smallest accepted step; finer steps fall back to [`FINE_STEP_NM`].
pub const MIN_STEP_NM: f64 = 0.01;
pub const DEFAULT_WHITE_THRESHOLD: f64 = 0.95;
pub const DEFAULT_MAX_BOOST: f64 = 1.5;

/// When the surviving spectrum counts as full white light.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "rule", content = "threshold")]
pub enum WhiteRule {
    /// Active fraction of all samples strictly above the threshold.
    NearTotal(f64),
    /// Only when no sample is excluded.
    NoExclusion,
}

/// Result of one mixing pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SpectrumMix {
    pub color: Rgb,
    pub active_samples: usize,
    pub total_samples: usize,
}

impl SpectrumMix {
    pub fn active_fraction(&self) -> f64 {
        if self.total_samples == 0 {
            return 0.0;
        }
        self.active_samples as f64 / self.total_samples as f64
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpectrumMixer {
    pub step_nm: f64,
    pub white_rule: WhiteRule,
    pub max_boost: f64,
}

impl Default for SpectrumMixer {
    fn default() -> Self {
        Self::fine()
    }
}

impl SpectrumMixer {
    /// 2 nm sampling (201 samples), white above 95 % active.
    pub fn fine() -> Self {
        Self {
            step_nm: FINE_STEP_NM,
            white_rule: WhiteRule::NearTotal(DEFAULT_WHITE_THRESHOLD),
            max_boost: DEFAULT_MAX_BOOST,
        }
    }

    /// 5 nm sampling (81 samples), white only with nothing excluded.
    pub fn coarse() -> Self {
        Self {
            step_nm: COARSE_STEP_NM,
            white_rule: WhiteRule::NoExclusion,
            max_boost: DEFAULT_MAX_BOOST,
        }
    }

    fn effective_step(&self) -> f64 {
        if self.step_nm.is_finite() && self.step_nm >= MIN_STEP_NM {
            self.step_nm
        } else {
            FINE_STEP_NM
        }
    }

    /// Sample wavelengths `380 + i * step` up to and including 780 when the
    /// step divides the range.
    pub fn sample_wavelengths(&self) -> impl Iterator<Item = f64> {
        let step = self.effective_step();
        let intervals = ((VISIBLE_MAX_NM - VISIBLE_MIN_NM) / step).floor() as usize;
        let count = intervals.saturating_add(1);
        (0..count).map(move |i| VISIBLE_MIN_NM + i as f64 * step)
    }

    pub fn total_samples(&self) -> usize {
        self.sample_wavelengths().count()
    }

    /// Mixes every sample not covered by `excluded`.
    pub fn mix(&self, excluded: &[AbsorptionRange]) -> SpectrumMix {
        let mut total_samples = 0usize;
        let mut active_samples = 0usize;
        let mut sums = [0u64; 3];

        for wavelength in self.sample_wavelengths() {
            total_samples += 1;
            if excluded.iter().any(|range| range.contains(wavelength)) {
                continue;
            }
            active_samples += 1;
            let rgb = wavelength_to_rgb(wavelength);
            sums[0] += rgb.r as u64;
            sums[1] += rgb.g as u64;
            sums[2] += rgb.b as u64;
        }

        let color = if active_samples == 0 {
            Rgb::BLACK
        } else if self.is_white(active_samples, total_samples) {
            Rgb::WHITE
        } else {
            let n = active_samples as f64;
            self.boost([sums[0] as f64 / n, sums[1] as f64 / n, sums[2] as f64 / n])
        };

        tracing::debug!(
            active_samples,
            total_samples,
            excluded = excluded.len(),
            color = %color,
            "mixed active spectrum"
        );

        SpectrumMix {
            color,
            active_samples,
            total_samples,
        }
    }

    fn is_white(&self, active: usize, total: usize) -> bool {
        match self.white_rule {
            WhiteRule::NearTotal(threshold) => active as f64 / total as f64 > threshold,
            WhiteRule::NoExclusion => active == total,
        }
    }

    // Brightens the mean so its strongest channel approaches 255.
    fn boost(&self, mean: [f64; 3]) -> Rgb {
        let max = mean[0].max(mean[1]).max(mean[2]);
        let boost = if max > 0.0 {
            (255.0 / max).min(self.max_boost.max(1.0))
        } else {
            1.0
        };
        let channel = |value: f64| (value * boost).min(255.0).round() as u8;

        Rgb::new(channel(mean[0]), channel(mean[1]), channel(mean[2]))
    }
}

/// Mixes the active spectrum at `step_nm` with the 95 % white threshold.
pub fn mix_active_spectrum(excluded: &[AbsorptionRange], step_nm: f64) -> Rgb {
    SpectrumMixer {
        step_nm,
        ..SpectrumMixer::fine()
    }
    .mix(excluded)
    .color
}
