//! Engine configuration management via TOML files.
//!
//! Every key is optional. Missing sections fall back to the reference
//! behavior (ideal mode, 2 nm sampling with the 95 % white threshold, 10–150 nm
//! range widths).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::input::{RangePolicy, DEFAULT_MAX_RANGE_WIDTH_NM, DEFAULT_MIN_RANGE_WIDTH_NM};
use crate::mixing::continuous::{DEFAULT_MAX_BOOST, DEFAULT_WHITE_THRESHOLD, MIN_STEP_NM};
use crate::mixing::{
    AbsorptionRange, SpectrumMixer, WhiteRule, DISCRETE_HALF_WIDTH_NM, FINE_STEP_NM,
};
use crate::spectrum::ColorMode;

/// Engine configuration loaded from TOML file.
///
/// # Examples
///
/// ```
/// use spectro_color_core::EngineConfig;
///
/// let config = EngineConfig::load_from_file("config/engine.toml")
///     .unwrap_or_else(|_| EngineConfig::default());
///
/// println!("mode: {}, step: {} nm", config.mode, config.mixer.step_nm);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineConfig {
    /// Default resolution mode for observed colors.
    pub mode: ColorMode,
    /// Continuous-spectrum mixer settings.
    pub mixer: SpectrumMixer,
    /// Width limits for user-entered absorption ranges.
    pub range_policy: RangePolicy,
    /// Half-width of the range built around each discrete wavelength by
    /// [`EngineConfig::wavelength_ranges`]. It only shapes exclusion ranges
    /// for the continuous mixer and the strip; observed colors resolve at a
    /// range's midpoint, which is the wavelength itself at any half-width.
    pub discrete_half_width_nm: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mode: ColorMode::Ideal,
            mixer: SpectrumMixer::fine(),
            range_policy: RangePolicy::default(),
            discrete_half_width_nm: DISCRETE_HALF_WIDTH_NM,
        }
    }
}

impl EngineConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_str(&contents)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(toml_str: &str) -> Result<Self, ConfigError> {
        let raw: RawEngineConfig =
            toml::from_str(toml_str).map_err(|err| ConfigError::Parse(err.to_string()))?;

        let mode = raw
            .engine
            .mode
            .parse::<ColorMode>()
            .map_err(|err| ConfigError::Parse(format!("engine.mode: {err}")))?;
        let mixer = raw.mixer.validate()?;
        let (range_policy, discrete_half_width_nm) = raw.input.validate()?;

        Ok(Self {
            mode,
            mixer,
            range_policy,
            discrete_half_width_nm,
        })
    }

    pub fn mixer(&self) -> SpectrumMixer {
        self.mixer
    }

    pub fn range_policy(&self) -> RangePolicy {
        self.range_policy
    }

    /// Synthetic absorption ranges for discrete wavelengths at the configured
    /// half-width.
    pub fn wavelength_ranges(&self, wavelengths: &[f64]) -> Vec<AbsorptionRange> {
        wavelengths
            .iter()
            .map(|&w| AbsorptionRange::around(w, self.discrete_half_width_nm))
            .collect()
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawEngineConfig {
    #[serde(default)]
    engine: RawEngineSection,
    #[serde(default)]
    mixer: RawMixerSection,
    #[serde(default)]
    input: RawInputSection,
}

#[derive(Debug, Deserialize)]
struct RawEngineSection {
    #[serde(default = "default_mode")]
    mode: String,
}

impl Default for RawEngineSection {
    fn default() -> Self {
        Self {
            mode: default_mode(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawMixerSection {
    #[serde(default = "default_step_nm")]
    step_nm: f64,
    #[serde(default = "default_white_threshold")]
    white_threshold: f64,
    #[serde(default = "default_max_boost")]
    max_boost: f64,
    #[serde(default = "default_white_rule")]
    white_rule: String,
}

impl Default for RawMixerSection {
    fn default() -> Self {
        Self {
            step_nm: default_step_nm(),
            white_threshold: default_white_threshold(),
            max_boost: default_max_boost(),
            white_rule: default_white_rule(),
        }
    }
}

impl RawMixerSection {
    fn validate(&self) -> Result<SpectrumMixer, ConfigError> {
        if !self.step_nm.is_finite() || self.step_nm < MIN_STEP_NM {
            return Err(ConfigError::Parse(format!(
                "mixer.step_nm must be at least {MIN_STEP_NM}"
            )));
        }
        if !(self.white_threshold > 0.0 && self.white_threshold <= 1.0) {
            return Err(ConfigError::Parse(
                "mixer.white_threshold must be in (0, 1]".into(),
            ));
        }
        if !self.max_boost.is_finite() || self.max_boost < 1.0 {
            return Err(ConfigError::Parse("mixer.max_boost must be >= 1".into()));
        }

        let white_rule = match self.white_rule.trim().to_ascii_lowercase().as_str() {
            "near_total" => WhiteRule::NearTotal(self.white_threshold),
            "no_exclusion" => WhiteRule::NoExclusion,
            other => {
                return Err(ConfigError::Parse(format!(
                    "mixer.white_rule must be \"near_total\" or \"no_exclusion\", got \"{other}\""
                )))
            }
        };

        Ok(SpectrumMixer {
            step_nm: self.step_nm,
            white_rule,
            max_boost: self.max_boost,
        })
    }
}

#[derive(Debug, Deserialize)]
struct RawInputSection {
    #[serde(default = "default_min_range_width")]
    min_range_width_nm: f64,
    #[serde(default = "default_max_range_width")]
    max_range_width_nm: f64,
    #[serde(default = "default_discrete_half_width")]
    discrete_half_width_nm: f64,
}

impl Default for RawInputSection {
    fn default() -> Self {
        Self {
            min_range_width_nm: default_min_range_width(),
            max_range_width_nm: default_max_range_width(),
            discrete_half_width_nm: default_discrete_half_width(),
        }
    }
}

impl RawInputSection {
    fn validate(&self) -> Result<(RangePolicy, f64), ConfigError> {
        let (min, max) = (self.min_range_width_nm, self.max_range_width_nm);
        if !min.is_finite() || !max.is_finite() || min < 0.0 {
            return Err(ConfigError::Parse(
                "input range widths must be finite and non-negative".into(),
            ));
        }
        if min > max {
            return Err(ConfigError::Parse(
                "input.min_range_width_nm must not exceed input.max_range_width_nm".into(),
            ));
        }
        if !self.discrete_half_width_nm.is_finite() || self.discrete_half_width_nm <= 0.0 {
            return Err(ConfigError::Parse(
                "input.discrete_half_width_nm must be positive".into(),
            ));
        }

        Ok((
            RangePolicy {
                min_width_nm: min,
                max_width_nm: max,
            },
            self.discrete_half_width_nm,
        ))
    }
}

fn default_mode() -> String {
    ColorMode::Ideal.as_str().to_string()
}

fn default_step_nm() -> f64 {
    FINE_STEP_NM
}

fn default_white_threshold() -> f64 {
    DEFAULT_WHITE_THRESHOLD
}

fn default_max_boost() -> f64 {
    DEFAULT_MAX_BOOST
}

fn default_white_rule() -> String {
    "near_total".to_string()
}

fn default_min_range_width() -> f64 {
    DEFAULT_MIN_RANGE_WIDTH_NM
}

fn default_max_range_width() -> f64 {
    DEFAULT_MAX_RANGE_WIDTH_NM
}

fn default_discrete_half_width() -> f64 {
    DISCRETE_HALF_WIDTH_NM
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "IO error: {}", err),
            ConfigError::Parse(err) => write!(f, "Parse error: {}", err),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        ConfigError::Io(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mixing::{observed_color_for_wavelengths, observed_color_multi_range};

    #[test]
    fn empty_config_matches_defaults() {
        let config = EngineConfig::from_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.mixer(), SpectrumMixer::fine());
        assert_eq!(config.range_policy(), RangePolicy::default());
    }

    #[test]
    fn parses_custom_values() {
        let toml = r#"
[engine]
mode = "real"

[mixer]
step_nm = 5.0
white_rule = "no_exclusion"
max_boost = 1.2

[input]
min_range_width_nm = 5
max_range_width_nm = 200
discrete_half_width_nm = 2.5
"#;
        let config = EngineConfig::from_str(toml).unwrap();
        assert_eq!(config.mode, ColorMode::Real);
        assert_eq!(config.mixer.step_nm, 5.0);
        assert_eq!(config.mixer.white_rule, WhiteRule::NoExclusion);
        assert!((config.mixer.max_boost - 1.2).abs() < f64::EPSILON);
        assert_eq!(config.range_policy.min_width_nm, 5.0);
        assert_eq!(config.range_policy.max_width_nm, 200.0);
        assert_eq!(
            config.wavelength_ranges(&[500.0]),
            vec![AbsorptionRange::new(497.5, 502.5)]
        );
    }

    #[test]
    fn threshold_flows_into_near_total_rule() {
        let config = EngineConfig::from_str("[mixer]\nwhite_threshold = 0.9").unwrap();
        assert_eq!(config.mixer.white_rule, WhiteRule::NearTotal(0.9));
        assert_eq!(config.mixer.step_nm, FINE_STEP_NM);
    }

    #[test]
    fn rejects_invalid_values() {
        for toml in [
            "[engine]\nmode = \"neon\"",
            "[mixer]\nstep_nm = 0.0",
            "[mixer]\nstep_nm = 1e-20",
            "[mixer]\nstep_nm = 0.001",
            "[mixer]\nstep_nm = -2.0",
            "[mixer]\nwhite_threshold = 1.5",
            "[mixer]\nwhite_threshold = 0.0",
            "[mixer]\nmax_boost = 0.5",
            "[mixer]\nwhite_rule = \"sometimes\"",
            "[input]\nmin_range_width_nm = 200",
            "[input]\ndiscrete_half_width_nm = 0",
        ] {
            let result = EngineConfig::from_str(toml);
            assert!(
                matches!(result, Err(ConfigError::Parse(_))),
                "accepted: {toml}"
            );
        }
    }

    #[test]
    fn half_width_shapes_exclusions_not_observed_colors() {
        let config = EngineConfig::from_str("[input]\ndiscrete_half_width_nm = 20").unwrap();
        let wavelengths = [430.0, 662.0];
        let ranges = config.wavelength_ranges(&wavelengths);
        assert_eq!(ranges[0], AbsorptionRange::new(410.0, 450.0));

        for mode in [ColorMode::Ideal, ColorMode::Real] {
            assert_eq!(
                observed_color_multi_range(&ranges, mode),
                observed_color_for_wavelengths(&wavelengths, mode)
            );
        }

        let narrow = EngineConfig::default().wavelength_ranges(&wavelengths);
        let mixer = config.mixer();
        assert!(mixer.mix(&ranges).active_samples < mixer.mix(&narrow).active_samples);
    }

    #[test]
    fn finest_step_is_accepted() {
        let config = EngineConfig::from_str("[mixer]\nstep_nm = 0.01").unwrap();
        assert_eq!(config.mixer.step_nm, MIN_STEP_NM);
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(matches!(
            EngineConfig::from_str("[mixer\nstep_nm = 2"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = EngineConfig::load_from_file("does/not/exist.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
