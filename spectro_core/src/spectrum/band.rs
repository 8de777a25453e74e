//! The seven named spectral bands and their ideal complementary colors.
//!
//! Bands are stored as an ordered table of immutable records rather than
//! behind any dispatch: classification is a first-match scan in ascending
//! wavelength order using `min <= w < max`. The rule is applied uniformly, so
//! the red band does not include 780 nm and `color_band(780.0)` is `None`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::Rgb;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    Violet,
    Blue,
    Cyan,
    Green,
    Yellow,
    Orange,
    Red,
}

/// One row of the band table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BandSpec {
    pub band: Band,
    pub min_nm: f64,
    pub max_nm: f64,
    /// Canonical color of the band itself.
    pub absorbed: Rgb,
    /// Fixed complement shown when this band is absorbed.
    pub observed: Rgb,
}

const VIOLET: Rgb = Rgb::new(0x8b, 0x00, 0xff);
const BLUE: Rgb = Rgb::new(0x00, 0x00, 0xff);
const CYAN: Rgb = Rgb::new(0x00, 0xff, 0xff);
const GREEN: Rgb = Rgb::new(0x00, 0xff, 0x00);
const YELLOW: Rgb = Rgb::new(0xff, 0xff, 0x00);
const ORANGE: Rgb = Rgb::new(0xff, 0x80, 0x00);
const RED: Rgb = Rgb::new(0xff, 0x00, 0x00);
const MAGENTA: Rgb = Rgb::new(0xff, 0x00, 0xff);

#[rustfmt::skip]
pub const BAND_TABLE: [BandSpec; 7] = [
    BandSpec { band: Band::Violet, min_nm: 380.0, max_nm: 450.0, absorbed: VIOLET, observed: YELLOW },
    BandSpec { band: Band::Blue, min_nm: 450.0, max_nm: 495.0, absorbed: BLUE, observed: ORANGE },
    BandSpec { band: Band::Cyan, min_nm: 495.0, max_nm: 520.0, absorbed: CYAN, observed: RED },
    BandSpec { band: Band::Green, min_nm: 520.0, max_nm: 565.0, absorbed: GREEN, observed: MAGENTA },
    BandSpec { band: Band::Yellow, min_nm: 565.0, max_nm: 590.0, absorbed: YELLOW, observed: VIOLET },
    BandSpec { band: Band::Orange, min_nm: 590.0, max_nm: 620.0, absorbed: ORANGE, observed: BLUE },
    BandSpec { band: Band::Red, min_nm: 620.0, max_nm: 780.0, absorbed: RED, observed: CYAN },
];

impl Band {
    pub const ALL: [Band; 7] = [
        Band::Violet,
        Band::Blue,
        Band::Cyan,
        Band::Green,
        Band::Yellow,
        Band::Orange,
        Band::Red,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Band::Violet => "violet",
            Band::Blue => "blue",
            Band::Cyan => "cyan",
            Band::Green => "green",
            Band::Yellow => "yellow",
            Band::Orange => "orange",
            Band::Red => "red",
        }
    }

    pub fn spec(self) -> &'static BandSpec {
        // table rows are declared in `Band::ALL` order
        &BAND_TABLE[self as usize]
    }

    /// Half-open `[min, max)` interval in nanometers.
    pub fn interval(self) -> (f64, f64) {
        let spec = self.spec();
        (spec.min_nm, spec.max_nm)
    }

    pub fn ideal_absorbed(self) -> Rgb {
        self.spec().absorbed
    }

    pub fn ideal_observed(self) -> Rgb {
        self.spec().observed
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownBand(pub String);

impl fmt::Display for UnknownBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown spectral band '{}'", self.0)
    }
}

impl std::error::Error for UnknownBand {}

impl FromStr for Band {
    type Err = UnknownBand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Band::ALL
            .into_iter()
            .find(|band| band.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownBand(s.to_string()))
    }
}

/// Classifies a wavelength into its band, or `None` outside [380, 780).
pub fn color_band(wavelength: f64) -> Option<Band> {
    BAND_TABLE
        .iter()
        .find(|spec| wavelength >= spec.min_nm && wavelength < spec.max_nm)
        .map(|spec| spec.band)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_rows_follow_declaration_order() {
        for (index, band) in Band::ALL.into_iter().enumerate() {
            assert_eq!(BAND_TABLE[index].band, band);
            assert_eq!(band.spec().band, band);
        }
    }

    #[test]
    fn bands_partition_visible_range() {
        assert_eq!(BAND_TABLE[0].min_nm, 380.0);
        assert_eq!(BAND_TABLE[6].max_nm, 780.0);
        for pair in BAND_TABLE.windows(2) {
            assert_eq!(pair[0].max_nm, pair[1].min_nm);
            assert!(pair[0].min_nm < pair[0].max_nm);
        }
    }

    #[test]
    fn boundaries_belong_to_the_upper_band() {
        assert_eq!(color_band(380.0), Some(Band::Violet));
        assert_eq!(color_band(449.999), Some(Band::Violet));
        assert_eq!(color_band(450.0), Some(Band::Blue));
        assert_eq!(color_band(520.0), Some(Band::Green));
        assert_eq!(color_band(620.0), Some(Band::Red));
        assert_eq!(color_band(779.999), Some(Band::Red));
    }

    #[test]
    fn exactly_780_has_no_band() {
        assert_eq!(color_band(780.0), None);
        assert_eq!(color_band(379.0), None);
        assert_eq!(color_band(f64::NAN), None);
    }

    #[test]
    fn ideal_pairs_are_mutual_for_primaries() {
        assert_eq!(Band::Blue.ideal_observed(), Band::Orange.ideal_absorbed());
        assert_eq!(Band::Orange.ideal_observed(), Band::Blue.ideal_absorbed());
        assert_eq!(Band::Violet.ideal_observed(), Band::Yellow.ideal_absorbed());
        assert_eq!(Band::Yellow.ideal_observed(), Band::Violet.ideal_absorbed());
        assert_eq!(Band::Green.ideal_observed().to_hex(), "#ff00ff");
    }

    #[test]
    fn names_parse_back() {
        for band in Band::ALL {
            assert_eq!(band.name().parse::<Band>(), Ok(band));
        }
        assert_eq!("RED".parse::<Band>(), Ok(Band::Red));
        assert!("indigo".parse::<Band>().is_err());
    }
}
