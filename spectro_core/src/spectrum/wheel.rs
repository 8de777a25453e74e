//! Positions of the absorbed and observed colors on the complementary color
//! wheel. Angles are in degrees, clockwise from red at the top.

use super::band::{color_band, Band};
use crate::color::Rgb;

/// Wheel angle of every canonical band color.
pub const WHEEL_ANGLES: [(Rgb, f64); 8] = [
    (Rgb::new(0xff, 0x00, 0x00), 0.0),
    (Rgb::new(0xff, 0x80, 0x00), 60.0),
    (Rgb::new(0xff, 0xff, 0x00), 120.0),
    (Rgb::new(0x00, 0xff, 0x00), 180.0),
    (Rgb::new(0xff, 0x00, 0xff), 210.0),
    (Rgb::new(0x00, 0x00, 0xff), 240.0),
    (Rgb::new(0x00, 0xff, 0xff), 270.0),
    (Rgb::new(0x8b, 0x00, 0xff), 300.0),
];

const ABSORBED_FALLBACK_DEG: f64 = 0.0;
const OBSERVED_FALLBACK_DEG: f64 = 180.0;

pub fn wheel_angle(color: Rgb) -> Option<f64> {
    WHEEL_ANGLES
        .iter()
        .find(|(rgb, _)| *rgb == color)
        .map(|&(_, angle)| angle)
}

/// The pair of markers drawn on the wheel for one absorbed wavelength.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelMarkers {
    pub band: Band,
    pub absorbed: Rgb,
    pub observed: Rgb,
    pub absorbed_angle_deg: f64,
    pub observed_angle_deg: f64,
}

impl WheelMarkers {
    /// `None` when the wavelength falls outside every band.
    pub fn for_wavelength(wavelength: f64) -> Option<Self> {
        let band = color_band(wavelength)?;
        let absorbed = band.ideal_absorbed();
        let observed = band.ideal_observed();
        Some(Self {
            band,
            absorbed,
            observed,
            absorbed_angle_deg: wheel_angle(absorbed).unwrap_or(ABSORBED_FALLBACK_DEG),
            observed_angle_deg: wheel_angle(observed).unwrap_or(OBSERVED_FALLBACK_DEG),
        })
    }

    /// Clockwise distance from the absorbed to the observed marker.
    pub fn separation_deg(&self) -> f64 {
        (self.observed_angle_deg - self.absorbed_angle_deg).rem_euclid(360.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_band_color_has_an_angle() {
        for band in Band::ALL {
            assert!(wheel_angle(band.ideal_absorbed()).is_some(), "{band}");
            assert!(wheel_angle(band.ideal_observed()).is_some(), "{band}");
        }
        assert_eq!(wheel_angle(Rgb::new(1, 2, 3)), None);
    }

    #[test]
    fn blue_absorption_points_at_orange() {
        let markers = WheelMarkers::for_wavelength(450.0).unwrap();
        assert_eq!(markers.band, Band::Blue);
        assert_eq!(markers.absorbed_angle_deg, 240.0);
        assert_eq!(markers.observed_angle_deg, 60.0);
        assert_eq!(markers.separation_deg(), 180.0);
    }

    #[test]
    fn red_observed_keeps_its_zero_angle() {
        let markers = WheelMarkers::for_wavelength(500.0).unwrap();
        assert_eq!(markers.band, Band::Cyan);
        assert_eq!(markers.observed, Rgb::new(255, 0, 0));
        assert_eq!(markers.observed_angle_deg, 0.0);
        assert_eq!(markers.absorbed_angle_deg, 270.0);
    }

    #[test]
    fn no_markers_outside_the_bands() {
        assert!(WheelMarkers::for_wavelength(780.0).is_none());
        assert!(WheelMarkers::for_wavelength(300.0).is_none());
    }
}
