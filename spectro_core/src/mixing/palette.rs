//! Seven-hue (VIBGYOR) disk mixing.
//!
//! The palette is fixed; which entries are enabled belongs to the caller and
//! is passed in either as a slice of entries or through [`PaletteSelection`].
//! `Real` mode is a plain RGB mean. `Ideal` mode scales the mean up by
//! `1 + n/7` so a few hues look lively rather than washed out, and only the
//! complete set of seven recombines into white.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::spectrum::ColorMode;

pub const PALETTE_SIZE: usize = 7;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hue {
    Violet,
    Indigo,
    Blue,
    Green,
    Yellow,
    Orange,
    Red,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PaletteEntry {
    pub hue: Hue,
    pub name: &'static str,
    pub rgb: Rgb,
}

#[rustfmt::skip]
pub const PALETTE: [PaletteEntry; PALETTE_SIZE] = [
    PaletteEntry { hue: Hue::Violet, name: "Violet", rgb: Rgb::new(139, 0, 255) },
    PaletteEntry { hue: Hue::Indigo, name: "Indigo", rgb: Rgb::new(75, 0, 130) },
    PaletteEntry { hue: Hue::Blue, name: "Blue", rgb: Rgb::new(0, 0, 255) },
    PaletteEntry { hue: Hue::Green, name: "Green", rgb: Rgb::new(0, 255, 0) },
    PaletteEntry { hue: Hue::Yellow, name: "Yellow", rgb: Rgb::new(255, 255, 0) },
    PaletteEntry { hue: Hue::Orange, name: "Orange", rgb: Rgb::new(255, 128, 0) },
    PaletteEntry { hue: Hue::Red, name: "Red", rgb: Rgb::new(255, 0, 0) },
];

impl Hue {
    pub fn entry(self) -> &'static PaletteEntry {
        &PALETTE[self as usize]
    }
}

/// Mixes the given palette entries into one color.
pub fn mix_palette(entries: &[PaletteEntry], mode: ColorMode) -> Rgb {
    match entries {
        [] => return Rgb::BLACK,
        [only] => return only.rgb,
        _ => {}
    }

    let colors: Vec<Rgb> = entries.iter().map(|entry| entry.rgb).collect();
    match mode {
        ColorMode::Real => Rgb::mean(&colors).unwrap_or(Rgb::BLACK),
        ColorMode::Ideal if entries.len() == PALETTE_SIZE => Rgb::WHITE,
        ColorMode::Ideal => weighted_additive(&colors),
    }
}

// mean * (1 + n/7), clamped per channel
fn weighted_additive(colors: &[Rgb]) -> Rgb {
    let count = colors.len() as f64;
    let weight = 1.0 + count / PALETTE_SIZE as f64;
    let (r, g, b) = colors.iter().fold((0u32, 0u32, 0u32), |(r, g, b), c| {
        (r + c.r as u32, g + c.g as u32, b + c.b as u32)
    });
    let channel = |sum: u32| ((sum as f64 / count) * weight).round().min(255.0) as u8;

    Rgb::new(channel(r), channel(g), channel(b))
}

/// Caller-owned enabled mask over [`PALETTE`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteSelection {
    enabled: [bool; PALETTE_SIZE],
}

impl Default for PaletteSelection {
    fn default() -> Self {
        Self {
            enabled: [true; PALETTE_SIZE],
        }
    }
}

impl PaletteSelection {
    pub fn none() -> Self {
        Self {
            enabled: [false; PALETTE_SIZE],
        }
    }

    pub fn from_hues(hues: &[Hue]) -> Self {
        let mut selection = Self::none();
        for &hue in hues {
            selection.set(hue, true);
        }
        selection
    }

    pub fn is_enabled(&self, hue: Hue) -> bool {
        self.enabled[hue as usize]
    }

    pub fn set(&mut self, hue: Hue, enabled: bool) {
        self.enabled[hue as usize] = enabled;
    }

    pub fn toggle(&mut self, hue: Hue) {
        self.enabled[hue as usize] ^= true;
    }

    pub fn count(&self) -> usize {
        self.enabled.iter().filter(|&&on| on).count()
    }

    /// Enabled entries in palette order.
    pub fn enabled_entries(&self) -> Vec<PaletteEntry> {
        PALETTE
            .iter()
            .zip(self.enabled)
            .filter_map(|(entry, on)| on.then_some(*entry))
            .collect()
    }

    pub fn mix(&self, mode: ColorMode) -> Rgb {
        mix_palette(&self.enabled_entries(), mode)
    }
}
