//! Color blending: several absorbed ranges, the continuous spectrum disk, and
//! the seven-hue palette disk.

pub mod continuous;
pub mod multi;
pub mod palette;

pub use continuous::{
    mix_active_spectrum, SpectrumMix, SpectrumMixer, WhiteRule, COARSE_STEP_NM, FINE_STEP_NM,
};
pub use multi::{
    observed_color_for_wavelengths, observed_color_multi_range, AbsorptionRange,
    DISCRETE_HALF_WIDTH_NM,
};
pub use palette::{mix_palette, Hue, PaletteEntry, PaletteSelection, PALETTE};
