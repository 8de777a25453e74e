//! Disk Integration for the Color Mixers
//!
//! Couples the spin state machine from `spectro_shared` with the palette and
//! continuous-spectrum mixers. Each `advance(dt)` returns a [`DiskView`]: the
//! disk's segments with their colors faded toward the mixed color by the
//! frame's blend factor, so a steady disk shows one uniform color and a
//! stopped disk shows the raw segments.

use serde::Serialize;
use spectro_shared::{DiskFrame, FrameDriven, SpinAnimator, SpinProfile};

use crate::color::Rgb;
use crate::mixing::{mix_palette, AbsorptionRange, Hue, PaletteSelection, SpectrumMixer};
use crate::spectrum::{wavelength_to_rgb, ColorMode};

/// Canvas angles start at three o'clock; the first segment starts at twelve.
const FIRST_SEGMENT_OFFSET_DEG: f64 = -90.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DiskSegment {
    pub hue: Option<Hue>,
    pub start_deg: f64,
    pub sweep_deg: f64,
    /// Raw color of the segment at rest.
    pub base: Rgb,
    /// Color as seen at the current speed.
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiskView {
    pub frame: DiskFrame,
    pub segments: Vec<DiskSegment>,
    pub mixed: Rgb,
}

fn layout_segments(
    frame: &DiskFrame,
    bases: &[(Option<Hue>, Rgb)],
    mixed: Rgb,
) -> Vec<DiskSegment> {
    if bases.is_empty() {
        return Vec::new();
    }
    let sweep_deg = 360.0 / bases.len() as f64;
    bases
        .iter()
        .enumerate()
        .map(|(index, &(hue, base))| DiskSegment {
            hue,
            start_deg: (frame.angle_deg + index as f64 * sweep_deg + FIRST_SEGMENT_OFFSET_DEG)
                .rem_euclid(360.0),
            sweep_deg,
            base,
            color: base.lerp(mixed, frame.blend),
        })
        .collect()
}

/// Seven-hue disk with a caller-controlled selection.
pub struct SpinningDisk {
    animator: SpinAnimator,
    pub selection: PaletteSelection,
    pub mode: ColorMode,
}

impl SpinningDisk {
    pub fn new(profile: SpinProfile, selection: PaletteSelection, mode: ColorMode) -> Self {
        Self {
            animator: SpinAnimator::new(profile),
            selection,
            mode,
        }
    }

    pub fn animator(&self) -> &SpinAnimator {
        &self.animator
    }

    pub fn animator_mut(&mut self) -> &mut SpinAnimator {
        &mut self.animator
    }

    pub fn mixed_color(&self) -> Rgb {
        self.selection.mix(self.mode)
    }

    pub fn advance(&mut self, dt: f64) -> DiskView {
        let frame = self.animator.tick(dt);
        let entries = self.selection.enabled_entries();
        let mixed = mix_palette(&entries, self.mode);
        let bases: Vec<(Option<Hue>, Rgb)> =
            entries.iter().map(|entry| (Some(entry.hue), entry.rgb)).collect();

        DiskView {
            segments: layout_segments(&frame, &bases, mixed),
            frame,
            mixed,
        }
    }
}

impl Default for SpinningDisk {
    fn default() -> Self {
        Self::new(
            SpinProfile::default(),
            PaletteSelection::default(),
            ColorMode::default(),
        )
    }
}

impl FrameDriven for SpinningDisk {
    type Frame = DiskView;

    fn advance(&mut self, dt: f64) -> DiskView {
        SpinningDisk::advance(self, dt)
    }
}

/// Disk painted with the whole visible spectrum, one segment per mixer
/// sample. Excluded samples are painted black.
pub struct ContinuousDisk {
    animator: SpinAnimator,
    pub mixer: SpectrumMixer,
    pub excluded: Vec<AbsorptionRange>,
}

impl ContinuousDisk {
    pub fn new(profile: SpinProfile, mixer: SpectrumMixer) -> Self {
        Self {
            animator: SpinAnimator::new(profile),
            mixer,
            excluded: Vec::new(),
        }
    }

    pub fn animator_mut(&mut self) -> &mut SpinAnimator {
        &mut self.animator
    }

    pub fn advance(&mut self, dt: f64) -> DiskView {
        let frame = self.animator.tick(dt);
        let mixed = self.mixer.mix(&self.excluded).color;
        let bases: Vec<(Option<Hue>, Rgb)> = self
            .mixer
            .sample_wavelengths()
            .map(|w| {
                if self.excluded.iter().any(|range| range.contains(w)) {
                    (None, Rgb::BLACK)
                } else {
                    (None, wavelength_to_rgb(w))
                }
            })
            .collect();

        DiskView {
            segments: layout_segments(&frame, &bases, mixed),
            frame,
            mixed,
        }
    }
}

impl FrameDriven for ContinuousDisk {
    type Frame = DiskView;

    fn advance(&mut self, dt: f64) -> DiskView {
        ContinuousDisk::advance(self, dt)
    }
}
