//! Raster of the spectrum bar and the pixel ↔ wavelength mapping behind it.
//!
//! Column `x` of a strip `width` pixels wide shows the spectral color of
//! `380 + x / width * 400` nm. Columns inside an absorbed range are dimmed by
//! a 40 % black overlay so absorbed bands read as shadows on the bar.

use std::io;
use std::path::Path;

use ndarray::Array3;
use plotters::prelude::*;
use rayon::prelude::*;

use super::wavelength::{wavelength_to_rgb, VISIBLE_MAX_NM, VISIBLE_MIN_NM};
use crate::color::Rgb;
use crate::mixing::AbsorptionRange;

const SPAN_NM: f64 = VISIBLE_MAX_NM - VISIBLE_MIN_NM;
const OVERLAY_ALPHA: f64 = 0.4;

pub fn pixel_to_wavelength(x: f64, width: usize) -> f64 {
    if width == 0 {
        return VISIBLE_MIN_NM;
    }
    VISIBLE_MIN_NM + (x / width as f64) * SPAN_NM
}

pub fn wavelength_to_pixel(wavelength: f64, width: usize) -> f64 {
    (wavelength - VISIBLE_MIN_NM) / SPAN_NM * width as f64
}

/// Whole-nanometer wavelength under a click at `x`, if it lands on the bar.
pub fn click_to_wavelength(x: f64, width: usize) -> Option<f64> {
    if width == 0 {
        return None;
    }
    let wavelength = pixel_to_wavelength(x, width).round();
    (VISIBLE_MIN_NM..=VISIBLE_MAX_NM)
        .contains(&wavelength)
        .then_some(wavelength)
}

fn shade(color: Rgb) -> Rgb {
    let keep = 1.0 - OVERLAY_ALPHA;
    let channel = |c: u8| (c as f64 * keep).round() as u8;
    Rgb::new(channel(color.r), channel(color.g), channel(color.b))
}

/// Height × width × RGB image of the spectrum bar.
#[derive(Debug, Clone)]
pub struct SpectrumStrip {
    pub image: Array3<u8>,
}

impl SpectrumStrip {
    pub fn render(width: usize, height: usize, absorbed: &[AbsorptionRange]) -> Self {
        let columns: Vec<Rgb> = (0..width)
            .into_par_iter()
            .map(|x| {
                let wavelength = pixel_to_wavelength(x as f64, width);
                let color = wavelength_to_rgb(wavelength);
                if absorbed.iter().any(|range| range.contains(wavelength)) {
                    shade(color)
                } else {
                    color
                }
            })
            .collect();

        let mut image = Array3::zeros((height, width, 3));
        image
            .indexed_iter_mut()
            .par_bridge()
            .for_each(|((_, col, channel), value)| {
                *value = columns[col].into_array()[channel];
            });

        Self { image }
    }

    pub fn width(&self) -> usize {
        self.image.dim().1
    }

    pub fn height(&self) -> usize {
        self.image.dim().0
    }

    /// Colors of the first row, left to right.
    pub fn column_colors(&self) -> Vec<Rgb> {
        if self.height() == 0 {
            return Vec::new();
        }
        (0..self.width())
            .map(|col| {
                Rgb::new(
                    self.image[[0, col, 0]],
                    self.image[[0, col, 1]],
                    self.image[[0, col, 2]],
                )
            })
            .collect()
    }

    pub fn to_png<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let (rows, cols, _) = self.image.dim();
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let backend = BitMapBackend::new(path, (cols as u32, rows as u32));
        let drawing_area = backend.into_drawing_area();

        for row in 0..rows {
            for col in 0..cols {
                let color = RGBColor(
                    self.image[[row, col, 0]],
                    self.image[[row, col, 1]],
                    self.image[[row, col, 2]],
                );
                drawing_area
                    .draw_pixel((col as i32, row as i32), &color)
                    .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
            }
        }

        drawing_area
            .present()
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err))
    }
}
