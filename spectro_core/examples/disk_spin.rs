//! Disk Spin Demo - spins the seven-hue disk up and back down
//!
//! Drives the disk at a fixed 30 fps and prints the mixed color as the
//! segments fuse.

use spectro_color_core::{ColorMode, Hue, PaletteSelection, SpinningDisk};
use spectro_shared::{SpinPhase, SpinProfile};

const DT: f64 = 1.0 / 30.0;

fn main() {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let mut selection = PaletteSelection::default();
    selection.toggle(Hue::Indigo);

    for mode in [ColorMode::Ideal, ColorMode::Real] {
        println!("=== {mode} mode, {} hues ===", selection.count());
        let mut disk = SpinningDisk::new(SpinProfile::default(), selection, mode);
        disk.animator_mut().start();

        let mut frame_index = 0usize;
        loop {
            let view = disk.advance(DT);
            if frame_index % 5 == 0 {
                let first = view.segments.first().map(|s| s.color.to_hex()).unwrap_or_default();
                println!(
                    "frame {frame_index:>3} {:?} speed {:>6.1}°/s blend {:.2} first segment {first}",
                    view.frame.phase, view.frame.speed, view.frame.blend
                );
            }
            if view.frame.phase == SpinPhase::Steady && disk.animator().is_spinning() {
                println!("steady → mixed {}", view.mixed);
                disk.animator_mut().stop();
            }
            if view.frame.phase == SpinPhase::Idle && frame_index > 0 {
                break;
            }
            frame_index += 1;
        }

        let samples = disk.animator().history_samples();
        let bytes: &[u8] = bytemuck::cast_slice(&samples);
        println!("{} frames buffered ({} bytes)\n", samples.len(), bytes.len());
    }
}
