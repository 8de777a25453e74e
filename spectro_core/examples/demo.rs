use std::path::PathBuf;

use spectro_color_core::config::ConfigError;
use spectro_color_core::logging;
use spectro_color_core::{
    absorbed_color, color_band, observed_color_for_wavelengths, AbsorptionRange, EngineConfig,
    MixLogEntry, SpectrumStrip, WheelMarkers,
};
use tracing_subscriber::EnvFilter;

struct ClassroomExample {
    name: &'static str,
    wavelengths: &'static [f64],
    appears: &'static str,
}

const EXAMPLES: [ClassroomExample; 5] = [
    ClassroomExample {
        name: "β-Carotene (carrots)",
        wavelengths: &[450.0],
        appears: "orange",
    },
    ClassroomExample {
        name: "Chlorophyll-a (leaves)",
        wavelengths: &[430.0, 662.0],
        appears: "green",
    },
    ClassroomExample {
        name: "Potassium permanganate",
        wavelengths: &[525.0],
        appears: "purple",
    },
    ClassroomExample {
        name: "Crystal violet",
        wavelengths: &[420.0],
        appears: "violet",
    },
    ClassroomExample {
        name: "Potassium dichromate",
        wavelengths: &[450.0],
        appears: "orange",
    },
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = load_config()?;
    println!(
        "Loaded config: mode={} step={} nm widths={}..{} nm",
        config.mode,
        config.mixer.step_nm,
        config.range_policy.min_width_nm,
        config.range_policy.max_width_nm
    );

    let log_dir = PathBuf::from("logs");
    for example in &EXAMPLES {
        let observed = observed_color_for_wavelengths(example.wavelengths, config.mode);
        let primary = example.wavelengths[0];
        let band = color_band(primary)
            .map(|band| band.to_string())
            .unwrap_or_else(|| "none".to_string());
        println!(
            "{:<26} absorbs {:?} nm ({band}, {}) → observed {} (textbook: {})",
            example.name,
            example.wavelengths,
            absorbed_color(primary),
            observed,
            example.appears
        );
        if let Some(markers) = WheelMarkers::for_wavelength(primary) {
            tracing::debug!(
                absorbed_deg = markers.absorbed_angle_deg,
                observed_deg = markers.observed_angle_deg,
                "wheel markers"
            );
        }
        logging::log_mix(
            &log_dir,
            &MixLogEntry::wavelengths(example.wavelengths, config.mode, observed),
        )?;
    }

    let excluded = config.wavelength_ranges(&[430.0, 662.0]);
    let spectrum = config.mixer().mix(&excluded);
    println!(
        "Spectrum disk without chlorophyll bands: {} ({} of {} samples active)",
        spectrum.color, spectrum.active_samples, spectrum.total_samples
    );
    logging::log_mix(
        &log_dir,
        &MixLogEntry::spectrum(&excluded, config.mixer.step_nm, spectrum.color),
    )?;

    let absorbed = [
        AbsorptionRange::new(425.0, 435.0),
        AbsorptionRange::new(657.0, 667.0),
    ];
    let strip = SpectrumStrip::render(800, 60, &absorbed);
    strip.to_png(PathBuf::from("out/spectrum_strip.png"))?;

    println!("Demo complete. Strip written to out/spectrum_strip.png");
    Ok(())
}

fn load_config() -> Result<EngineConfig, ConfigError> {
    EngineConfig::load_from_file("config/engine.toml").or_else(|err| {
        tracing::warn!("Falling back to default config: {err}");
        Ok(EngineConfig::default())
    })
}
