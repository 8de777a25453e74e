//! Spectro Shared Library
//!
//! Presentation-side types for the spectroscopy color visualizer that carry
//! no color math of their own:
//! - Rotating disk spin state machine driven by explicit time steps
//! - Bounded frame history for replay and GPU upload

pub mod disk;

pub use disk::{DiskFrame, FrameDriven, FrameSample, SpinAnimator, SpinPhase, SpinProfile};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
