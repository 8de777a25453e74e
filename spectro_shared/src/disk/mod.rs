//! Rotating Disk Spin State Machine
//!
//! The disk has no timer of its own. Callers drive it with an explicit
//! `tick(dt)` from whatever loop they run, and each tick yields a
//! [`DiskFrame`]: the current angle, speed, and a `blend` factor in [0, 1] that
//! says how far the segments should have fused into the mixed color.

pub mod profile;

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

pub use profile::SpinProfile;

pub const DEFAULT_HISTORY_LEN: usize = 120;

/// Spin lifecycle: `Idle → Accelerating → Steady → Decelerating → Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u32)]
pub enum SpinPhase {
    #[default]
    Idle = 0,
    Accelerating = 1,
    Steady = 2,
    Decelerating = 3,
}

impl SpinPhase {
    pub fn is_moving(self) -> bool {
        !matches!(self, SpinPhase::Idle)
    }
}

/// Snapshot of the disk after one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiskFrame {
    /// Rotation in [0, 360).
    pub angle_deg: f64,
    pub speed: f64,
    /// `speed / max_speed`, clamped to [0, 1].
    pub blend: f64,
    pub phase: SpinPhase,
}

impl DiskFrame {
    pub fn at_rest() -> Self {
        Self {
            angle_deg: 0.0,
            speed: 0.0,
            blend: 0.0,
            phase: SpinPhase::Idle,
        }
    }

    pub fn to_sample(&self) -> FrameSample {
        FrameSample {
            angle_deg: self.angle_deg as f32,
            speed: self.speed as f32,
            blend: self.blend as f32,
            phase: self.phase as u32,
        }
    }
}

/// GPU-friendly layout of a [`DiskFrame`].
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameSample {
    pub angle_deg: f32,
    pub speed: f32,
    pub blend: f32,
    pub phase: u32,
}

/// Spin animator with a bounded frame history (ring buffer).
pub struct SpinAnimator {
    profile: SpinProfile,
    phase: SpinPhase,
    angle_deg: f64,
    speed: f64,
    history: VecDeque<DiskFrame>,
    max_history_len: usize,
}

impl SpinAnimator {
    pub fn new(profile: SpinProfile) -> Self {
        Self::with_history(profile, DEFAULT_HISTORY_LEN)
    }

    pub fn with_history(profile: SpinProfile, max_history_len: usize) -> Self {
        Self {
            profile,
            phase: SpinPhase::Idle,
            angle_deg: 0.0,
            speed: 0.0,
            history: VecDeque::with_capacity(max_history_len),
            max_history_len,
        }
    }

    pub fn profile(&self) -> &SpinProfile {
        &self.profile
    }

    pub fn phase(&self) -> SpinPhase {
        self.phase
    }

    pub fn is_spinning(&self) -> bool {
        matches!(self.phase, SpinPhase::Accelerating | SpinPhase::Steady)
    }

    /// Begins spinning up. No effect while already spinning up or steady.
    pub fn start(&mut self) {
        if matches!(self.phase, SpinPhase::Idle | SpinPhase::Decelerating) {
            tracing::debug!(speed = self.speed, "disk spin-up");
            self.phase = SpinPhase::Accelerating;
        }
    }

    /// Begins spinning down. No effect while idle or already slowing.
    pub fn stop(&mut self) {
        if matches!(self.phase, SpinPhase::Accelerating | SpinPhase::Steady) {
            tracing::debug!(speed = self.speed, "disk spin-down");
            self.phase = SpinPhase::Decelerating;
        }
    }

    /// Rotate/stop button semantics.
    pub fn toggle(&mut self) {
        if self.is_spinning() {
            self.stop();
        } else {
            self.start();
        }
    }

    /// Advances the disk by `dt` seconds. Negative or non-finite `dt` counts
    /// as zero elapsed time.
    pub fn tick(&mut self, dt: f64) -> DiskFrame {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
        let top = self.profile.top_speed();

        match self.phase {
            SpinPhase::Idle => self.speed = 0.0,
            SpinPhase::Accelerating => {
                self.speed = self.profile.speed_up(self.speed, dt);
                if self.speed >= top {
                    self.speed = top;
                    self.phase = SpinPhase::Steady;
                }
            }
            SpinPhase::Steady => self.speed = top,
            SpinPhase::Decelerating => {
                self.speed = self.profile.slow_down(self.speed, dt);
                if self.speed <= 0.0 {
                    self.speed = 0.0;
                    self.phase = SpinPhase::Idle;
                }
            }
        }

        self.angle_deg = (self.angle_deg + self.speed * dt).rem_euclid(360.0);
        let blend = if top > 0.0 {
            (self.speed / top).clamp(0.0, 1.0)
        } else {
            0.0
        };

        let frame = DiskFrame {
            angle_deg: self.angle_deg,
            speed: self.speed,
            blend,
            phase: self.phase,
        };
        self.record(frame);
        frame
    }

    fn record(&mut self, frame: DiskFrame) {
        if self.max_history_len == 0 {
            return;
        }
        if self.history.len() >= self.max_history_len {
            self.history.pop_front();
        }
        self.history.push_back(frame);
    }

    pub fn history(&self) -> &VecDeque<DiskFrame> {
        &self.history
    }

    pub fn history_samples(&self) -> Vec<FrameSample> {
        self.history.iter().map(DiskFrame::to_sample).collect()
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }
}

impl Default for SpinAnimator {
    fn default() -> Self {
        Self::new(SpinProfile::default())
    }
}

/// Anything that produces one frame per explicit time step.
pub trait FrameDriven {
    type Frame;

    fn advance(&mut self, dt: f64) -> Self::Frame;
}

impl FrameDriven for SpinAnimator {
    type Frame = DiskFrame;

    fn advance(&mut self, dt: f64) -> DiskFrame {
        self.tick(dt)
    }
}
