//! Speed limits for the spinning disk.

use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_SPEED_DEG_S: f64 = 720.0;
pub const DEFAULT_ACCELERATION_DEG_S2: f64 = 1440.0;
pub const DEFAULT_DECELERATION_DEG_S2: f64 = 1080.0;

/// Top speed (deg/s) and ramp rates (deg/s²).
///
/// A non-positive or non-finite ramp rate means the disk jumps straight to
/// the target speed on the next tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpinProfile {
    pub max_speed: f64,
    pub acceleration: f64,
    pub deceleration: f64,
}

impl Default for SpinProfile {
    fn default() -> Self {
        Self {
            max_speed: DEFAULT_MAX_SPEED_DEG_S,
            acceleration: DEFAULT_ACCELERATION_DEG_S2,
            deceleration: DEFAULT_DECELERATION_DEG_S2,
        }
    }
}

impl SpinProfile {
    /// Starts and stops without a ramp.
    pub fn instant(max_speed: f64) -> Self {
        Self {
            max_speed,
            acceleration: 0.0,
            deceleration: 0.0,
        }
    }

    pub(crate) fn top_speed(&self) -> f64 {
        if self.max_speed.is_finite() && self.max_speed > 0.0 {
            self.max_speed
        } else {
            0.0
        }
    }

    pub(crate) fn speed_up(&self, speed: f64, dt: f64) -> f64 {
        let top = self.top_speed();
        if !(self.acceleration.is_finite() && self.acceleration > 0.0) {
            return top;
        }
        (speed + self.acceleration * dt).min(top)
    }

    pub(crate) fn slow_down(&self, speed: f64, dt: f64) -> f64 {
        if !(self.deceleration.is_finite() && self.deceleration > 0.0) {
            return 0.0;
        }
        (speed - self.deceleration * dt).max(0.0)
    }

    /// Seconds from rest to top speed.
    pub fn spin_up_secs(&self) -> f64 {
        if self.acceleration.is_finite() && self.acceleration > 0.0 {
            self.top_speed() / self.acceleration
        } else {
            0.0
        }
    }
}
