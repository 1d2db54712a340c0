//! Move direction, phase and kinematics.
//!
//! Provides the velocity/acceleration pair a sub-move runs with and a
//! symmetric trapezoidal duration estimate for it.

use core::fmt;

use libm::sqrt;

use crate::config::units::{Egu, EguPerSec, EguPerSecSquared, Seconds};

/// Direction of axis motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Towards increasing position.
    Forward,
    /// Towards decreasing position.
    Reverse,
}

impl Direction {
    /// Get direction from a signed displacement. Zero counts as forward.
    #[inline]
    pub fn from_delta(delta: Egu) -> Self {
        if delta.0 >= 0.0 {
            Direction::Forward
        } else {
            Direction::Reverse
        }
    }

    /// Get the sign multiplier.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            Direction::Forward => 1.0,
            Direction::Reverse => -1.0,
        }
    }

    /// Keyword used in record lines.
    pub const fn keyword(self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Reverse => "reverse",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Phase of a positioning attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MovePhase {
    /// Move with positioning velocity/acceleration.
    Approach,
    /// Final move with backlash velocity/acceleration.
    BacklashCorrection,
}

impl MovePhase {
    /// Keyword used in record lines.
    pub const fn keyword(self) -> &'static str {
        match self {
            MovePhase::Approach => "approach",
            MovePhase::BacklashCorrection => "backlash",
        }
    }
}

impl fmt::Display for MovePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Velocity and acceleration a sub-move is commanded with.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Kinematics {
    /// Cruise velocity.
    pub velocity: EguPerSec,
    /// Acceleration and deceleration rate.
    pub acceleration: EguPerSecSquared,
}

impl Kinematics {
    /// Create a new velocity/acceleration pair.
    #[inline]
    pub const fn new(velocity: EguPerSec, acceleration: EguPerSecSquared) -> Self {
        Self {
            velocity,
            acceleration,
        }
    }

    /// Estimate the duration of a move over `distance` (sign ignored).
    ///
    /// Symmetric trapezoid; falls back to a triangle when the move is too
    /// short to reach cruise velocity.
    pub fn move_duration(&self, distance: Egu) -> Seconds {
        let d = distance.abs().0;
        let v = self.velocity.0;
        let a = self.acceleration.0;

        if d == 0.0 || v <= 0.0 || a <= 0.0 {
            return Seconds(0.0);
        }

        // Time and distance to reach cruise velocity: t = v/a, s = v²/2a
        let t_ramp = v / a;
        let ramp_distance = 0.5 * a * t_ramp * t_ramp;

        if 2.0 * ramp_distance >= d {
            // Triangle profile: peak reached at d/2
            Seconds(2.0 * sqrt(d / a))
        } else {
            Seconds(2.0 * t_ramp + (d - 2.0 * ramp_distance) / v)
        }
    }
}
