//! Motion parameters of one axis.

use serde::Deserialize;

use super::modes::RetryCount;
use super::units::{Egu, EguPerSec, EguPerSecSquared, Seconds};
use crate::motion::Kinematics;

/// Motion parameter bundle, one per axis.
///
/// Field names follow the motor record; TOML accepts either the long name or
/// the record field (`VELO`, `ACCL`, ...). Accelerations given as ramp times
/// are converted on demand and never stored twice.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MotionParameters {
    /// Positioning velocity (VELO).
    #[serde(alias = "VELO")]
    pub velocity: EguPerSec,

    /// Time to reach `velocity` (ACCL).
    #[serde(alias = "ACCL")]
    pub acceleration_time: Seconds,

    /// Jog velocity (JVEL).
    #[serde(alias = "JVEL")]
    pub jog_velocity: EguPerSec,

    /// Jog acceleration (JAR), a rate rather than a time.
    #[serde(alias = "JAR")]
    pub jog_acceleration: EguPerSecSquared,

    /// Backlash velocity (BVEL).
    #[serde(alias = "BVEL")]
    pub backlash_velocity: EguPerSec,

    /// Time to reach `backlash_velocity` (BACC).
    #[serde(alias = "BACC")]
    pub backlash_acceleration_time: Seconds,

    /// Signed backlash distance (BDST). The sign is the direction of the
    /// final approach.
    #[serde(alias = "BDST")]
    pub backlash_distance: Egu,

    /// Fraction of the approach displacement commanded per move (FRAC).
    #[serde(default = "default_move_fraction", alias = "FRAC")]
    pub move_fraction: f64,

    /// Retries after the initial move (RTRY).
    #[serde(default, alias = "RTRY")]
    pub retry_count: RetryCount,

    /// Delay between a move and its settle check (DLY).
    #[serde(default, alias = "DLY")]
    pub settle_delay: Seconds,

    /// Per-retry attenuation used by the geometric retry mode.
    #[serde(default = "default_geometric_ratio")]
    pub geometric_ratio: f64,

    /// Settle window and comparison epsilon (RDBD).
    #[serde(default = "default_settle_tolerance", alias = "RDBD")]
    pub settle_tolerance: f64,
}

fn default_move_fraction() -> f64 {
    1.0
}

fn default_geometric_ratio() -> f64 {
    0.5
}

fn default_settle_tolerance() -> f64 {
    1e-6
}

impl MotionParameters {
    /// Start building a parameter set.
    pub fn builder() -> super::ParametersBuilder {
        super::ParametersBuilder::new()
    }

    /// Positioning acceleration, VELO / ACCL.
    #[inline]
    pub fn acceleration(&self) -> EguPerSecSquared {
        self.velocity.over(self.acceleration_time)
    }

    /// Backlash acceleration, BVEL / BACC.
    #[inline]
    pub fn backlash_acceleration(&self) -> EguPerSecSquared {
        self.backlash_velocity.over(self.backlash_acceleration_time)
    }

    /// Velocity and acceleration of a normal (approach) move.
    #[inline]
    pub fn positioning(&self) -> Kinematics {
        Kinematics::new(self.velocity, self.acceleration())
    }

    /// Velocity and acceleration of a backlash move.
    #[inline]
    pub fn backlash(&self) -> Kinematics {
        Kinematics::new(self.backlash_velocity, self.backlash_acceleration())
    }

    /// Velocity and acceleration of a jog.
    #[inline]
    pub fn jog(&self) -> Kinematics {
        Kinematics::new(self.jog_velocity, self.jog_acceleration)
    }
}
