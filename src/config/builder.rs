//! Builder pattern for MotionParameters.

use super::modes::RetryCount;
use super::params::MotionParameters;
use super::units::{Egu, EguPerSec, EguPerSecSquared, Seconds};
use super::validation::validate_parameters;
use crate::error::{ConfigError, Error, Result};

/// Builder for creating validated MotionParameters.
#[derive(Debug, Clone)]
pub struct ParametersBuilder {
    velocity: Option<EguPerSec>,
    acceleration_time: Option<Seconds>,
    jog_velocity: Option<EguPerSec>,
    jog_acceleration: Option<EguPerSecSquared>,
    backlash_velocity: Option<EguPerSec>,
    backlash_acceleration_time: Option<Seconds>,
    backlash_distance: Egu,
    move_fraction: f64,
    retry_count: i64,
    settle_delay: Seconds,
    geometric_ratio: f64,
    settle_tolerance: f64,
}

impl Default for ParametersBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ParametersBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            velocity: None,
            acceleration_time: None,
            jog_velocity: None,
            jog_acceleration: None,
            backlash_velocity: None,
            backlash_acceleration_time: None,
            backlash_distance: Egu(0.0),
            move_fraction: 1.0,
            retry_count: i64::from(RetryCount::DEFAULT.value()),
            settle_delay: Seconds(0.0),
            geometric_ratio: 0.5,
            settle_tolerance: 1e-6,
        }
    }

    /// Set positioning velocity and its ramp time (VELO, ACCL).
    pub fn positioning(mut self, velocity: EguPerSec, ramp: Seconds) -> Self {
        self.velocity = Some(velocity);
        self.acceleration_time = Some(ramp);
        self
    }

    /// Set jog velocity and acceleration (JVEL, JAR).
    pub fn jog(mut self, velocity: EguPerSec, acceleration: EguPerSecSquared) -> Self {
        self.jog_velocity = Some(velocity);
        self.jog_acceleration = Some(acceleration);
        self
    }

    /// Set backlash velocity and its ramp time (BVEL, BACC).
    pub fn backlash(mut self, velocity: EguPerSec, ramp: Seconds) -> Self {
        self.backlash_velocity = Some(velocity);
        self.backlash_acceleration_time = Some(ramp);
        self
    }

    /// Set signed backlash distance (BDST).
    pub fn backlash_distance(mut self, distance: Egu) -> Self {
        self.backlash_distance = distance;
        self
    }

    /// Set move fraction (FRAC).
    pub fn move_fraction(mut self, fraction: f64) -> Self {
        self.move_fraction = fraction;
        self
    }

    /// Set retry count (RTRY). Validated in [`build`](Self::build).
    pub fn retry_count(mut self, retries: i64) -> Self {
        self.retry_count = retries;
        self
    }

    /// Set settle delay (DLY).
    pub fn settle_delay(mut self, delay: Seconds) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Set geometric retry ratio.
    pub fn geometric_ratio(mut self, ratio: f64) -> Self {
        self.geometric_ratio = ratio;
        self
    }

    /// Set settle tolerance.
    pub fn settle_tolerance(mut self, tolerance: f64) -> Self {
        self.settle_tolerance = tolerance;
        self
    }

    /// Build and validate the parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if a required value is missing or violates its invariant.
    pub fn build(self) -> Result<MotionParameters> {
        let missing = |field| Error::Config(ConfigError::MissingParameter(field));

        let velocity = self.velocity.ok_or_else(|| missing("VELO"))?;
        let acceleration_time = self.acceleration_time.ok_or_else(|| missing("ACCL"))?;
        let jog_velocity = self.jog_velocity.ok_or_else(|| missing("JVEL"))?;
        let jog_acceleration = self.jog_acceleration.ok_or_else(|| missing("JAR"))?;
        let backlash_velocity = self.backlash_velocity.ok_or_else(|| missing("BVEL"))?;
        let backlash_acceleration_time = self
            .backlash_acceleration_time
            .ok_or_else(|| missing("BACC"))?;
        let retry_count = RetryCount::new(self.retry_count)?;

        let params = MotionParameters {
            velocity,
            acceleration_time,
            jog_velocity,
            jog_acceleration,
            backlash_velocity,
            backlash_acceleration_time,
            backlash_distance: self.backlash_distance,
            move_fraction: self.move_fraction,
            retry_count,
            settle_delay: self.settle_delay,
            geometric_ratio: self.geometric_ratio,
            settle_tolerance: self.settle_tolerance,
        };

        validate_parameters(&params)?;
        Ok(params)
    }
}
