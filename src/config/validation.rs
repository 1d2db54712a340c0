//! Configuration validation.

use crate::error::{ConfigError, Error, Result};
use crate::motion::MoveCommand;

use super::{MotionParameters, SuiteConfig};

/// Validate a motion parameter set.
///
/// Checks:
/// - Velocities, accelerations and ramp times are strictly positive
/// - Move fraction is in (0, 1]
/// - Settle delay is not negative
/// - Geometric ratio is in (0, 1)
/// - Settle tolerance and backlash distance are finite
pub fn validate_parameters(params: &MotionParameters) -> Result<()> {
    require_positive("VELO", params.velocity.0)?;
    require_positive("ACCL", params.acceleration_time.0)?;
    require_positive("JVEL", params.jog_velocity.0)?;
    require_positive("JAR", params.jog_acceleration.0)?;
    require_positive("BVEL", params.backlash_velocity.0)?;
    require_positive("BACC", params.backlash_acceleration_time.0)?;

    if !params.backlash_distance.0.is_finite() {
        return Err(Error::Config(ConfigError::InvalidBacklashDistance(
            params.backlash_distance.0,
        )));
    }

    // NaN fails both comparisons
    if !(params.move_fraction > 0.0 && params.move_fraction <= 1.0) {
        return Err(Error::Config(ConfigError::InvalidMoveFraction(
            params.move_fraction,
        )));
    }

    if params.settle_delay.0 < 0.0 || !params.settle_delay.0.is_finite() {
        return Err(Error::Config(ConfigError::NegativeSettleDelay(
            params.settle_delay.0,
        )));
    }

    if !(params.geometric_ratio > 0.0 && params.geometric_ratio < 1.0) {
        return Err(Error::Config(ConfigError::InvalidGeometricRatio(
            params.geometric_ratio,
        )));
    }

    if params.settle_tolerance < 0.0 || !params.settle_tolerance.is_finite() {
        return Err(Error::Config(ConfigError::InvalidTolerance(
            params.settle_tolerance,
        )));
    }

    Ok(())
}

/// Validate the positions of a move command.
///
/// Both positions and the displacement between them must be finite.
pub fn validate_command(command: &MoveCommand) -> Result<()> {
    let displacement = command.target - command.start;
    for position in [command.start, command.target, displacement] {
        if !position.0.is_finite() {
            return Err(Error::Config(ConfigError::InvalidPosition(position.0)));
        }
    }
    Ok(())
}

/// Validate a test suite.
///
/// Checks:
/// - Every axis has valid parameters
/// - Every case references an existing axis and has finite positions
/// - Case ids are unique
pub fn validate_suite(config: &SuiteConfig) -> Result<()> {
    for (_, params) in config.axes.iter() {
        validate_parameters(params)?;
    }

    for (index, case) in config.cases.iter().enumerate() {
        if config.axis(case.axis.as_str()).is_none() {
            return Err(Error::Config(ConfigError::AxisNotFound(case.axis.clone())));
        }

        validate_command(&case.command())?;

        if config.cases[..index].iter().any(|other| other.id == case.id) {
            return Err(Error::Config(ConfigError::DuplicateCaseId(case.id)));
        }
    }

    Ok(())
}

fn require_positive(field: &'static str, value: f64) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(Error::Config(ConfigError::NonPositive { field, value }))
    }
}
