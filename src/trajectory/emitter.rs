//! Trajectory emission.
//!
//! Drives the backlash planner and the retry policy across the attempts of a
//! move and collects the records the controller is expected to produce.

use crate::config::units::{Egu, Seconds};
use crate::config::{validate_command, validate_parameters, MotionParameters, SuiteConfig};
use crate::error::{truncated, ConfigError, Error, MotionError, Result};
use crate::motion::{
    AttemptTarget, AxisModel, BacklashPlanner, Direction, HeldAxis, Kinematics, MoveCommand,
    MovePhase, MovePlan, RetryDecision, RetryModePolicy,
};

use super::record::{ExpectedRecord, ExpectedSequence, Settlement, Trajectory};

/// Emits expected sequences for one axis configuration.
#[derive(Debug, Clone, Copy)]
pub struct TrajectoryEmitter<'a> {
    params: &'a MotionParameters,
    planner: BacklashPlanner,
}

impl<'a> TrajectoryEmitter<'a> {
    /// Create an emitter for validated parameters.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the parameters are invalid.
    pub fn new(params: &'a MotionParameters) -> Result<Self> {
        validate_parameters(params)?;
        Ok(Self {
            params,
            planner: BacklashPlanner::from_parameters(params),
        })
    }

    /// Parameters the emitter was built for.
    #[inline]
    pub fn parameters(&self) -> &MotionParameters {
        self.params
    }

    /// Backlash planner of the axis.
    #[inline]
    pub fn planner(&self) -> &BacklashPlanner {
        &self.planner
    }

    /// Emit against an axis that never moves, producing every attempt.
    pub fn emit(&self, command: &MoveCommand) -> Result<Trajectory> {
        self.emit_with(command, HeldAxis)
    }

    /// Emit against an arbitrary axis model.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if a position of the command, or one derived
    /// from it, is not finite, and `MotionError::PositionLost` if the axis
    /// model reports a non-finite position.
    pub fn emit_with<A: AxisModel>(&self, command: &MoveCommand, mut axis: A) -> Result<Trajectory> {
        validate_command(command)?;

        let plan = self.planner.plan(command.start, command.target);
        let policy = RetryModePolicy::new(command, self.params);

        debug!(
            "emit {} -> {}: plan {}, retries {}",
            command.start.0,
            command.target.0,
            plan.records_per_attempt(),
            self.params.retry_count.value()
        );

        let mut sequence = ExpectedSequence::new();
        let mut observed = command.start;
        let mut next = policy.initial();
        let mut attempt: u8 = 0;

        let settlement = loop {
            self.push_attempt(&mut sequence, plan, attempt, observed, next)?;

            let reached = axis.settle(attempt, observed, next.target);
            if !reached.0.is_finite() {
                return Err(Error::Motion(MotionError::PositionLost {
                    attempt,
                    position: reached.0,
                }));
            }
            match policy.refine(attempt, next.target, reached) {
                RetryDecision::Settled => {
                    break Settlement::Settled {
                        attempts: attempt + 1,
                    }
                }
                RetryDecision::Exhausted { residual } => {
                    debug!(
                        "exhausted after {} attempts, residual {}",
                        attempt + 1,
                        residual.0
                    );
                    break Settlement::Exhausted {
                        attempts: attempt + 1,
                        residual,
                    };
                }
                RetryDecision::Retry(target) => {
                    next = target;
                    observed = reached;
                    attempt += 1;
                }
            }
        };

        Ok(Trajectory {
            command: *command,
            plan,
            sequence,
            settlement,
            settle_delay: self.params.settle_delay,
        })
    }

    fn push_attempt(
        &self,
        sequence: &mut ExpectedSequence,
        plan: MovePlan,
        attempt: u8,
        origin: Egu,
        next: AttemptTarget,
    ) -> Result<()> {
        let sub_move = |phase, kinematics: Kinematics, from: Egu, to: Egu| ExpectedRecord {
            attempt,
            phase,
            direction: Direction::from_delta(to - from),
            addressing: next.addressing,
            velocity: kinematics.velocity,
            acceleration: kinematics.acceleration,
            target: to,
            origin: from,
        };

        match plan {
            MovePlan::Direct => {
                sequence.push(finite(sub_move(
                    MovePhase::Approach,
                    self.params.positioning(),
                    origin,
                    next.target,
                ))?)?;
            }
            MovePlan::WithinBand => {
                sequence.push(finite(sub_move(
                    MovePhase::BacklashCorrection,
                    self.params.backlash(),
                    origin,
                    next.target,
                ))?)?;
            }
            MovePlan::Compensated => {
                let full = self.planner.approach_target(next.target);
                let approach = origin + (full - origin) * self.params.move_fraction;
                sequence.push(finite(sub_move(
                    MovePhase::Approach,
                    self.params.positioning(),
                    origin,
                    approach,
                ))?)?;
                let correction = finite(sub_move(
                    MovePhase::BacklashCorrection,
                    self.params.backlash(),
                    approach,
                    next.target,
                ))?;
                if correction.direction != self.planner.backlash_direction() {
                    warn!(
                        "attempt {} corrects against the backlash direction",
                        attempt
                    );
                }
                sequence.push(correction)?;
            }
        }

        trace!("attempt {} emitted, target {}", attempt, next.target.0);
        Ok(())
    }

    /// Time spent settling across `attempts` attempts.
    #[inline]
    pub fn settle_time(&self, attempts: u8) -> Seconds {
        Seconds(self.params.settle_delay.0 * f64::from(attempts))
    }
}

/// Reject a record whose positions or delta overflowed.
fn finite(record: ExpectedRecord) -> Result<ExpectedRecord> {
    for value in [record.target, record.origin, record.delta()] {
        if !value.0.is_finite() {
            return Err(Error::Config(ConfigError::InvalidPosition(value.0)));
        }
    }
    Ok(record)
}

/// Emit the expected sequence of a command against a held axis.
///
/// # Errors
///
/// Returns a `ConfigError` for invalid parameters or positions.
pub fn emit(command: &MoveCommand, params: &MotionParameters) -> Result<Trajectory> {
    TrajectoryEmitter::new(params)?.emit(command)
}

/// Emit the expected sequence of a suite case, looked up by id.
///
/// # Errors
///
/// Returns `ConfigError::CaseNotFound` or `ConfigError::AxisNotFound` for
/// unknown ids, or a validation error for the axis or the case.
pub fn emit_case(suite: &SuiteConfig, id: u32) -> Result<Trajectory> {
    let case = suite.case(id).ok_or(ConfigError::CaseNotFound(id))?;
    let params = suite
        .axis(case.axis.as_str())
        .ok_or_else(|| ConfigError::AxisNotFound(truncated(case.axis.as_str())))?;
    emit(&case.command(), params)
}
